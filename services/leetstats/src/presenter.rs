//! Presenter turning a user report into display values
//!
//! The presenter never touches a concrete UI. It writes into a
//! [`DisplaySurface`], a set of named slots that a host (terminal, test
//! harness, web page) implements.

use chrono::{DateTime, Utc};

use crate::models::{Difficulty, UserReport};

/// Heading placed above the recent submissions list
pub const RECENT_HEADING: &str = "Recent Accepted Questions:";

/// Text of the link pointing at the relay's opt-in page
pub const RELAY_HINT_TEXT: &str = "Click here to enable CORS if blocked";

/// Progress of one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressIndicator {
    pub solved: u64,
    pub total: u64,
    /// `solved / total * 100`; not finite when `total` is 0
    pub percent: f64,
}

impl ProgressIndicator {
    /// Fraction text, e.g. `25/50`
    pub fn label(&self) -> String {
        format!("{}/{}", self.solved, self.total)
    }
}

/// Compute the progress indicator for a tier
///
/// A zero total yields a NaN (or infinite) percentage, which surfaces are
/// expected to render as an empty indicator.
pub fn update_progress(solved: u64, total: u64) -> ProgressIndicator {
    ProgressIndicator {
        solved,
        total,
        percent: solved as f64 / total as f64 * 100.0,
    }
}

/// Label/value pair shown as a summary card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: u64,
}

/// Link to a recently accepted problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemLink {
    pub title: String,
    pub href: String,
    pub accepted_at: Option<DateTime<Utc>>,
}

/// Pointer to a page that can unblock the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationHint {
    pub text: &'static str,
    pub href: String,
}

/// State of the search trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Busy,
}

impl TriggerState {
    /// Label shown on the trigger
    pub fn label(&self) -> &'static str {
        match self {
            TriggerState::Idle => "Search",
            TriggerState::Busy => "Searching...",
        }
    }

    /// Whether the trigger accepts input
    pub fn is_interactive(&self) -> bool {
        matches!(self, TriggerState::Idle)
    }
}

/// Named display slots the widget writes into
///
/// Each region write fully replaces the previous content of that region.
pub trait DisplaySurface {
    /// Progress indicator and fraction label of one tier
    fn set_progress(&mut self, difficulty: Difficulty, progress: &ProgressIndicator);

    /// Summary cards region
    fn set_summary_cards(&mut self, cards: &[SummaryCard]);

    /// Recent submissions region
    fn set_recent_list(&mut self, heading: &str, links: &[ProblemLink]);

    /// Replace the primary region with an error message
    fn show_error(&mut self, message: &str, hint: Option<&RemediationHint>);

    /// Label and interactivity of the trigger
    fn set_trigger(&mut self, state: TriggerState);

    /// Blocking notification, used for validation messages
    fn notify(&mut self, message: &str);
}

/// Maps reports onto a display surface
#[derive(Debug, Clone)]
pub struct Presenter {
    problem_base_url: String,
}

impl Presenter {
    /// Create a new presenter linking problems under `problem_base_url`
    pub fn new(problem_base_url: impl Into<String>) -> Self {
        let problem_base_url = problem_base_url.into().trim_end_matches('/').to_string();
        Self { problem_base_url }
    }

    /// Write a report into all three regions of the surface
    pub fn render<D>(&self, report: &UserReport, surface: &mut D)
    where
        D: DisplaySurface + ?Sized,
    {
        for difficulty in Difficulty::TIERS {
            let progress = update_progress(report.solved(difficulty), report.available(difficulty));
            surface.set_progress(difficulty, &progress);
        }

        surface.set_summary_cards(&summary_cards(report));
        surface.set_recent_list(RECENT_HEADING, &self.recent_links(report));
    }

    /// Link target of a problem
    pub fn problem_url(&self, title_slug: &str) -> String {
        format!("{}/{}/", self.problem_base_url, title_slug)
    }

    /// Recent accepted submissions as links, most recent first
    pub fn recent_links(&self, report: &UserReport) -> Vec<ProblemLink> {
        report
            .recent
            .iter()
            .map(|submission| ProblemLink {
                title: submission.title.clone(),
                href: self.problem_url(&submission.title_slug),
                accepted_at: submission.accepted_at(),
            })
            .collect()
    }
}

/// Submission totals, overall then per tier
pub fn summary_cards(report: &UserReport) -> Vec<SummaryCard> {
    [
        ("Overall Submissions", Difficulty::All),
        ("Overall Easy Submissions", Difficulty::Easy),
        ("Overall Medium Submissions", Difficulty::Medium),
        ("Overall Hard Submissions", Difficulty::Hard),
    ]
    .into_iter()
    .map(|(label, difficulty)| SummaryCard {
        label,
        value: report.submissions(difficulty),
    })
    .collect()
}
