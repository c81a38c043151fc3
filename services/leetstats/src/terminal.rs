//! Terminal display surface
//!
//! Regions are kept in memory and the page is redrawn each time the
//! trigger goes back to idle, which is when a search has settled.

use std::io::{self, Write};

use tracing::warn;

use crate::models::Difficulty;
use crate::presenter::{
    DisplaySurface, ProblemLink, ProgressIndicator, RemediationHint, SummaryCard, TriggerState,
};

const BAR_WIDTH: usize = 20;

/// Display surface printing to any writer
pub struct TerminalSurface<W: Write> {
    out: W,
    progress: Vec<(Difficulty, ProgressIndicator)>,
    cards: Vec<SummaryCard>,
    recent: Option<(String, Vec<ProblemLink>)>,
    error: Option<(String, Option<RemediationHint>)>,
    trigger: TriggerState,
}

impl TerminalSurface<io::Stdout> {
    /// Surface writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Create a new surface over a writer
    pub fn new(out: W) -> Self {
        Self {
            out,
            progress: Vec::new(),
            cards: Vec::new(),
            recent: None,
            error: None,
            trigger: TriggerState::Idle,
        }
    }

    /// Current trigger state
    pub fn trigger(&self) -> TriggerState {
        self.trigger
    }

    /// Consume the surface, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_or_warn(&mut self, result: io::Result<()>) {
        if let Err(e) = result.and_then(|_| self.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        writeln!(self.out)?;

        if let Some((message, hint)) = &self.error {
            writeln!(self.out, "Error: {}", message)?;
            if let Some(hint) = hint {
                writeln!(self.out, "{}: {}", hint.text, hint.href)?;
            }
            return Ok(());
        }

        for (difficulty, progress) in &self.progress {
            writeln!(
                self.out,
                "{:<7}{}  {:>6}  {}",
                difficulty.as_str(),
                progress_bar(progress.percent),
                format_percent(progress.percent),
                progress.label()
            )?;
        }

        if !self.cards.is_empty() {
            writeln!(self.out)?;
        }
        for card in &self.cards {
            writeln!(self.out, "{}: {}", card.label, card.value)?;
        }

        if let Some((heading, links)) = &self.recent {
            writeln!(self.out)?;
            writeln!(self.out, "{}", heading)?;
            for (position, link) in links.iter().enumerate() {
                match link.accepted_at {
                    Some(at) => writeln!(
                        self.out,
                        "{:>3}. {} ({}) {}",
                        position + 1,
                        link.title,
                        at.format("%Y-%m-%d"),
                        link.href
                    )?,
                    None => writeln!(self.out, "{:>3}. {} {}", position + 1, link.title, link.href)?,
                }
            }
        }

        Ok(())
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn set_progress(&mut self, difficulty: Difficulty, progress: &ProgressIndicator) {
        self.error = None;
        match self.progress.iter_mut().find(|(slot, _)| *slot == difficulty) {
            Some((_, current)) => *current = *progress,
            None => self.progress.push((difficulty, *progress)),
        }
    }

    fn set_summary_cards(&mut self, cards: &[SummaryCard]) {
        self.error = None;
        self.cards = cards.to_vec();
    }

    fn set_recent_list(&mut self, heading: &str, links: &[ProblemLink]) {
        self.error = None;
        self.recent = Some((heading.to_string(), links.to_vec()));
    }

    fn show_error(&mut self, message: &str, hint: Option<&RemediationHint>) {
        self.progress.clear();
        self.cards.clear();
        self.recent = None;
        self.error = Some((message.to_string(), hint.cloned()));
    }

    fn set_trigger(&mut self, state: TriggerState) {
        self.trigger = state;
        let result = match state {
            TriggerState::Busy => writeln!(self.out, "{}", state.label()),
            TriggerState::Idle => self.draw(),
        };
        self.write_or_warn(result);
    }

    fn notify(&mut self, message: &str) {
        let result = writeln!(self.out, "! {}", message);
        self.write_or_warn(result);
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = if percent.is_finite() {
        ((percent / 100.0) * BAR_WIDTH as f64)
            .round()
            .clamp(0.0, BAR_WIDTH as f64) as usize
    } else {
        0
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn format_percent(percent: f64) -> String {
    if percent.is_finite() {
        format!("{:.1}%", percent)
    } else {
        "--".to_string()
    }
}
