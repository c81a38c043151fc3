//! Integration tests for the search flow
//!
//! These tests drive the controller with a scripted transport and a
//! surface that records every slot write in order.

use std::collections::HashMap;
use std::sync::Mutex;

use common::StatsConfig;
use common::error::{FetchError, FetchResult, ValidationError};
use leetstats::models::{Difficulty, GraphQlRequest};
use leetstats::presenter::{
    DisplaySurface, ProblemLink, ProgressIndicator, RELAY_HINT_TEXT, RemediationHint, SummaryCard,
    TriggerState,
};
use leetstats::{Controller, RawResponse, SearchOutcome, StatsTransport};
use tokio::sync::oneshot;
use tokio_test::{assert_pending, assert_ready, task};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Progress(Difficulty, String, f64),
    Cards(Vec<SummaryCard>),
    Recent(String, Vec<ProblemLink>),
    Error(String, Option<RemediationHint>),
    Trigger(TriggerState),
    Notify(String),
}

#[derive(Default)]
struct RecordingSurface {
    events: Vec<Event>,
}

impl RecordingSurface {
    fn triggers(&self) -> Vec<TriggerState> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Trigger(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    fn last_trigger(&self) -> Option<TriggerState> {
        self.triggers().last().copied()
    }

    fn errors(&self) -> Vec<(String, Option<RemediationHint>)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Error(message, hint) => Some((message.clone(), hint.clone())),
                _ => None,
            })
            .collect()
    }

    fn recent_lists(&self) -> Vec<Vec<ProblemLink>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Recent(_, links) => Some(links.clone()),
                _ => None,
            })
            .collect()
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_progress(&mut self, difficulty: Difficulty, progress: &ProgressIndicator) {
        self.events
            .push(Event::Progress(difficulty, progress.label(), progress.percent));
    }

    fn set_summary_cards(&mut self, cards: &[SummaryCard]) {
        self.events.push(Event::Cards(cards.to_vec()));
    }

    fn set_recent_list(&mut self, heading: &str, links: &[ProblemLink]) {
        self.events
            .push(Event::Recent(heading.to_string(), links.to_vec()));
    }

    fn show_error(&mut self, message: &str, hint: Option<&RemediationHint>) {
        self.events
            .push(Event::Error(message.to_string(), hint.cloned()));
    }

    fn set_trigger(&mut self, state: TriggerState) {
        self.events.push(Event::Trigger(state));
    }

    fn notify(&mut self, message: &str) {
        self.events.push(Event::Notify(message.to_string()));
    }
}

enum Reply {
    Ready(FetchResult<RawResponse>),
    Gated(oneshot::Receiver<FetchResult<RawResponse>>),
}

/// Transport answering per username, each reply used once
#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn reply(self, username: &str, result: FetchResult<RawResponse>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(username.to_string(), Reply::Ready(result));
        self
    }

    fn gate(self, username: &str) -> (Self, oneshot::Sender<FetchResult<RawResponse>>) {
        let (tx, rx) = oneshot::channel();
        self.replies
            .lock()
            .unwrap()
            .insert(username.to_string(), Reply::Gated(rx));
        (self, tx)
    }
}

impl StatsTransport for ScriptedTransport {
    async fn execute(&self, request: &GraphQlRequest) -> FetchResult<RawResponse> {
        let username = request.variables.username.clone();
        self.requests.lock().unwrap().push(username.clone());

        let reply = self.replies.lock().unwrap().remove(&username);
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".to_string()))),
            None => Err(FetchError::Transport(format!("no reply for {}", username))),
        }
    }
}

fn ok(body: String) -> FetchResult<RawResponse> {
    Ok(RawResponse { status: 200, body })
}

fn user_body(easy_solved: u64, slugs: &[&str]) -> String {
    let recent: Vec<_> = slugs
        .iter()
        .enumerate()
        .map(|(i, slug)| {
            serde_json::json!({
                "title": format!("Problem {}", i + 1),
                "titleSlug": slug,
                "timestamp": (1_700_000_000 - i as i64 * 86_400).to_string(),
            })
        })
        .collect();

    serde_json::json!({
        "data": {
            "allQuestionsCount": [
                {"difficulty": "All", "count": 100},
                {"difficulty": "Easy", "count": 20},
                {"difficulty": "Medium", "count": 50},
                {"difficulty": "Hard", "count": 30}
            ],
            "matchedUser": {"submitStats": {
                "acSubmissionNum": [
                    {"difficulty": "All", "count": easy_solved, "submissions": 0},
                    {"difficulty": "Easy", "count": easy_solved, "submissions": 0}
                ],
                "totalSubmissionNum": [
                    {"difficulty": "All", "count": 0, "submissions": 77},
                    {"difficulty": "Easy", "count": 0, "submissions": 40},
                    {"difficulty": "Medium", "count": 0, "submissions": 30},
                    {"difficulty": "Hard", "count": 0, "submissions": 7}
                ]
            }},
            "recentAcSubmissionList": recent
        }
    })
    .to_string()
}

fn relayed_config() -> StatsConfig {
    StatsConfig {
        relay_url: Some("https://relay.example/".to_string()),
        ..StatsConfig::default()
    }
}

fn controller(transport: ScriptedTransport) -> Controller<ScriptedTransport, RecordingSurface> {
    Controller::from_config(&StatsConfig::default(), transport, RecordingSurface::default())
}

#[tokio::test]
async fn test_search_renders_report() {
    let transport = ScriptedTransport::default().reply(
        "alice",
        ok(user_body(10, &["two-sum", "add-two-numbers", "valid-parentheses"])),
    );
    let controller = controller(transport);

    let outcome = controller.search("  alice ").await;
    assert!(matches!(outcome, SearchOutcome::Rendered));

    let surface = controller.into_surface();
    assert_eq!(surface.triggers(), vec![TriggerState::Busy, TriggerState::Idle]);
    assert!(surface.events.contains(&Event::Progress(
        Difficulty::Easy,
        "10/20".to_string(),
        50.0
    )));
    assert!(surface.events.contains(&Event::Progress(
        Difficulty::Hard,
        "0/30".to_string(),
        0.0
    )));

    let cards = surface
        .events
        .iter()
        .find_map(|event| match event {
            Event::Cards(cards) => Some(cards.clone()),
            _ => None,
        })
        .expect("summary cards expected");
    let values: Vec<_> = cards.iter().map(|card| card.value).collect();
    assert_eq!(values, vec![77, 40, 30, 7]);

    let lists = surface.recent_lists();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].len(), 3);
    for (link, slug) in lists[0]
        .iter()
        .zip(["two-sum", "add-two-numbers", "valid-parentheses"])
    {
        assert_eq!(link.href, format!("https://leetcode.com/problems/{}/", slug));
    }
}

#[tokio::test]
async fn test_invalid_input_never_fetches() {
    let controller = controller(ScriptedTransport::default());

    let empty = controller.search("   ").await;
    let invalid = controller.search("not a user!").await;

    assert!(matches!(empty, SearchOutcome::Rejected(ValidationError::Empty)));
    assert!(matches!(invalid, SearchOutcome::Rejected(ValidationError::Invalid)));

    let surface = controller.into_surface();
    assert_eq!(
        surface.events,
        vec![
            Event::Notify("Username should not be empty".to_string()),
            Event::Notify("Invalid Username".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unknown_user_restores_trigger() {
    let body = serde_json::json!({
        "errors": [{"message": "That user does not exist."}],
        "data": {"allQuestionsCount": [], "matchedUser": null, "recentAcSubmissionList": null}
    })
    .to_string();
    let controller = controller(ScriptedTransport::default().reply("ghost", ok(body)));

    let outcome = controller.search("ghost").await;
    assert!(matches!(outcome, SearchOutcome::Failed(FetchError::NotFound)));

    let surface = controller.into_surface();
    assert_eq!(surface.errors(), vec![("User not found.".to_string(), None)]);
    assert_eq!(surface.last_trigger(), Some(TriggerState::Idle));
}

#[tokio::test]
async fn test_http_failure_shows_message() {
    let transport = ScriptedTransport::default().reply(
        "alice",
        Ok(RawResponse {
            status: 429,
            body: "Too Many Requests".to_string(),
        }),
    );
    let controller = controller(transport);

    let outcome = controller.search("alice").await;
    assert!(matches!(
        outcome,
        SearchOutcome::Failed(FetchError::Http { status: 429 })
    ));

    let surface = controller.into_surface();
    assert_eq!(
        surface.errors(),
        vec![("Unable to fetch user details.".to_string(), None)]
    );
    assert_eq!(surface.last_trigger(), Some(TriggerState::Idle));
}

#[tokio::test]
async fn test_transport_failure_restores_trigger() {
    let transport = ScriptedTransport::default().reply(
        "alice",
        Err(FetchError::Transport("connection refused".to_string())),
    );
    let controller = controller(transport);

    let outcome = controller.search("alice").await;
    assert!(matches!(outcome, SearchOutcome::Failed(FetchError::Transport(_))));

    let surface = controller.into_surface();
    assert_eq!(surface.triggers(), vec![TriggerState::Busy, TriggerState::Idle]);
    assert_eq!(surface.errors().len(), 1);
    assert_eq!(surface.errors()[0].1, None);
}

#[tokio::test]
async fn test_relay_rejection_adds_hint() {
    let transport = ScriptedTransport::default()
        .reply("alice", Err(FetchError::RelayRejected { status: 403 }));
    let controller =
        Controller::from_config(&relayed_config(), transport, RecordingSurface::default());

    controller.search("alice").await;

    let surface = controller.into_surface();
    let errors = surface.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].1,
        Some(RemediationHint {
            text: RELAY_HINT_TEXT,
            href: "https://relay.example/corsdemo".to_string(),
        })
    );
}

#[test]
fn test_trigger_busy_while_pending_and_idle_when_dropped() {
    let (transport, _gate) = ScriptedTransport::default().gate("alice");
    let controller = controller(transport);

    let mut search = task::spawn(controller.search("alice"));
    assert_pending!(search.poll());
    assert_eq!(
        controller.surface().lock().unwrap().last_trigger(),
        Some(TriggerState::Busy)
    );

    drop(search);
    assert_eq!(
        controller.surface().lock().unwrap().last_trigger(),
        Some(TriggerState::Idle)
    );
}

#[test]
fn test_gated_search_completes_when_released() {
    let (transport, gate) = ScriptedTransport::default().gate("alice");
    let controller = controller(transport);

    let mut search = task::spawn(controller.search("alice"));
    assert_pending!(search.poll());

    gate.send(ok(user_body(5, &["two-sum"])))
        .expect("search should still be waiting");
    assert!(search.is_woken());
    let outcome = assert_ready!(search.poll());
    assert!(matches!(outcome, SearchOutcome::Rendered));
    drop(search);

    let surface = controller.into_surface();
    assert_eq!(surface.triggers(), vec![TriggerState::Busy, TriggerState::Idle]);
}

#[test]
fn test_stale_search_is_discarded() {
    let (transport, first_gate) = ScriptedTransport::default().gate("alice");
    let (transport, second_gate) = transport.gate("bob");
    let controller = controller(transport);

    let mut first = task::spawn(controller.search("alice"));
    let mut second = task::spawn(controller.search("bob"));
    assert_pending!(first.poll());
    assert_pending!(second.poll());

    second_gate
        .send(ok(user_body(7, &["bob-problem"])))
        .expect("second search should be waiting");
    assert!(matches!(assert_ready!(second.poll()), SearchOutcome::Rendered));

    first_gate
        .send(ok(user_body(3, &["alice-problem"])))
        .expect("first search should be waiting");
    assert!(matches!(assert_ready!(first.poll()), SearchOutcome::Superseded));
    drop(first);
    drop(second);

    let surface = controller.into_surface();
    let lists = surface.recent_lists();
    assert_eq!(lists.len(), 1);
    assert_eq!(
        lists[0][0].href,
        "https://leetcode.com/problems/bob-problem/"
    );
    assert_eq!(
        surface.triggers(),
        vec![TriggerState::Busy, TriggerState::Busy, TriggerState::Idle]
    );
}

#[test]
fn test_cancelled_newer_search_hands_display_back() {
    let (transport, first_gate) = ScriptedTransport::default().gate("alice");
    let (transport, _second_gate) = transport.gate("bob");
    let controller = controller(transport);

    let mut first = task::spawn(controller.search("alice"));
    let mut second = task::spawn(controller.search("bob"));
    assert_pending!(first.poll());
    assert_pending!(second.poll());

    drop(second);
    assert_eq!(
        controller.surface().lock().unwrap().last_trigger(),
        Some(TriggerState::Busy)
    );

    first_gate
        .send(ok(user_body(3, &["alice-problem"])))
        .expect("first search should be waiting");
    assert!(matches!(assert_ready!(first.poll()), SearchOutcome::Rendered));
    drop(first);

    let surface = controller.into_surface();
    let lists = surface.recent_lists();
    assert_eq!(lists.len(), 1);
    assert_eq!(
        lists[0][0].href,
        "https://leetcode.com/problems/alice-problem/"
    );
    assert_eq!(
        surface.triggers(),
        vec![TriggerState::Busy, TriggerState::Busy, TriggerState::Idle]
    );
}
