//! Controller wiring a search action through validation, fetch and render
//!
//! Every search that passes validation takes a new generation. A result is
//! only rendered when no newer search is still running and no newer search
//! has already settled, so overlapping searches end on the most recent one
//! that actually completes. The trigger stays busy while any search runs.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use common::StatsConfig;
use common::error::{FetchError, ValidationError};
use tracing::{debug, error, info, warn};

use crate::fetcher::{StatsFetcher, StatsTransport};
use crate::presenter::{DisplaySurface, Presenter, RELAY_HINT_TEXT, RemediationHint, TriggerState};
use crate::validation::validate_username;

/// How a search ended
#[derive(Debug)]
pub enum SearchOutcome {
    /// The report was written to the surface
    Rendered,
    /// Input failed validation, no request was sent
    Rejected(ValidationError),
    /// The fetch failed and the error was shown
    Failed(FetchError),
    /// A newer search owns the display
    Superseded,
}

/// Generations of running searches and of the last one that settled
#[derive(Debug, Default)]
struct SearchBook {
    last_started: u64,
    last_settled: u64,
    running: BTreeSet<u64>,
}

impl SearchBook {
    fn start(&mut self) -> u64 {
        self.last_started += 1;
        self.running.insert(self.last_started);
        self.last_started
    }

    /// Mark a search resolved, returning whether it may write to the surface
    fn settle(&mut self, generation: u64) -> bool {
        self.running.remove(&generation);
        let newer_running = self.running.range(generation + 1..).next().is_some();
        if newer_running || generation < self.last_settled {
            return false;
        }
        self.last_settled = generation;
        true
    }

    /// Forget a search, returning whether nothing is running anymore
    fn finish(&mut self, generation: u64) -> bool {
        self.running.remove(&generation);
        self.running.is_empty()
    }
}

/// Search controller owning the display surface
pub struct Controller<T, D> {
    fetcher: StatsFetcher<T>,
    presenter: Presenter,
    surface: Mutex<D>,
    relay_opt_in_url: Option<String>,
    searches: Mutex<SearchBook>,
}

impl<T, D> Controller<T, D>
where
    T: StatsTransport,
    D: DisplaySurface,
{
    /// Create a new controller
    pub fn new(
        fetcher: StatsFetcher<T>,
        presenter: Presenter,
        surface: D,
        relay_opt_in_url: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            presenter,
            surface: Mutex::new(surface),
            relay_opt_in_url,
            searches: Mutex::new(SearchBook::default()),
        }
    }

    /// Create a controller from the widget configuration
    pub fn from_config(config: &StatsConfig, transport: T, surface: D) -> Self {
        Self::new(
            StatsFetcher::new(transport, config.recent_limit),
            Presenter::new(config.problem_base_url()),
            surface,
            config.relay_opt_in_url(),
        )
    }

    /// Get the display surface
    pub fn surface(&self) -> &Mutex<D> {
        &self.surface
    }

    /// Consume the controller, returning the display surface
    pub fn into_surface(self) -> D {
        self.surface
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one search for the raw input, trimmed first
    pub async fn search(&self, raw: &str) -> SearchOutcome {
        let username = match validate_username(raw.trim()) {
            Ok(username) => username,
            Err(e) => {
                warn!("Rejected search input {:?}: {}", raw, e);
                lock(&self.surface).notify(&e.to_string());
                return SearchOutcome::Rejected(e);
            }
        };

        let generation = lock(&self.searches).start();
        debug!("Search {} started for {}", generation, username);

        lock(&self.surface).set_trigger(TriggerState::Busy);
        let _trigger = TriggerGuard {
            surface: &self.surface,
            searches: &self.searches,
            generation,
        };

        let result = self.fetcher.fetch_report(username).await;

        if !lock(&self.searches).settle(generation) {
            info!(
                "Discarding result of search {} for {}, a newer search owns the display",
                generation, username
            );
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(report) => {
                self.presenter.render(&report, &mut *lock(&self.surface));
                info!("Rendered stats for {}", username);
                SearchOutcome::Rendered
            }
            Err(e) => {
                error!("Failed to fetch stats for {}: {}", username, e);
                let hint = self.hint_for(&e);
                lock(&self.surface).show_error(&e.to_string(), hint.as_ref());
                SearchOutcome::Failed(e)
            }
        }
    }

    fn hint_for(&self, error: &FetchError) -> Option<RemediationHint> {
        if !error.needs_relay_hint() {
            return None;
        }

        self.relay_opt_in_url.clone().map(|href| RemediationHint {
            text: RELAY_HINT_TEXT,
            href,
        })
    }
}

/// Puts the trigger back to idle once the last running search ends, however it ends
struct TriggerGuard<'a, D: DisplaySurface> {
    surface: &'a Mutex<D>,
    searches: &'a Mutex<SearchBook>,
    generation: u64,
}

impl<D: DisplaySurface> Drop for TriggerGuard<'_, D> {
    fn drop(&mut self) {
        let idle = lock(self.searches).finish(self.generation);
        if idle {
            lock(self.surface).set_trigger(TriggerState::Idle);
        }
    }
}

fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
