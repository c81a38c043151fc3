//! Coding-practice stats widget
//!
//! Validates a username, fetches the user's solved-problem statistics with
//! one GraphQL request and renders them into a [`DisplaySurface`].
//!
//! ```rust,no_run
//! use common::StatsConfig;
//! use leetstats::{Controller, HttpTransport, TerminalSurface};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StatsConfig::from_env()?;
//!     let transport = HttpTransport::new(&config)?;
//!     let controller = Controller::from_config(&config, transport, TerminalSurface::stdout());
//!     controller.search("alice").await;
//!     Ok(())
//! }
//! ```

pub mod controller;
pub mod fetcher;
pub mod models;
pub mod presenter;
pub mod terminal;
pub mod validation;

pub use controller::{Controller, SearchOutcome};
pub use fetcher::{HttpTransport, RawResponse, StatsFetcher, StatsTransport};
pub use models::{Difficulty, UserReport};
pub use presenter::{DisplaySurface, Presenter, TriggerState};
pub use terminal::TerminalSurface;
pub use validation::{is_valid_username, validate_username};
