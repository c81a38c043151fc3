//! Custom error types for the common library
//!
//! This module defines the error taxonomy shared by the stats widget:
//! username validation failures, fetch failures and configuration errors.

use thiserror::Error;

/// Username rejected before any network call is made
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Input was empty after trimming
    #[error("Username should not be empty")]
    Empty,

    /// Input does not match the username shape
    #[error("Invalid Username")]
    Invalid,
}

/// Type alias for Result with ValidationError
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Failure while fetching a user's statistics
#[derive(Error, Debug)]
pub enum FetchError {
    /// The network call itself failed
    #[error("Network error: {0}")]
    Transport(String),

    /// The relay refused to forward the request
    #[error("Request was rejected by the relay (status {status})")]
    RelayRejected { status: u16 },

    /// The endpoint answered with a non-success status
    #[error("Unable to fetch user details.")]
    Http { status: u16 },

    /// The response carried no matched user
    #[error("User not found.")]
    NotFound,

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Whether the user should be pointed at the relay's opt-in page
    pub fn needs_relay_hint(&self) -> bool {
        matches!(self, FetchError::RelayRejected { .. })
    }
}

/// Type alias for Result with FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error raised by the configuration sources
    #[error("Configuration error: {0}")]
    Source(#[from] ::config::ConfigError),

    /// A value was present but unusable
    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Type alias for Result with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
