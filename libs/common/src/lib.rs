//! Common library for the leetstats widget
//!
//! This crate provides functionality shared by the widget library and its
//! host binary: the error taxonomy and configuration loading.

pub mod config;
pub mod error;

pub use config::StatsConfig;
pub use error::{ConfigError, FetchError, ValidationError};
