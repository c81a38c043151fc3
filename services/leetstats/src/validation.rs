//! Username validation

use common::error::{ValidationError, ValidationResult};
use regex::Regex;
use std::sync::OnceLock;

/// Validate a username as given, without trimming
///
/// Whitespace-only input is reported as empty; any other whitespace makes
/// the input invalid. Callers reading from a text field trim first.
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    if username.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_-]{1,15}$").expect("Failed to compile username regex")
    });

    if !regex.is_match(username) {
        return Err(ValidationError::Invalid);
    }

    Ok(username)
}

/// Whether a raw input would pass validation
pub fn is_valid_username(raw: &str) -> bool {
    validate_username(raw).is_ok()
}
