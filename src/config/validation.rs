//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value shapes (cookie name usable in a Set-Cookie line)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::RouterConfig;
use thiserror::Error;

/// A semantic configuration problem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("session.cookie_name must not be empty")]
    EmptyCookieName,

    #[error("session.cookie_name contains forbidden character {0:?}")]
    InvalidCookieName(char),
}

/// Check a deserialized config for semantic problems.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let cookie_name = &config.session.cookie_name;
    if cookie_name.is_empty() {
        errors.push(ValidationError::EmptyCookieName);
    }
    if let Some(bad) = cookie_name
        .chars()
        .find(|c| matches!(c, ';' | '=' | ',') || c.is_whitespace() || c.is_control())
    {
        errors.push(ValidationError::InvalidCookieName(bad));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
