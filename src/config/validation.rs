//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Endpoint must be an absolute http(s) URL
//! - Log level must be a known level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Credentials are not checked; the client accepts any string

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::wallet::client::normalize_endpoint;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("client.endpoint: {0}")]
    Endpoint(String),

    #[error("observability.log_level: unknown level '{0}'")]
    LogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = normalize_endpoint(&config.client.endpoint) {
        errors.push(ValidationError::Endpoint(e.to_string()));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
