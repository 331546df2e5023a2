//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts > 0, timeouts > 0, pool non-empty)
//! - Check the connection string scheme
//! - Body read plus insert must finish inside the request timeout, so `/log`
//!   only ever answers 200 or 500
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SidecarConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::SidecarConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted key of the offending field, e.g. `database.max_attempts`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &SidecarConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::new("listener.host", "must not be empty"));
    }

    let db = &config.database;
    if !(db.url.starts_with("postgres://") || db.url.starts_with("postgresql://")) {
        errors.push(ValidationError::new(
            "database.url",
            "must be a postgres:// or postgresql:// connection string",
        ));
    }
    if db.max_attempts == 0 {
        errors.push(ValidationError::new("database.max_attempts", "must be at least 1"));
    }
    if db.max_connections == 0 {
        errors.push(ValidationError::new("database.max_connections", "must be at least 1"));
    }
    if db.acquire_timeout_ms == 0 {
        errors.push(ValidationError::new("database.acquire_timeout_ms", "must be greater than 0"));
    }
    if db.query_timeout_ms == 0 {
        errors.push(ValidationError::new("database.query_timeout_ms", "must be greater than 0"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::new("limits.max_body_bytes", "must be greater than 0"));
    }
    if config.limits.body_read_timeout_ms == 0 {
        errors.push(ValidationError::new("limits.body_read_timeout_ms", "must be greater than 0"));
    }

    let capture_budget_ms = config
        .limits
        .body_read_timeout_ms
        .saturating_add(db.query_timeout_ms);
    let request_ms = config.timeouts.request_secs.saturating_mul(1000);
    if config.timeouts.request_secs > 0 && capture_budget_ms >= request_ms {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "must exceed limits.body_read_timeout_ms + database.query_timeout_ms ({}ms)",
                capture_budget_ms
            ),
        ));
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", obs.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
