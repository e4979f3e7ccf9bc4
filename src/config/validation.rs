//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (the gate targets an existing connection)
//! - Validate value ranges (interval > 0, timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::GateConfig;
use crate::util::dedup_preserving_order;

/// A single semantic violation found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate a parsed configuration, collecting every violation.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.connections.is_empty() {
        errors.push(ValidationError(
            "at least one connection is required".to_string(),
        ));
    }

    let names: Vec<&str> = config
        .connections
        .iter()
        .map(|connection| connection.name.as_str())
        .collect();
    if dedup_preserving_order(&names).len() != names.len() {
        errors.push(ValidationError(
            "connection names must be unique".to_string(),
        ));
    }

    for connection in &config.connections {
        if connection.name.is_empty() {
            errors.push(ValidationError(
                "connection name must not be empty".to_string(),
            ));
        }
        if connection.connect_timeout_secs == 0 {
            errors.push(ValidationError(format!(
                "connection '{}': connect_timeout_secs must be greater than zero",
                connection.name
            )));
        }
        match url::Url::parse(&connection.url) {
            Ok(parsed) if matches!(parsed.scheme(), "postgres" | "postgresql") => {}
            Ok(parsed) => errors.push(ValidationError(format!(
                "connection '{}': unsupported URL scheme '{}'",
                connection.name,
                parsed.scheme()
            ))),
            Err(e) => errors.push(ValidationError(format!(
                "connection '{}': invalid URL: {}",
                connection.name, e
            ))),
        }
    }

    if !names.contains(&config.gate.connection.as_str()) {
        errors.push(ValidationError(format!(
            "gate.connection '{}' does not name a configured connection",
            config.gate.connection
        )));
    }

    if config.gate.interval_ms == 0 {
        errors.push(ValidationError(
            "gate.interval_ms must be greater than zero".to_string(),
        ));
    }

    if config.gate.max_attempts == Some(0) {
        errors.push(ValidationError(
            "gate.max_attempts must be greater than zero when set".to_string(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
