//! Configuration validation

use crate::{AppConfig, ConfigError, Result};

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the entire application configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    // Validate logging config
    if let Err(e) = validate_log_level(&config.logging.level) {
        errors.push(e);
    }

    // Validate record service config
    if config.record_api.base_url.is_empty() {
        errors.push(ValidationError::new(
            "record_api.base_url",
            "base URL is required",
        ));
    } else if let Err(e) = validate_url(&config.record_api.base_url) {
        errors.push(ValidationError::new("record_api.base_url", e));
    }

    if config.record_api.timeout_ms == 0 {
        errors.push(ValidationError::new(
            "record_api.timeout_ms",
            "must be greater than 0",
        ));
    }

    // Validate trading network config
    if config.steam.app_id == 0 {
        errors.push(ValidationError::new(
            "steam.app_id",
            "app id must be greater than 0",
        ));
    }

    if config.steam.context_id == 0 {
        errors.push(ValidationError::new(
            "steam.context_id",
            "context id must be greater than 0",
        ));
    }

    // The network never holds items longer than 15 days, so anything
    // above that cannot be a real policy.
    if config.escrow.max_accepted_days > 15 {
        errors.push(ValidationError::new(
            "escrow.max_accepted_days",
            "must be <= 15 days",
        ));
    }

    // Validate intake config
    if config.intake.job_queue_capacity == 0 {
        errors.push(ValidationError::new(
            "intake.job_queue_capacity",
            "must be greater than 0",
        ));
    }

    if config.intake.event_queue_capacity == 0 {
        errors.push(ValidationError::new(
            "intake.event_queue_capacity",
            "must be greater than 0",
        ));
    }

    // Return all errors if any were found
    if !errors.is_empty() {
        let error_msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ConfigError::ValidationError(error_msg));
    }

    Ok(())
}

/// Validate a URL
pub fn validate_url(url: &str) -> std::result::Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    // Basic URL validation - check for scheme
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    Ok(())
}

/// Validate log level
fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new(
            "logging.level",
            format!(
                "invalid log level '{level}', must be one of: trace, debug, info, warn, error"
            ),
        )),
    }
}
