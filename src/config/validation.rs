//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts > 0, delays finite and non-negative,
//!   attempt timeout positive)
//! - Enforce https for the token service unless debug is set
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TokenIdConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::{ClientConfig, CodecConfig, ObservabilityConfig, TokenIdConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &TokenIdConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_codec(&config.codec, &mut errors);
    validate_client(&config.client, &mut errors);
    validate_observability(&config.observability, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_codec(codec: &CodecConfig, errors: &mut Vec<ValidationError>) {
    if codec.secret_env.trim().is_empty() {
        errors.push(ValidationError::new("codec.secret_env", "must not be empty"));
    }
    if let Err(e) = codec.salt_bytes() {
        errors.push(ValidationError::new("codec.salt_hex", format!("invalid hex: {}", e)));
    }
}

fn validate_client(client: &ClientConfig, errors: &mut Vec<ValidationError>) {
    match Url::parse(&client.base_url) {
        Ok(url) => match url.scheme() {
            "https" => {}
            "http" if client.debug => {}
            "http" => errors.push(ValidationError::new(
                "client.base_url",
                "plain http is only allowed with debug = true",
            )),
            other => errors.push(ValidationError::new(
                "client.base_url",
                format!("unsupported scheme '{}'", other),
            )),
        },
        Err(e) => errors.push(ValidationError::new(
            "client.base_url",
            format!("invalid URL '{}': {}", client.base_url, e),
        )),
    }

    if client.api_version.trim().is_empty() {
        errors.push(ValidationError::new("client.api_version", "must not be empty"));
    }

    if client.max_attempts == 0 {
        errors.push(ValidationError::new("client.max_attempts", "must be at least 1"));
    }

    let delay = client.base_retry_delay_secs;
    if !delay.is_finite() || delay < 0.0 {
        errors.push(ValidationError::new(
            "client.base_retry_delay_secs",
            format!("must be a non-negative number, got {}", delay),
        ));
    }

    let attempt_timeout = client.attempt_timeout_secs;
    if !attempt_timeout.is_finite() || attempt_timeout <= 0.0 {
        errors.push(ValidationError::new(
            "client.attempt_timeout_secs",
            format!("must be a positive number, got {}", attempt_timeout),
        ));
    }
}

fn validate_observability(observability: &ObservabilityConfig, errors: &mut Vec<ValidationError>) {
    let level = observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", observability.log_level),
        ));
    }
}
