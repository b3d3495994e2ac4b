//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Configure log level from config, overridable via `RUST_LOG`

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Build the filter: `RUST_LOG` if set, otherwise the configured level for
/// this crate.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("tokenid={}", config.log_level.to_ascii_lowercase()))
    })
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
