//! Client error definitions and retry settings.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::resilience::Retryable;

/// Failures reported by a [`Transport`](crate::client::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The remote end refused or reset the connection.
    #[error("Connection failed: {0}")]
    ConnectionRefused(String),

    /// The connection could not be established in time.
    #[error("Connect timeout: {0}")]
    ConnectTimeout(String),

    /// Connected, but the response did not arrive in time.
    #[error("Read timeout: {0}")]
    ReadTimeout(String),

    /// No pooled connection became available.
    #[error("Connection pool exhausted: {0}")]
    PoolExhausted(String),

    /// Anything else: malformed request, unsupported scheme, body errors.
    #[error("Request error: {0}")]
    Request(String),
}

impl TransportError {
    pub fn is_transient(&self) -> bool {
        !matches!(self, TransportError::Request(_))
    }
}

impl Retryable for TransportError {
    fn is_transient(&self) -> bool {
        TransportError::is_transient(self)
    }
}

/// Why a call ended without a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoResponseReason {
    /// The outer deadline fired first.
    DeadlineElapsed { timeout: Duration },
    /// Every permitted attempt failed transiently.
    AttemptsExhausted { attempts: u32 },
}

impl fmt::Display for NoResponseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoResponseReason::DeadlineElapsed { timeout } => {
                write!(f, "after {} sec", timeout.as_secs_f64())
            }
            NoResponseReason::AttemptsExhausted { attempts } => {
                write!(f, "after {} attempts", attempts)
            }
        }
    }
}

/// Errors returned by [`ResilientClient`](crate::client::ResilientClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response arrived: attempts exhausted or outer deadline elapsed.
    #[error("No response from server for {endpoint} {reason}")]
    NoResponse {
        endpoint: String,
        reason: NoResponseReason,
    },

    /// A non-transient transport failure, returned without retrying.
    #[error(transparent)]
    Request(TransportError),
}

impl ClientError {
    pub fn is_no_response(&self) -> bool {
        matches!(self, ClientError::NoResponse { .. })
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-wide timeout and retry defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    /// Whole-call budget in seconds; 0 disables the outer deadline.
    pub request_timeout_secs: u64,
    /// Maximum number of attempts per call.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_retry_delay: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 5,
            max_attempts: 5,
            base_retry_delay: Duration::from_secs(2),
        }
    }
}

impl RetrySettings {
    /// Apply per-call overrides, keeping defaults for unset fields.
    pub fn with_overrides(&self, overrides: &RequestOverrides) -> Self {
        Self {
            request_timeout_secs: overrides
                .request_timeout_secs
                .unwrap_or(self.request_timeout_secs),
            max_attempts: overrides.max_attempts.unwrap_or(self.max_attempts),
            base_retry_delay: overrides.base_retry_delay.unwrap_or(self.base_retry_delay),
        }
    }
}

/// Per-call overrides of [`RetrySettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOverrides {
    pub request_timeout_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub base_retry_delay: Option<Duration>,
}

impl RequestOverrides {
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn base_retry_delay(mut self, delay: Duration) -> Self {
        self.base_retry_delay = Some(delay);
        self
    }
}
