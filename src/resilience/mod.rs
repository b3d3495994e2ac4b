//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Logical call:
//!     → timeouts.rs (outer deadline over the whole call, 0 = none)
//!     → retries.rs (attempt, classify failure, sleep, retry)
//!     → backoff.rs (delay doubles after every failed attempt)
//! ```
//!
//! # Design Decisions
//! - The deadline bounds everything: attempts and backoff sleeps alike
//! - Only transient transport failures are retried
//! - HTTP error statuses are responses, not failures; they are never retried here

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use backoff::{calculate_backoff, Backoff};
pub use retries::{retry_transient, AttemptState, RetryError, RetryPolicy, Retryable};
pub use timeouts::{Deadline, DeadlineElapsed};
