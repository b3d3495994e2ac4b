//! Outer deadline enforcement.
//!
//! # Responsibilities
//! - Bound a whole operation (all attempts and sleeps) by one deadline
//! - Cancel the in-flight future when the deadline fires
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; expiry drops the wrapped future
//! - A budget of 0 seconds means no deadline at all

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Deadline for a whole operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// No outer deadline.
    Unbounded,
    /// The operation must finish within this budget.
    Within(Duration),
}

impl Deadline {
    /// Build a deadline from whole seconds; 0 means unbounded.
    pub fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            Deadline::Unbounded
        } else {
            Deadline::Within(Duration::from_secs(secs))
        }
    }

    /// Run `fut` under this deadline.
    ///
    /// On expiry `fut` is dropped, which cancels whatever it was awaiting.
    pub async fn run<F: Future>(self, fut: F) -> Result<F::Output, DeadlineElapsed> {
        match self {
            Deadline::Unbounded => Ok(fut.await),
            Deadline::Within(budget) => tokio::time::timeout(budget, fut)
                .await
                .map_err(|_| DeadlineElapsed(budget)),
        }
    }
}

/// The outer deadline fired before the operation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline of {} sec elapsed", .0.as_secs_f64())]
pub struct DeadlineElapsed(pub Duration);
