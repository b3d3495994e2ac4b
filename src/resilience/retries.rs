//! Retry loop for transient failures.
//!
//! # Responsibilities
//! - Decide whether a failure is worth retrying (transient transport errors only)
//! - Execute attempts strictly one after another, sleeping with doubling backoff
//! - Stop after the attempt limit and report how many attempts were made
//!
//! # Design Decisions
//! - Backoff sleeps are the only suspension points besides the attempt itself,
//!   so an outer deadline can cancel the loop at any point
//! - Non-transient failures end the loop immediately
//! - No sleep after the final attempt

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::resilience::backoff::Backoff;

/// Classifies failures for the retry loop.
pub trait Retryable {
    /// True if another attempt may succeed.
    fn is_transient(&self) -> bool;
}

/// Attempt limit and backoff base for one logical call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles afterwards.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }
}

/// Per-call state of the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Pending,
    Attempting,
    RetryWait,
    Success,
    Failed,
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttemptState::Pending => "pending",
            AttemptState::Attempting => "attempting",
            AttemptState::RetryWait => "retry_wait",
            AttemptState::Success => "success",
            AttemptState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Terminal failure of the retry loop.
#[derive(Debug, PartialEq, Eq)]
pub enum RetryError<E> {
    /// Every permitted attempt failed transiently.
    Exhausted { attempts: u32, last_error: Option<E> },
    /// A non-transient failure; no further attempts were made.
    Fatal(E),
}

/// Run `operation` until it succeeds, fails non-transiently, or the attempt
/// limit is reached.
///
/// `operation` receives the 1-based attempt number.
pub async fn retry_transient<T, E, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + fmt::Display,
{
    let mut attempts = 0u32;
    let mut backoff = Backoff::new(policy.base_delay);
    let mut last_error = None;
    let mut state = AttemptState::Pending;

    while attempts < policy.max_attempts {
        state = transition(state, AttemptState::Attempting, attempts + 1);

        match operation(attempts + 1).await {
            Ok(value) => {
                transition(state, AttemptState::Success, attempts + 1);
                return Ok(value);
            }
            Err(error) if error.is_transient() => {
                attempts += 1;
                if attempts >= policy.max_attempts {
                    last_error = Some(error);
                    break;
                }

                let delay = backoff.next_delay();
                tracing::debug!(
                    attempt = attempts,
                    max_attempts = policy.max_attempts,
                    delay = ?delay,
                    error = %error,
                    "Transient failure, retrying"
                );
                state = transition(state, AttemptState::RetryWait, attempts);
                last_error = Some(error);
                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                transition(state, AttemptState::Failed, attempts + 1);
                return Err(RetryError::Fatal(error));
            }
        }
    }

    transition(state, AttemptState::Failed, attempts);
    Err(RetryError::Exhausted {
        attempts,
        last_error,
    })
}

fn transition(from: AttemptState, to: AttemptState, attempt: u32) -> AttemptState {
    tracing::trace!(from = %from, to = %to, attempt, "Retry state change");
    to
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[derive(Debug, PartialEq, Eq)]
    enum TestError {
        Transient,
        Fatal,
    }

    impl Retryable for TestError {
        fn is_transient(&self) -> bool {
            matches!(self, TestError::Transient)
        }
    }

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let calls = &AtomicU32::new(0);
        let start = Instant::now();

        let result = retry_transient(RetryPolicy::new(3, Duration::from_secs(1)), |_| async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(TestError::Transient)
            } else {
                Ok("ok")
            }
        })
        .await;

        assert_eq!(result, Ok("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1s then 2s of backoff.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3), "{:?}", elapsed);
        assert!(elapsed < Duration::from_secs(4), "{:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_without_final_sleep() {
        let start = Instant::now();

        let result: Result<(), _> =
            retry_transient(RetryPolicy::new(3, Duration::from_secs(1)), |_| async {
                Err(TestError::Transient)
            })
            .await;

        assert_eq!(
            result,
            Err(RetryError::Exhausted {
                attempts: 3,
                last_error: Some(TestError::Transient),
            })
        );
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_fatal_is_not_retried() {
        let calls = &AtomicU32::new(0);

        let result: Result<(), _> =
            retry_transient(RetryPolicy::new(5, Duration::from_secs(1)), |_| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TestError::Fatal)
            })
            .await;

        assert_eq!(result, Err(RetryError::Fatal(TestError::Fatal)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts() {
        let calls = &AtomicU32::new(0);

        let result: Result<(), RetryError<TestError>> =
            retry_transient(RetryPolicy::new(0, Duration::from_secs(1)), |_| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await;

        assert_eq!(
            result,
            Err(RetryError::Exhausted {
                attempts: 0,
                last_error: None,
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_attempt_numbers_are_sequential() {
        let mut seen = Vec::new();

        let _: Result<(), _> = retry_transient(RetryPolicy::new(4, Duration::ZERO), |attempt| {
            seen.push(attempt);
            async { Err(TestError::Transient) }
        })
        .await;

        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(AttemptState::RetryWait.to_string(), "retry_wait");
    }
}
