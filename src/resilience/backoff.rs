//! Exponential backoff.
//!
//! Pure doubling from a base delay: no jitter, no cap. Callers bound the
//! total wait through the attempt count or an outer deadline.

use std::time::Duration;

/// Delay to wait after the `attempt`-th consecutive failure.
///
/// `attempt` is 1-based; attempt 0 has no delay.
pub fn calculate_backoff(attempt: u32, base: Duration) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let factor = 2u32.saturating_pow(attempt - 1);
    base.saturating_mul(factor)
}

/// Stateful doubling delay sequence for one logical call.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    failures: u32,
}

impl Backoff {
    pub fn new(base: Duration) -> Self {
        Self { base, failures: 0 }
    }

    /// Record one more failure and return the delay to wait after it.
    pub fn next_delay(&mut self) -> Duration {
        self.failures = self.failures.saturating_add(1);
        calculate_backoff(self.failures, self.base)
    }
}
