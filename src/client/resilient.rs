//! Deadline-bounded, retrying request dispatch.
//!
//! # Responsibilities
//! - Resolve per-call overrides against client-wide defaults
//! - Run the retry loop, optionally under an outer deadline
//! - Map terminal failures to [`ClientError::NoResponse`]
//!
//! # Design Decisions
//! - Responses are returned unchanged whatever their status
//! - Attempts for one call are strictly sequential
//! - The terminal failure is returned, not logged; the caller decides

use std::time::Duration;

use crate::client::transport::Transport;
use crate::client::types::{
    ClientError, ClientResult, NoResponseReason, RequestOverrides, RetrySettings,
};
use crate::resilience::{retry_transient, Deadline, RetryError, RetryPolicy};

/// Request client that retries transient failures under an outer deadline.
#[derive(Debug, Clone)]
pub struct ResilientClient<T> {
    transport: T,
    defaults: RetrySettings,
}

impl<T: Transport> ResilientClient<T> {
    pub fn new(transport: T, defaults: RetrySettings) -> Self {
        Self {
            transport,
            defaults,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn defaults(&self) -> &RetrySettings {
        &self.defaults
    }

    /// Send `request` with explicit limits.
    ///
    /// # Arguments
    /// * `timeout_secs` - budget for the whole call; 0 means no deadline
    /// * `max_attempts` - attempts before giving up
    /// * `base_delay` - delay before the 2nd attempt, doubled afterwards
    pub async fn send(
        &self,
        request: &T::Request,
        timeout_secs: u64,
        max_attempts: u32,
        base_delay: Duration,
    ) -> ClientResult<T::Response> {
        let endpoint = self.transport.endpoint(request);
        let policy = RetryPolicy::new(max_attempts, base_delay);

        let attempts = retry_transient(policy, |_| self.transport.send(request));

        match Deadline::from_secs(timeout_secs).run(attempts).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(RetryError::Fatal(error))) => Err(ClientError::Request(error)),
            Ok(Err(RetryError::Exhausted { attempts, .. })) => Err(ClientError::NoResponse {
                endpoint,
                reason: NoResponseReason::AttemptsExhausted { attempts },
            }),
            Err(elapsed) => Err(ClientError::NoResponse {
                endpoint,
                reason: NoResponseReason::DeadlineElapsed { timeout: elapsed.0 },
            }),
        }
    }

    /// Send `request` with per-call overrides over the client defaults.
    pub async fn request(
        &self,
        request: &T::Request,
        overrides: &RequestOverrides,
    ) -> ClientResult<T::Response> {
        let settings = self.defaults.with_overrides(overrides);
        self.send(
            request,
            settings.request_timeout_secs,
            settings.max_attempts,
            settings.base_retry_delay,
        )
        .await
    }

    /// Bind a set of overrides for repeated use.
    pub fn requester(&self, overrides: RequestOverrides) -> Requester<'_, T> {
        Requester {
            client: self,
            overrides,
        }
    }
}

/// A [`ResilientClient`] with fixed per-call overrides.
#[derive(Debug)]
pub struct Requester<'a, T> {
    client: &'a ResilientClient<T>,
    overrides: RequestOverrides,
}

impl<T: Transport> Requester<'_, T> {
    pub async fn send(&self, request: &T::Request) -> ClientResult<T::Response> {
        self.client.request(request, &self.overrides).await
    }

    /// Effective settings for calls made through this requester.
    pub fn settings(&self) -> RetrySettings {
        self.client.defaults.with_overrides(&self.overrides)
    }
}
