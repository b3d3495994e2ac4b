//! Transport seam.
//!
//! The resilient client never opens connections itself; it drives a
//! [`Transport`] and relies on the transport to release connection resources
//! when an in-flight future is dropped.

use std::future::Future;
use std::time::Duration;

use crate::client::types::TransportError;

/// A single-shot request executor.
pub trait Transport: Send + Sync {
    type Request;
    type Response;

    /// Send `request` once. The same request may be sent again on retry.
    fn send(
        &self,
        request: &Self::Request,
    ) -> impl Future<Output = Result<Self::Response, TransportError>> + Send;

    /// Endpoint description used in error reports.
    fn endpoint(&self, request: &Self::Request) -> String;
}

impl Transport for reqwest::Client {
    type Request = reqwest::Request;
    type Response = reqwest::Response;

    fn send(
        &self,
        request: &reqwest::Request,
    ) -> impl Future<Output = Result<reqwest::Response, TransportError>> + Send {
        let pending = request.try_clone().map(|request| self.execute(request));

        async move {
            match pending {
                Some(pending) => pending.await.map_err(TransportError::from),
                None => Err(TransportError::Request(
                    "request body cannot be replayed".to_string(),
                )),
            }
        }
    }

    fn endpoint(&self, request: &reqwest::Request) -> String {
        request.url().to_string()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        let message = e.to_string();
        if e.is_connect() && e.is_timeout() {
            TransportError::ConnectTimeout(message)
        } else if e.is_connect() {
            TransportError::ConnectionRefused(message)
        } else if e.is_timeout() {
            TransportError::ReadTimeout(message)
        } else {
            TransportError::Request(message)
        }
    }
}

/// Per-attempt connect and response budget of the default transport.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the reqwest client used as the default transport.
///
/// `attempt_timeout` bounds both connecting and each whole attempt, so a
/// stalled server surfaces as a transient `ConnectTimeout` or `ReadTimeout`
/// and the retry loop moves on.
pub fn build_http_client(
    user_agent: &str,
    attempt_timeout: Duration,
) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .connect_timeout(attempt_timeout)
        .timeout(attempt_timeout)
        .build()
        .map_err(|e| TransportError::Request(e.to_string()))
}
