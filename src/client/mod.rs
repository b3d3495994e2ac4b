//! Resilient request client.
//!
//! # Data Flow
//! ```text
//! SDK call (request + optional overrides)
//!     → types.rs (overrides fall back to client defaults)
//!     → resilient.rs (outer deadline around the retry loop)
//!     → transport.rs (one attempt over reqwest, or any Transport)
//!     → response, unchanged
//! ```
//!
//! # Design Decisions
//! - The only failure produced by the policy itself is `NoResponse`
//! - Non-transient transport failures pass straight through
//! - No shared mutable state; one client serves any number of concurrent calls

pub mod resilient;
pub mod transport;
pub mod types;

pub use resilient::{Requester, ResilientClient};
pub use transport::{build_http_client, Transport, DEFAULT_ATTEMPT_TIMEOUT};
pub use types::{
    ClientError, ClientResult, NoResponseReason, RequestOverrides, RetrySettings, TransportError,
};
