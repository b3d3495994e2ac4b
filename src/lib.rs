//! Opaque identifier codec and resilient request client for the token service.
//!
//! # Architecture Overview
//!
//! ```text
//!   token service                               token SDK
//!   ─────────────                               ─────────
//!   row id ──▶ codec::IdentifierCodec ──▶ token   request ──▶ client::ResilientClient
//!   token  ──▶ codec::IdentifierCodec ──▶ row id                 │
//!                                                                ├─ resilience::timeouts (outer deadline)
//!                                                                ├─ resilience::retries  (transient only)
//!                                                                ├─ resilience::backoff  (doubling delay)
//!                                                                └─ client::Transport    (reqwest)
//!
//!   Cross-cutting: config (TOML + env secret), observability (tracing)
//! ```
//!
//! The codec and the client are independent; neither depends on the other.

pub mod client;
pub mod codec;
pub mod config;
pub mod observability;
pub mod resilience;

pub use client::{ClientError, RequestOverrides, ResilientClient, RetrySettings, Transport};
pub use codec::{CodecError, IdentifierCodec, OpaqueToken};
pub use config::TokenIdConfig;
