//! Rust SDK for the token storage service.
//!
//! Every call goes through [`tokenid::ResilientClient`]: transient network
//! failures are retried with doubling backoff under an optional overall
//! deadline, configurable per client and per call.

pub mod client;

pub use client::{ClientOptions, ErrorBody, SdkError, TokenClient, TokenId};
pub use tokenid::client::RequestOverrides;
