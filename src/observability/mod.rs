//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! codec, resilience, client
//!     → tracing events with explicit fields (attempt, delay, error)
//!     → logging.rs (EnvFilter + fmt layer on stderr)
//! ```
//!
//! # Design Decisions
//! - Libraries only emit events; binaries install the subscriber
//! - Call context travels as event fields, never as task-local state
//! - Key material and secrets are never logged

pub mod logging;
