//! Opaque identifier codec.
//!
//! # Data Flow
//! ```text
//! encode:
//!     u32 row id
//!     → block.rs (id ∥ tag ∥ padding, 16 bytes)
//!     → identifier.rs (AES-256-CBC, fixed IV, one block)
//!     → OpaqueToken (UUID text)
//!
//! decode:
//!     token text
//!     → identifier.rs (parse UUID, decrypt one block)
//!     → block.rs (constant-time tag check)
//!     → u32 row id
//! ```
//!
//! # Design Decisions
//! - Key and IV are derived once at construction (keys.rs) and never change
//! - Encoding is deterministic: one row always maps to one token
//! - The 16-byte block layout is a wire contract shared with every other
//!   implementation minting these tokens
//! - Single block only; the fixed IV is not safe for longer plaintexts

pub mod block;
pub mod identifier;
pub mod keys;
pub mod types;

pub use identifier::IdentifierCodec;
pub use keys::derive_salt;
pub use types::{CodecError, CodecResult, OpaqueToken};
