//! Token type and codec error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Externally visible identifier, rendered as a canonical UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpaqueToken(Uuid);

impl OpaqueToken {
    /// Wrap raw ciphertext bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// The 16 ciphertext bytes behind the token.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for OpaqueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for OpaqueToken {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| CodecError::MalformedToken(e.to_string()))
    }
}

impl From<OpaqueToken> for Uuid {
    fn from(token: OpaqueToken) -> Self {
        token.0
    }
}

/// Errors produced by the identifier codec.
///
/// None of these are retryable: a rejected token or id stays rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Master secret shorter than the required minimum.
    #[error("Secret key must be at least {min_len} characters, got {actual}")]
    WeakSecret { min_len: usize, actual: usize },

    /// Key material could not be derived.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Negative identifier passed to a checked entry point.
    #[error("ID must be non-negative, got {0}")]
    InvalidInput(i64),

    /// Identifier above the 32-bit domain.
    #[error("ID {0} out of range (max: {max})", max = u32::MAX)]
    OutOfRange(i64),

    /// Token text is not a well-formed UUID.
    #[error("Invalid token format: {0}")]
    MalformedToken(String),

    /// Well-formed token whose tag does not match: tampered or foreign.
    #[error("Token integrity check failed")]
    Integrity,

    /// Lower-level cipher failure.
    #[error("Token decryption failed")]
    Decode,
}

impl CodecError {
    /// True for errors caused by the caller's id or token rather than by
    /// codec setup.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            CodecError::WeakSecret { .. } | CodecError::KeyDerivation(_)
        )
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
