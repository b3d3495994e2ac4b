//! Key material derivation.
//!
//! # Responsibilities
//! - Enforce the minimum secret length
//! - Derive the AES-256 key with PBKDF2-HMAC-SHA256
//! - Derive the fixed IV from the secret
//!
//! # Security Notes
//! - The secret itself is never stored
//! - Derived material is zeroed on drop and never logged

use std::fmt;

use hmac::Hmac;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec::types::{CodecError, CodecResult};

/// Minimum secret length, in characters.
pub const MIN_SECRET_LENGTH: usize = 16;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 50_000;

pub const KEY_LENGTH: usize = 32;
pub const IV_LENGTH: usize = 16;

/// Length of the HMAC key taken from the front of the AES key.
pub const TAG_KEY_LENGTH: usize = 16;

/// Length of a salt produced by [`derive_salt`].
pub const SALT_LENGTH: usize = 16;

const IV_LABEL: &[u8] = b"uuid_iv_";

/// Derive the legacy salt: the first 16 bytes of SHA-256(secret).
///
/// Reproduces the token service's historical salt so tokens it already
/// issued keep decoding. New deployments may supply their own salt instead.
pub fn derive_salt(secret: &str) -> [u8; SALT_LENGTH] {
    let digest = Sha256::digest(secret.as_bytes());
    let mut salt = [0u8; SALT_LENGTH];
    salt.copy_from_slice(&digest[..SALT_LENGTH]);
    salt
}

/// AES key and IV for one codec instance.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key: [u8; KEY_LENGTH],
    iv: [u8; IV_LENGTH],
}

impl KeyMaterial {
    /// Derive key and IV from a secret and salt.
    ///
    /// Fails with [`CodecError::WeakSecret`] when the secret has fewer than
    /// [`MIN_SECRET_LENGTH`] characters.
    pub fn derive(secret: &str, salt: &[u8]) -> CodecResult<Self> {
        let actual = secret.chars().count();
        if actual < MIN_SECRET_LENGTH {
            return Err(CodecError::WeakSecret {
                min_len: MIN_SECRET_LENGTH,
                actual,
            });
        }

        let mut key = [0u8; KEY_LENGTH];
        pbkdf2::pbkdf2::<Hmac<Sha256>>(secret.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key)
            .map_err(|e| CodecError::KeyDerivation(e.to_string()))?;

        let digest = Sha256::new()
            .chain_update(IV_LABEL)
            .chain_update(secret.as_bytes())
            .finalize();
        let mut iv = [0u8; IV_LENGTH];
        iv.copy_from_slice(&digest[..IV_LENGTH]);

        Ok(Self { key, iv })
    }

    pub fn cipher_key(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }

    /// HMAC key for the integrity tag (first half of the AES key).
    pub fn tag_key(&self) -> &[u8] {
        &self.key[..TAG_KEY_LENGTH]
    }

    pub fn iv(&self) -> &[u8; IV_LENGTH] {
        &self.iv
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key", &"<redacted>")
            .field("iv", &"<redacted>")
            .finish()
    }
}
