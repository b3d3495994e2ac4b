//! Identifier codec: row id ↔ opaque token.
//!
//! # Responsibilities
//! - Mint the external token for a freshly stored row id
//! - Recover the row id from a client-supplied token, rejecting foreign,
//!   corrupted or tampered tokens
//! - Never surface cipher-level failures to callers

use std::fmt;

use aes::Aes256;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::Mac;
use uuid::Uuid;

use crate::codec::block::{PlainBlock, TagMac, BLOCK_SIZE};
use crate::codec::keys::{derive_salt, KeyMaterial};
use crate::codec::types::{CodecError, CodecResult, OpaqueToken};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Deterministic, self-certifying id ↔ token codec.
///
/// Immutable after construction; share it behind an `Arc` across tasks.
pub struct IdentifierCodec {
    keys: KeyMaterial,
    tag_mac: TagMac,
}

impl IdentifierCodec {
    /// Build a codec from a master secret and salt.
    ///
    /// # Errors
    /// - [`CodecError::WeakSecret`] if the secret is shorter than 16 characters
    /// - [`CodecError::KeyDerivation`] if key material cannot be derived
    pub fn new(secret: &str, salt: &[u8]) -> CodecResult<Self> {
        let keys = KeyMaterial::derive(secret, salt)?;
        let tag_mac = <TagMac as Mac>::new_from_slice(keys.tag_key())
            .map_err(|e| CodecError::KeyDerivation(e.to_string()))?;

        tracing::debug!("IdentifierCodec initialized with key and IV derived from secret");

        Ok(Self { keys, tag_mac })
    }

    /// Build a codec using the salt derived from the secret itself.
    pub fn from_secret(secret: &str) -> CodecResult<Self> {
        let salt = derive_salt(secret);
        Self::new(secret, &salt)
    }

    /// Encode a row id as an opaque token.
    pub fn encode(&self, id: u32) -> OpaqueToken {
        let mut block = PlainBlock::seal(id, &self.tag_mac).into_bytes();

        let mut cipher = self.encryptor();
        cipher.encrypt_block_mut(GenericArray::from_mut_slice(&mut block));

        OpaqueToken::from_bytes(block)
    }

    /// Encode an id arriving as a wider signed integer.
    ///
    /// # Errors
    /// - [`CodecError::InvalidInput`] for negative ids
    /// - [`CodecError::OutOfRange`] for ids above `u32::MAX`
    pub fn encode_checked(&self, id: i64) -> CodecResult<OpaqueToken> {
        if id < 0 {
            return Err(CodecError::InvalidInput(id));
        }
        let id = u32::try_from(id).map_err(|_| CodecError::OutOfRange(id))?;
        Ok(self.encode(id))
    }

    /// Recover the row id from token text.
    ///
    /// # Errors
    /// - [`CodecError::MalformedToken`] if the text is not a UUID
    /// - [`CodecError::Integrity`] if the token was not minted with this key
    /// - [`CodecError::Decode`] on any cipher-level failure
    pub fn decode(&self, token: &str) -> CodecResult<u32> {
        let uuid = Uuid::parse_str(token)
            .map_err(|e| CodecError::MalformedToken(e.to_string()))?;

        self.decode_bytes(*uuid.as_bytes()).inspect_err(|e| {
            tracing::debug!(token = %token, error = %e, "Rejected token");
        })
    }

    /// Recover the row id from an already parsed token.
    pub fn decode_token(&self, token: &OpaqueToken) -> CodecResult<u32> {
        self.decode_bytes(*token.as_bytes())
    }

    /// True if `token` decodes and re-encodes to exactly the same text.
    ///
    /// Non-canonical spellings (uppercase, braces, no hyphens) decode but do
    /// not validate.
    pub fn validate(&self, token: &str) -> bool {
        match self.decode(token) {
            Ok(id) => self.encode(id).to_string() == token,
            Err(_) => false,
        }
    }

    fn decode_bytes(&self, mut ciphertext: [u8; BLOCK_SIZE]) -> CodecResult<u32> {
        let plaintext = self
            .decryptor()
            .decrypt_padded_mut::<NoPadding>(&mut ciphertext)
            .map_err(|_| CodecError::Decode)?;

        PlainBlock::from_slice(plaintext)?.open(&self.tag_mac)
    }

    fn encryptor(&self) -> Aes256CbcEnc {
        Aes256CbcEnc::new(
            GenericArray::from_slice(self.keys.cipher_key()),
            GenericArray::from_slice(self.keys.iv()),
        )
    }

    fn decryptor(&self) -> Aes256CbcDec {
        Aes256CbcDec::new(
            GenericArray::from_slice(self.keys.cipher_key()),
            GenericArray::from_slice(self.keys.iv()),
        )
    }
}

impl fmt::Debug for IdentifierCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierCodec")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}
