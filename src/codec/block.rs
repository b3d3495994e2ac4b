//! Plaintext block layout.
//!
//! ```text
//! offset  0..4   id, u32 little-endian
//! offset  4..8   tag, HMAC-SHA256(tag_key, id bytes)[..4]
//! offset  8..12  id ^ 0xAAAAAAAA, little-endian
//! offset 12..16  !id, little-endian
//! ```
//!
//! The padding is a function of the id alone, so the block (and therefore
//! the ciphertext) is fully determined by the id.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::codec::types::{CodecError, CodecResult};

/// Keyed MAC used for integrity tags.
pub type TagMac = Hmac<Sha256>;

pub const BLOCK_SIZE: usize = 16;
pub const TAG_LENGTH: usize = 4;

const PADDING_MASK: u32 = 0xAAAA_AAAA;

/// One plaintext cipher block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainBlock([u8; BLOCK_SIZE]);

impl PlainBlock {
    /// Lay out `id` with its tag and padding.
    pub fn seal(id: u32, mac: &TagMac) -> Self {
        let id_bytes = id.to_le_bytes();

        let mut block = [0u8; BLOCK_SIZE];
        block[0..4].copy_from_slice(&id_bytes);
        block[4..8].copy_from_slice(&tag(mac, &id_bytes));
        block[8..12].copy_from_slice(&(id ^ PADDING_MASK).to_le_bytes());
        block[12..16].copy_from_slice(&(!id).to_le_bytes());

        Self(block)
    }

    /// Rebuild a block from decrypted bytes.
    pub fn from_slice(bytes: &[u8]) -> CodecResult<Self> {
        let block: [u8; BLOCK_SIZE] = bytes.try_into().map_err(|_| CodecError::Decode)?;
        Ok(Self(block))
    }

    /// Verify the tag in constant time and return the id.
    pub fn open(&self, mac: &TagMac) -> CodecResult<u32> {
        let mut mac = mac.clone();
        mac.update(&self.0[0..4]);
        mac.verify_truncated_left(&self.0[4..8])
            .map_err(|_| CodecError::Integrity)?;

        Ok(self.id())
    }

    /// The id field, unverified.
    fn id(&self) -> u32 {
        u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    pub fn into_bytes(self) -> [u8; BLOCK_SIZE] {
        self.0
    }
}

fn tag(mac: &TagMac, id_bytes: &[u8; 4]) -> [u8; TAG_LENGTH] {
    let mut mac = mac.clone();
    mac.update(id_bytes);
    let full = mac.finalize().into_bytes();

    let mut tag = [0u8; TAG_LENGTH];
    tag.copy_from_slice(&full[..TAG_LENGTH]);
    tag
}
