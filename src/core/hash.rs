//! Commitment Hashing
//!
//! Deterministic SHA-256 hashing for board commitments. The commitment over
//! (params, seed, layout) is disclosed at session creation so the revealed
//! seed can later be checked against the disclosed mine layout. This is a
//! fairness commitment, not a zero-knowledge proof.

use sha2::{Digest, Sha256};

/// Hash output type (256 bits / 32 bytes)
pub type BoardHash = [u8; 32];

/// Deterministic hasher with domain separation.
///
/// Wraps SHA-256 with little-endian helpers for scalar types.
/// Order of updates is critical for determinism.
pub struct CommitmentHasher {
    hasher: Sha256,
}

impl CommitmentHasher {
    /// Create a new hasher with a domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with a length-prefixed string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u32(value.len() as u32);
        self.hasher.update(value.as_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> BoardHash {
        self.hasher.finalize().into()
    }
}

/// Compute a plain hash of arbitrary data.
pub fn hash_bytes(data: &[u8]) -> BoardHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Render a hash as a `0x`-prefixed hex string.
pub fn to_hex_prefixed(hash: &BoardHash) -> String {
    format!("0x{}", hex::encode(hash))
}

// =============================================================================
// TESTS
// =============================================================================
