//! # SHA-256 Digest Helpers
//!
//! Thin wrappers over `sha2` used for constraint hashes, proof reference
//! hashes, and data-commitment binding. All hex output is lowercase.

use sha2::{Digest, Sha256};

/// Compute the raw SHA-256 digest of a byte slice.
pub fn sha256_raw(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the SHA-256 digest of a byte slice as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    to_hex(&sha256_raw(data))
}

/// Render bytes as a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Incremental SHA-256 over multiple parts.
///
/// Used where a digest covers several fields of a record (e.g. the proof
/// reference hash over circuit name, proof data, public inputs, and data
/// commitment).
#[derive(Debug, Default)]
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Start a fresh accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb a part into the digest.
    pub fn update(&mut self, part: &[u8]) -> &mut Self {
        self.hasher.update(part);
        self
    }

    /// Finalize and return the raw digest.
    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }

    /// Finalize and return the digest as lowercase hex.
    pub fn finalize_hex(self) -> String {
        to_hex(&self.finalize())
    }
}
