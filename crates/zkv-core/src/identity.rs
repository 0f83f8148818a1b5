//! # Domain-Primitive Identifiers
//!
//! Newtype wrappers for the module's identifiers. Circuit and rule names
//! are caller-chosen strings and double as store keys, so they stay plain
//! `String`s at the record level; the identifiers that cross subsystem
//! boundaries get distinct types.

use serde::{Deserialize, Serialize};

/// A ledger account address, as assigned by the hosting chain.
///
/// The module never parses or validates address syntax — address formats
/// belong to the hosting ledger. It only compares addresses for equality
/// (authority checks) and records them (circuit owner, proof submitter).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Wrap a raw address string.
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Access the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the address is empty (never valid as a caller).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A dense sequential proof identifier.
///
/// Assigned by the proof store counter, starting at 1, incremented by 1
/// per stored proof with no gaps regardless of verification outcome.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProofId(u64);

impl ProofId {
    /// Wrap a raw id value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The big-endian byte form used in store keys.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl std::fmt::Display for ProofId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProofId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_display_roundtrip() {
        let id = AccountId::new("zkv1authority");
        assert_eq!(id.to_string(), "zkv1authority");
        assert_eq!(id.as_str(), "zkv1authority");
        assert!(!id.is_empty());
    }

    #[test]
    fn empty_account_id_detected() {
        assert!(AccountId::new("").is_empty());
    }

    #[test]
    fn proof_id_big_endian_key_bytes() {
        let id = ProofId::new(0x0102030405060708);
        assert_eq!(
            id.to_be_bytes(),
            [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]
        );
    }

    #[test]
    fn proof_id_serializes_transparently() {
        let json = serde_json::to_string(&ProofId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
