//! # Module Parameters
//!
//! Process-wide configuration, set at genesis and updatable only by the
//! administrative authority. The challenge window is stored as whole
//! seconds: the block clock has second precision and `chrono::Duration`
//! has no serde representation.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Module-wide limits and the challenge window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Largest accepted proof payload, in bytes.
    pub max_proof_size: u64,
    /// Largest accepted encoded public-input payload, in bytes.
    pub max_public_input_size: u64,
    /// Global cap on recursive aggregation depth.
    pub max_recursion_depth: u32,
    /// Length of the fraud-proof challenge window, in seconds.
    pub challenge_window_secs: u64,
    /// Smallest accepted verification key, in bytes.
    pub min_verification_key_size: u64,
    /// Cap on circuits registered per owner account.
    pub max_circuits_per_owner: u32,
    /// Fee charged per proof submission, in the hosting ledger's notation.
    /// Collection is the hosting ledger's concern; the module only stores
    /// and reports the configured value.
    pub proof_submission_fee: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_proof_size: 1024 * 1024,      // 1 MiB
            max_public_input_size: 64 * 1024, // 64 KiB
            max_recursion_depth: 16,
            challenge_window_secs: 24 * 60 * 60, // 24 hours
            min_verification_key_size: 32,
            max_circuits_per_owner: 100,
            proof_submission_fee: "1000state".to_string(),
        }
    }
}

impl Params {
    /// Validate parameter invariants.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.max_proof_size == 0 {
            return Err(RecordError::InvalidParam {
                name: "max_proof_size",
                reason: "must be positive".to_string(),
            });
        }
        if self.max_recursion_depth == 0 {
            return Err(RecordError::InvalidParam {
                name: "max_recursion_depth",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// The challenge window as a `chrono::Duration`.
    pub fn challenge_window(&self) -> Duration {
        Duration::seconds(self.challenge_window_secs as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn zero_proof_size_rejected() {
        let params = Params {
            max_proof_size: 0,
            ..Params::default()
        };
        assert!(matches!(
            params.validate(),
            Err(RecordError::InvalidParam {
                name: "max_proof_size",
                ..
            })
        ));
    }

    #[test]
    fn zero_recursion_depth_rejected() {
        let params = Params {
            max_recursion_depth: 0,
            ..Params::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn challenge_window_converts_to_duration() {
        let params = Params {
            challenge_window_secs: 90,
            ..Params::default()
        };
        assert_eq!(params.challenge_window(), Duration::seconds(90));
    }

    #[test]
    fn params_json_roundtrip() {
        let params = Params::default();
        let json = serde_json::to_vec(&params).unwrap();
        let back: Params = serde_json::from_slice(&json).unwrap();
        assert_eq!(params, back);
    }
}
