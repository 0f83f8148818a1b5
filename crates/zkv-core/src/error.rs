//! # Record Validation Errors
//!
//! Structural validation failures for the records defined in this crate.
//! These are request-abort errors: a record that fails validation is never
//! persisted. Verification *outcomes* (a proof that fails its cryptographic
//! check or a rule) are not errors and live on
//! [`VerificationResult`][crate::VerificationResult] instead.

use thiserror::Error;

/// Validation failure for a circuit, rule, proof, or params record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// Circuit name is empty.
    #[error("circuit name must not be empty")]
    EmptyCircuitName,

    /// Verification key is empty or below the configured minimum size.
    #[error("invalid verification key: {reason}")]
    InvalidVerificationKey {
        /// Why the key was rejected.
        reason: String,
    },

    /// A parameter value is outside its permitted range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParam {
        /// The parameter field name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = RecordError::InvalidVerificationKey {
            reason: "shorter than 32 bytes".to_string(),
        };
        assert!(format!("{err}").contains("32 bytes"));

        let err = RecordError::InvalidParam {
            name: "max_proof_size",
            reason: "must be positive".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("max_proof_size"));
        assert!(msg.contains("must be positive"));
    }
}
