//! # Hash-Binding Fraud-Proof Checker (Placeholder)
//!
//! Stands in for a real fraud-proof protocol. A genuine checker would
//! demonstrate one of: the original proof does not verify, the public
//! inputs were malformed, or a symbolic rule was actually violated — with
//! a cryptographic witness. This placeholder recomputes a hash binding
//! between the fraud proof, the original proof, and the verification key,
//! and accepts only when the binding lands in a narrow target space.
//!
//! The [`FraudProofVerifier`] trait is the substitution point for the
//! real protocol; tests use accepting/rejecting doubles instead of this
//! type.

use zkv_core::{sha256_raw, Circuit, Proof, Sha256Accumulator};

use crate::policy::BackendClass;
use crate::traits::{FraudProofVerifier, VerifierError};

/// Smallest fraud proof that can carry a counter-witness digest.
const MIN_FRAUD_PROOF_BYTES: usize = 32;

/// Placeholder fraud-proof checker based on hash binding.
#[derive(Debug, Default)]
pub struct HashBindingFraudChecker;

impl FraudProofVerifier for HashBindingFraudChecker {
    fn class(&self) -> BackendClass {
        BackendClass::Structural
    }

    fn verify_fraud(
        &self,
        circuit: &Circuit,
        proof: &Proof,
        fraud_proof: &[u8],
    ) -> Result<bool, VerifierError> {
        if fraud_proof.len() < MIN_FRAUD_PROOF_BYTES {
            return Err(VerifierError::MalformedProof(format!(
                "fraud proof is {} bytes, expected at least {MIN_FRAUD_PROOF_BYTES}",
                fraud_proof.len()
            )));
        }

        let mut acc = Sha256Accumulator::new();
        acc.update(&sha256_raw(fraud_proof))
            .update(&sha256_raw(&proof.proof_data))
            .update(&circuit.verification_key);
        let binding = acc.finalize();

        // Acceptance condition of the stand-in: the binding's leading two
        // bytes are zero. A real protocol replaces this with verification
        // of the counter-witness.
        Ok(binding[0] == 0 && binding[1] == 0)
    }
}
