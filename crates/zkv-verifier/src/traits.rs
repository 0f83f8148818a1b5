//! # Verifier Traits
//!
//! The abstract interfaces between the verification pipeline and the
//! proof-system machinery. Implementations must be pure functions of
//! their arguments: no store access, no clock, no randomness — the
//! pipeline runs inside deterministic, replayed transaction execution.

use thiserror::Error;

use zkv_core::{Circuit, Proof};

use crate::policy::BackendClass;

/// Error from a proof or fraud-proof verifier.
///
/// The pipeline records these as verification outcomes (`valid = false`
/// with the verifier's message); they never abort the submitting
/// transaction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerifierError {
    /// The proof failed verification.
    #[error("invalid proof: {0}")]
    InvalidProof(String),

    /// The proof bytes are not a well-formed artifact for this system.
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// The circuit's verification key is unusable.
    #[error("verification key error: {0}")]
    KeyError(String),
}

/// Verifies a submitted proof against a circuit.
///
/// One implementation exists per proof system; the pipeline selects it
/// through [`VerifierRegistry`][crate::VerifierRegistry] from the
/// circuit's declared system.
pub trait ProofVerifier: Send + Sync {
    /// Whether this backend is cryptographically sound or a structural
    /// stand-in. Checked against the deployment's
    /// [`BackendPolicy`][crate::BackendPolicy].
    fn class(&self) -> BackendClass;

    /// Verify `proof_data` against the circuit's verification key and the
    /// encoded public inputs. `Ok(())` means the proof verifies.
    fn verify(
        &self,
        circuit: &Circuit,
        proof_data: &[u8],
        public_inputs: &[u8],
    ) -> Result<(), VerifierError>;
}

/// Verifies a fraud proof submitted against a stored, verified proof.
///
/// `Ok(true)` means the fraud proof demonstrates the original proof was
/// wrongly accepted; the challenge protocol then invalidates the stored
/// result. `Ok(false)` rejects the challenge.
pub trait FraudProofVerifier: Send + Sync {
    /// Whether this checker is cryptographically sound or a structural
    /// stand-in.
    fn class(&self) -> BackendClass;

    /// Evaluate the fraud proof against the original proof and circuit.
    fn verify_fraud(
        &self,
        circuit: &Circuit,
        proof: &Proof,
        fraud_proof: &[u8],
    ) -> Result<bool, VerifierError>;
}
