//! # Challenge Protocol
//!
//! Optimistic fraud proofs: any account may challenge a verification
//! result inside its challenge window by presenting a fraud proof. An
//! accepted challenge is the only mutation a result ever sees after it is
//! written: `challenged` flips to true, `valid` to false, permanently.
//!
//! ## Security Invariant
//!
//! A result is final only once `valid` holds, no challenge succeeded, and
//! the window has closed. Downstream consumers acting on a result inside
//! its window accept reorg-equivalent risk.

use zkv_core::ProofId;

use crate::error::ModuleError;
use crate::keeper::Keeper;
use crate::store::KvStore;

/// Message a result reads after a successful challenge.
const INVALIDATED_BY_CHALLENGE: &str = "invalidated by accepted fraud proof";

impl<S: KvStore> Keeper<S> {
    /// Adjudicate a fraud proof against a stored result.
    ///
    /// Returns `Ok(())` when the challenge is accepted and the result has
    /// been overturned. Every rejection path is an abort: a rejected
    /// challenge leaves no trace in state.
    pub(crate) fn process_challenge(
        &mut self,
        now: chrono::DateTime<chrono::Utc>,
        proof_id: ProofId,
        fraud_proof: &[u8],
    ) -> Result<(), ModuleError> {
        let mut result = self
            .result(proof_id)?
            .ok_or(ModuleError::ProofNotFound { id: proof_id })?;
        if result.challenged {
            return Err(ModuleError::ProofAlreadyChallenged { id: proof_id });
        }
        if now > result.challenge_deadline {
            return Err(ModuleError::ChallengeWindowExpired {
                id: proof_id,
                deadline: result.challenge_deadline.to_rfc3339(),
            });
        }
        if !result.valid {
            return Err(ModuleError::InvalidChallenge {
                reason: "result is already invalid".to_string(),
            });
        }

        let proof = self
            .proof(proof_id)?
            .ok_or(ModuleError::ProofNotFound { id: proof_id })?;
        let circuit = self.expect_circuit(&proof.circuit_name)?;

        let fraudulent = self
            .fraud_checker
            .verify_fraud(&circuit, &proof, fraud_proof)
            .map_err(|err| ModuleError::InvalidChallenge {
                reason: err.to_string(),
            })?;
        if !fraudulent {
            return Err(ModuleError::InvalidChallenge {
                reason: "fraud proof does not demonstrate invalidity".to_string(),
            });
        }

        result.challenged = true;
        result.valid = false;
        result.error = INVALIDATED_BY_CHALLENGE.to_string();
        self.write_result(&result)
    }
}
