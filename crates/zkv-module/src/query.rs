//! # Read-Only Queries
//!
//! The query surface mirrors the store: every record type is reachable,
//! nothing is mutated, no events are emitted. Queries that take a clock
//! take it explicitly; query handlers have no ambient time.

use chrono::{DateTime, Utc};
use zkv_core::{Circuit, DataCommitmentRecord, Params, Proof, ProofId, VerificationResult};
use zkv_rules::SymbolicRule;

use crate::error::ModuleError;
use crate::keeper::Keeper;
use crate::store::KvStore;

impl<S: KvStore> Keeper<S> {
    /// The circuit under `name`, or [`ModuleError::CircuitNotFound`].
    pub fn query_circuit(&self, name: &str) -> Result<Circuit, ModuleError> {
        self.expect_circuit(name)
    }

    /// Registered circuits in name order, optionally restricted to the
    /// ones still accepting proofs.
    pub fn query_circuits(&self, active_only: bool) -> Result<Vec<Circuit>, ModuleError> {
        let mut circuits = self.all_circuits()?;
        if active_only {
            circuits.retain(|c| c.active);
        }
        Ok(circuits)
    }

    /// The active rules attached to `circuit_name`, in rule-name order.
    /// The circuit must exist. Inactive rules do not participate in
    /// evaluation and are not reported here; genesis export still carries
    /// them.
    pub fn query_symbolic_rules(
        &self,
        circuit_name: &str,
    ) -> Result<Vec<SymbolicRule>, ModuleError> {
        self.expect_circuit(circuit_name)?;
        let mut rules = self.rules_for_circuit(circuit_name)?;
        rules.retain(|r| r.active);
        Ok(rules)
    }

    /// The proof under `id`, or [`ModuleError::ProofNotFound`].
    pub fn query_proof(&self, id: ProofId) -> Result<Proof, ModuleError> {
        self.proof(id)?.ok_or(ModuleError::ProofNotFound { id })
    }

    /// The verification result for `id`, or [`ModuleError::ProofNotFound`].
    pub fn query_verification_result(
        &self,
        id: ProofId,
    ) -> Result<VerificationResult, ModuleError> {
        self.result(id)?.ok_or(ModuleError::ProofNotFound { id })
    }

    /// The commitment record for `commitment`, if any.
    pub fn query_data_commitment(
        &self,
        commitment: &[u8],
    ) -> Result<Option<DataCommitmentRecord>, ModuleError> {
        self.commitment(commitment)
    }

    /// Whether the result for `id` is final at `now`: valid, never
    /// successfully challenged, and past its challenge deadline.
    pub fn query_finalized(&self, id: ProofId, now: DateTime<Utc>) -> Result<bool, ModuleError> {
        let result = self.query_verification_result(id)?;
        Ok(result.finalized_at(now))
    }

    /// The current module parameters.
    pub fn query_params(&self) -> Result<Params, ModuleError> {
        self.params()
    }
}
