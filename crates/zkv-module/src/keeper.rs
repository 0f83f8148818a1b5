//! # Keeper: State Access Layer
//!
//! Owns the store handle and the collaborator seams (authority, verifier
//! registry, fraud checker, backend policy, event sink) and exposes typed
//! record accessors over the raw key-value store. Transaction handlers
//! live in `msgs`, the verification pipeline in `pipeline`, the challenge
//! protocol in `challenge`; all of them go through the accessors here.
//!
//! ## Architecture
//!
//! Records are stored as JSON. The hosting ledger sees opaque bytes under
//! the `keys` prefixes and needs no knowledge of the record types.

use serde::de::DeserializeOwned;
use serde::Serialize;
use zkv_core::{
    Circuit, DataCommitmentRecord, Params, Proof, ProofId, VerificationResult,
};
use zkv_rules::SymbolicRule;
use zkv_verifier::{BackendPolicy, FraudProofVerifier, VerifierRegistry};

use crate::context::Authority;
use crate::error::ModuleError;
use crate::events::{Event, EventSink};
use crate::keys;
use crate::store::KvStore;

/// The module's state keeper.
pub struct Keeper<S: KvStore> {
    pub(crate) store: S,
    pub(crate) authority: Box<dyn Authority>,
    pub(crate) verifiers: VerifierRegistry,
    pub(crate) fraud_checker: Box<dyn FraudProofVerifier>,
    pub(crate) policy: BackendPolicy,
    pub(crate) events: Box<dyn EventSink>,
}

impl<S: KvStore> Keeper<S> {
    /// Assemble a keeper from its collaborators.
    pub fn new(
        store: S,
        authority: Box<dyn Authority>,
        verifiers: VerifierRegistry,
        fraud_checker: Box<dyn FraudProofVerifier>,
        policy: BackendPolicy,
        events: Box<dyn EventSink>,
    ) -> Self {
        Self {
            store,
            authority,
            verifiers,
            fraud_checker,
            policy,
            events,
        }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The backend policy in force.
    pub fn policy(&self) -> &BackendPolicy {
        &self.policy
    }

    pub(crate) fn emit(&mut self, event: Event) {
        self.events.emit(event);
    }

    // ── JSON codec over the raw store ──

    fn read_json<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, ModuleError> {
        match self.store.get(key) {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize>(&mut self, key: Vec<u8>, record: &T) -> Result<(), ModuleError> {
        let bytes = serde_json::to_vec(record)?;
        self.store.set(key, bytes);
        Ok(())
    }

    // ── Params ──

    /// Current module parameters; defaults before genesis sets them.
    pub fn params(&self) -> Result<Params, ModuleError> {
        Ok(self.read_json(&keys::PARAMS_KEY)?.unwrap_or_default())
    }

    /// Replace the module parameters. Validation is the caller's duty.
    pub(crate) fn write_params(&mut self, params: &Params) -> Result<(), ModuleError> {
        self.write_json(keys::PARAMS_KEY.to_vec(), params)
    }

    // ── Circuits ──

    /// The circuit registered under `name`, if any.
    pub fn circuit(&self, name: &str) -> Result<Option<Circuit>, ModuleError> {
        self.read_json(&keys::circuit_key(name))
    }

    /// The circuit under `name`, or [`ModuleError::CircuitNotFound`].
    pub fn expect_circuit(&self, name: &str) -> Result<Circuit, ModuleError> {
        self.circuit(name)?.ok_or_else(|| ModuleError::CircuitNotFound {
            name: name.to_string(),
        })
    }

    pub(crate) fn has_circuit(&self, name: &str) -> bool {
        self.store.has(&keys::circuit_key(name))
    }

    pub(crate) fn write_circuit(&mut self, circuit: &Circuit) -> Result<(), ModuleError> {
        self.write_json(keys::circuit_key(&circuit.name), circuit)
    }

    /// Every registered circuit, in name order.
    pub fn all_circuits(&self) -> Result<Vec<Circuit>, ModuleError> {
        self.store
            .prefix_scan(&[keys::CIRCUIT_PREFIX])
            .into_iter()
            .map(|(_, v)| serde_json::from_slice(&v).map_err(ModuleError::from))
            .collect()
    }

    /// Number of circuits owned by `owner`.
    pub(crate) fn circuits_owned_by(&self, owner: &zkv_core::AccountId) -> Result<u32, ModuleError> {
        let mut count = 0u32;
        for circuit in self.all_circuits()? {
            if circuit.owner == *owner {
                count += 1;
            }
        }
        Ok(count)
    }

    // ── Symbolic rules ──

    /// The rule `rule_name` on circuit `circuit_name`, if any.
    pub fn rule(
        &self,
        circuit_name: &str,
        rule_name: &str,
    ) -> Result<Option<SymbolicRule>, ModuleError> {
        self.read_json(&keys::rule_key(circuit_name, rule_name))
    }

    pub(crate) fn has_rule(&self, circuit_name: &str, rule_name: &str) -> bool {
        self.store.has(&keys::rule_key(circuit_name, rule_name))
    }

    pub(crate) fn write_rule(&mut self, rule: &SymbolicRule) -> Result<(), ModuleError> {
        self.write_json(keys::rule_key(&rule.circuit_name, &rule.name), rule)
    }

    /// Every rule attached to `circuit_name`, in rule-name order,
    /// inactive rules included.
    pub fn rules_for_circuit(&self, circuit_name: &str) -> Result<Vec<SymbolicRule>, ModuleError> {
        self.store
            .prefix_scan(&keys::rule_scan_prefix(circuit_name))
            .into_iter()
            .map(|(_, v)| serde_json::from_slice(&v).map_err(ModuleError::from))
            .collect()
    }

    /// Every rule in the store, for genesis export.
    pub(crate) fn all_rules(&self) -> Result<Vec<SymbolicRule>, ModuleError> {
        self.store
            .prefix_scan(&[keys::RULE_PREFIX])
            .into_iter()
            .map(|(_, v)| serde_json::from_slice(&v).map_err(ModuleError::from))
            .collect()
    }

    // ── Proofs ──

    /// Number of proofs stored so far; also the highest assigned id.
    pub fn proof_count(&self) -> Result<u64, ModuleError> {
        Ok(self.read_json(&keys::PROOF_COUNT_KEY)?.unwrap_or(0))
    }

    pub(crate) fn write_proof_count(&mut self, count: u64) -> Result<(), ModuleError> {
        self.write_json(keys::PROOF_COUNT_KEY.to_vec(), &count)
    }

    /// Reserve the next dense proof id.
    pub(crate) fn next_proof_id(&mut self) -> Result<ProofId, ModuleError> {
        let next = self.proof_count()? + 1;
        self.write_proof_count(next)?;
        Ok(ProofId::new(next))
    }

    /// The proof stored under `id`, if any.
    pub fn proof(&self, id: ProofId) -> Result<Option<Proof>, ModuleError> {
        self.read_json(&keys::proof_key(id))
    }

    pub(crate) fn write_proof(&mut self, proof: &Proof) -> Result<(), ModuleError> {
        self.write_json(keys::proof_key(proof.id), proof)
    }

    // ── Verification results ──

    /// The verification result for `id`, if any.
    pub fn result(&self, id: ProofId) -> Result<Option<VerificationResult>, ModuleError> {
        self.read_json(&keys::result_key(id))
    }

    pub(crate) fn write_result(&mut self, result: &VerificationResult) -> Result<(), ModuleError> {
        self.write_json(keys::result_key(result.proof_id), result)
    }

    /// Whether the proof's result currently reads valid.
    pub fn is_proof_valid(&self, id: ProofId) -> Result<bool, ModuleError> {
        Ok(self.result(id)?.map(|r| r.valid).unwrap_or(false))
    }

    // ── Data commitments ──

    /// The commitment record for `commitment`, if any.
    pub fn commitment(
        &self,
        commitment: &[u8],
    ) -> Result<Option<DataCommitmentRecord>, ModuleError> {
        self.read_json(&keys::commitment_key(commitment))
    }

    pub(crate) fn has_commitment(&self, commitment: &[u8]) -> bool {
        self.store.has(&keys::commitment_key(commitment))
    }

    pub(crate) fn write_commitment(
        &mut self,
        record: &DataCommitmentRecord,
    ) -> Result<(), ModuleError> {
        self.write_json(keys::commitment_key(&record.commitment), record)
    }
}

impl Keeper<crate::store::MemStore> {
    /// A development keeper over an in-memory store: the given account as
    /// authority, structural backends under a development policy, fraud
    /// checking by hash binding, events logged through `tracing`.
    pub fn in_memory(authority: zkv_core::AccountId) -> Self {
        Self::new(
            crate::store::MemStore::new(),
            Box::new(crate::context::ConfiguredAuthority::new(authority)),
            VerifierRegistry::with_structural_defaults(),
            Box::new(zkv_verifier::HashBindingFraudChecker),
            BackendPolicy::development(),
            Box::new(crate::events::TracingSink),
        )
    }
}

impl<S: KvStore> std::fmt::Debug for Keeper<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keeper")
            .field("verifiers", &self.verifiers)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
