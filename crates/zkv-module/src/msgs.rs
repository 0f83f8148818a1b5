//! # Transaction Messages and Handlers
//!
//! The module's six state-changing entry points. Handlers either complete
//! fully (state written, events emitted) or abort with a [`ModuleError`]
//! and leave no trace. Proof submission is the one entry point with an
//! intermediate shade: an admitted submission always persists a proof and
//! a result, and a `valid = false` result is a success of the transaction,
//! not an abort.
//!
//! The caller identity comes from the [`ExecContext`], never from message
//! fields: a message cannot speak for an account its transaction was not
//! signed by.

use serde::{Deserialize, Serialize};
use zkv_core::{
    sha256_hex, to_hex, Circuit, DataCommitmentRecord, Params, Proof, ProofId,
    ProofSystem, PublicInputField,
};
use zkv_rules::{Condition, RuleType, SymbolicRule};

use crate::context::ExecContext;
use crate::error::ModuleError;
use crate::events::Event;
use crate::keeper::Keeper;
use crate::store::KvStore;

// ── Message types ──

/// Register a new verification circuit. Authority only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterCircuitMsg {
    /// Globally unique circuit name.
    pub name: String,
    /// Verification key bytes.
    pub verification_key: Vec<u8>,
    /// The proof system verifying this circuit.
    pub proof_system: ProofSystem,
    /// Declared public-input shape.
    pub public_input_schema: Vec<PublicInputField>,
    /// Free-form description.
    pub description: String,
    /// Per-circuit recursion cap; zero forbids recursion entirely.
    pub max_recursion_depth: u32,
}

/// Response to [`RegisterCircuitMsg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterCircuitResponse {
    /// The registered name.
    pub circuit_name: String,
    /// Hex digest binding the verification key.
    pub constraint_hash: String,
}

/// Deactivate a circuit. Authority only, one-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeactivateCircuitMsg {
    /// The circuit to deactivate.
    pub circuit_name: String,
}

/// Attach a symbolic rule to a circuit. Authority only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterSymbolicRuleMsg {
    /// The circuit to constrain.
    pub circuit_name: String,
    /// Rule name, unique per circuit.
    pub rule_name: String,
    /// The logical connective.
    pub rule_type: RuleType,
    /// The conditions the connective combines.
    pub conditions: Vec<Condition>,
    /// Free-form description.
    pub description: String,
}

/// Response to [`RegisterSymbolicRuleMsg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterSymbolicRuleResponse {
    /// The registered rule name.
    pub rule_name: String,
}

/// Submit a proof for verification. Open to any account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitProofMsg {
    /// The circuit the proof claims to satisfy.
    pub circuit_name: String,
    /// The proof artifact bytes.
    pub proof_data: Vec<u8>,
    /// Encoded public inputs (JSON `{"fields": …}` wire form).
    pub public_inputs: Vec<u8>,
    /// Optional 32-byte off-chain data commitment; empty when absent.
    pub data_commitment: Vec<u8>,
    /// Optional pointer into a data-availability layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
    /// Sub-proofs to aggregate, if any.
    pub recursive_proofs: Vec<ProofId>,
}

/// Response to [`SubmitProofMsg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitProofResponse {
    /// The assigned dense proof id.
    pub proof_id: ProofId,
    /// The verification verdict.
    pub valid: bool,
    /// Names of the symbolic rules that passed.
    pub constraints_satisfied: Vec<String>,
    /// The rejection reason, when `valid` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Challenge a verification result with a fraud proof. Open to any
/// account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeProofMsg {
    /// The result under challenge.
    pub proof_id: ProofId,
    /// The fraud-proof artifact.
    pub fraud_proof: Vec<u8>,
    /// Free-form challenger statement, recorded in the response only.
    pub reason: String,
}

/// Response to [`ChallengeProofMsg`]. A rejected challenge aborts instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeProofResponse {
    /// The invalidated proof.
    pub proof_id: ProofId,
    /// The challenger's stated reason, echoed back.
    pub reason: String,
}

/// Replace the module parameters. Authority only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateParamsMsg {
    /// The full replacement parameter set.
    pub params: Params,
}

// ── Handlers ──

impl<S: KvStore> Keeper<S> {
    fn require_authority(&self, ctx: &ExecContext) -> Result<(), ModuleError> {
        if self.authority.is_authority(&ctx.caller) {
            Ok(())
        } else {
            Err(ModuleError::Unauthorized {
                caller: ctx.caller.to_string(),
            })
        }
    }

    /// Handle circuit registration.
    pub fn register_circuit(
        &mut self,
        ctx: &ExecContext,
        msg: RegisterCircuitMsg,
    ) -> Result<RegisterCircuitResponse, ModuleError> {
        self.require_authority(ctx)?;
        let params = self.params()?;

        let circuit = Circuit {
            constraint_hash: sha256_hex(&msg.verification_key),
            name: msg.name,
            verification_key: msg.verification_key,
            proof_system: msg.proof_system,
            public_input_schema: msg.public_input_schema,
            owner: ctx.caller.clone(),
            active: true,
            created_at: ctx.block_time,
            description: msg.description,
            max_recursion_depth: msg.max_recursion_depth,
        };
        circuit.validate(params.min_verification_key_size)?;

        if self.has_circuit(&circuit.name) {
            return Err(ModuleError::CircuitAlreadyExists { name: circuit.name });
        }
        if self.circuits_owned_by(&ctx.caller)? >= params.max_circuits_per_owner {
            return Err(ModuleError::CircuitQuotaExceeded {
                owner: ctx.caller.to_string(),
                max: params.max_circuits_per_owner,
            });
        }

        self.write_circuit(&circuit)?;
        self.emit(Event::CircuitRegistered {
            circuit_name: circuit.name.clone(),
            proof_system: circuit.proof_system,
            constraint_hash: circuit.constraint_hash.clone(),
        });
        Ok(RegisterCircuitResponse {
            circuit_name: circuit.name,
            constraint_hash: circuit.constraint_hash,
        })
    }

    /// Handle circuit deactivation.
    pub fn deactivate_circuit(
        &mut self,
        ctx: &ExecContext,
        msg: DeactivateCircuitMsg,
    ) -> Result<(), ModuleError> {
        self.require_authority(ctx)?;
        let mut circuit = self.expect_circuit(&msg.circuit_name)?;
        if !circuit.active {
            return Err(ModuleError::CircuitInactive {
                name: circuit.name,
            });
        }
        circuit.active = false;
        self.write_circuit(&circuit)?;
        self.emit(Event::CircuitDeactivated {
            circuit_name: circuit.name,
        });
        Ok(())
    }

    /// Handle symbolic rule registration.
    pub fn register_symbolic_rule(
        &mut self,
        ctx: &ExecContext,
        msg: RegisterSymbolicRuleMsg,
    ) -> Result<RegisterSymbolicRuleResponse, ModuleError> {
        self.require_authority(ctx)?;

        let rule = SymbolicRule {
            name: msg.rule_name,
            circuit_name: msg.circuit_name,
            rule_type: msg.rule_type,
            conditions: msg.conditions,
            description: msg.description,
            active: true,
            created_at: ctx.block_time,
        };
        rule.validate()?;

        // Rules attach to existing circuits only; the circuit may already
        // be inactive, its rules just stop mattering with it.
        self.expect_circuit(&rule.circuit_name)?;
        if self.has_rule(&rule.circuit_name, &rule.name) {
            return Err(ModuleError::RuleAlreadyExists {
                circuit: rule.circuit_name,
                rule: rule.name,
            });
        }

        self.write_rule(&rule)?;
        self.emit(Event::RuleRegistered {
            circuit_name: rule.circuit_name,
            rule_name: rule.name.clone(),
        });
        Ok(RegisterSymbolicRuleResponse {
            rule_name: rule.name,
        })
    }

    /// Handle proof submission.
    ///
    /// Runs admission, stores the proof under the next dense id, runs the
    /// outcome stage, and stores the result. A commitment-carrying
    /// submission also writes its commitment record; the record is written
    /// whatever the verdict, binding the commitment to its first carrier.
    pub fn submit_proof(
        &mut self,
        ctx: &ExecContext,
        msg: SubmitProofMsg,
    ) -> Result<SubmitProofResponse, ModuleError> {
        let admission = self.admit_proof(
            &msg.circuit_name,
            &msg.proof_data,
            &msg.public_inputs,
            &msg.data_commitment,
            &msg.recursive_proofs,
        )?;

        let id = self.next_proof_id()?;
        let proof = Proof {
            id,
            circuit_name: msg.circuit_name,
            proof_data: msg.proof_data,
            public_inputs: msg.public_inputs,
            data_commitment: msg.data_commitment,
            recursive_proofs: msg.recursive_proofs,
            submitter: ctx.caller.clone(),
            submitted_at: ctx.block_time,
            submitted_height: ctx.height,
        };
        self.write_proof(&proof)?;

        let result = self.run_verification(&admission, &proof)?;
        self.write_result(&result)?;

        if !proof.data_commitment.is_empty() {
            let record = DataCommitmentRecord {
                commitment: proof.data_commitment.clone(),
                data_hash: vec![],
                proof_id: id,
                committed_at: ctx.block_time,
                committed_height: ctx.height,
                data_uri: msg.data_uri,
            };
            self.write_commitment(&record)?;
            self.emit(Event::DataCommitmentRecorded {
                commitment: to_hex(&record.commitment),
                proof_id: id,
            });
        }

        if result.valid {
            self.emit(Event::ProofVerified {
                proof_id: id,
                circuit_name: proof.circuit_name.clone(),
                recursion_depth: result.recursion_depth,
                verification_time_ms: result.verification_time_ms,
            });
            if !proof.recursive_proofs.is_empty() {
                self.emit(Event::RecursiveAggregated {
                    proof_id: id,
                    sub_proofs: proof.recursive_proofs.len(),
                    recursion_depth: result.recursion_depth,
                });
            }
        } else {
            self.emit(Event::ProofRejected {
                proof_id: id,
                circuit_name: proof.circuit_name.clone(),
                error: result.error.clone(),
            });
        }

        Ok(SubmitProofResponse {
            proof_id: id,
            valid: result.valid,
            constraints_satisfied: result.constraints_satisfied,
            error: if result.error.is_empty() {
                None
            } else {
                Some(result.error)
            },
        })
    }

    /// Handle a fraud-proof challenge.
    pub fn challenge_proof(
        &mut self,
        ctx: &ExecContext,
        msg: ChallengeProofMsg,
    ) -> Result<ChallengeProofResponse, ModuleError> {
        if msg.fraud_proof.is_empty() {
            return Err(ModuleError::InvalidChallenge {
                reason: "fraud proof must not be empty".to_string(),
            });
        }
        self.process_challenge(ctx.block_time, msg.proof_id, &msg.fraud_proof)?;
        self.emit(Event::ProofChallenged {
            proof_id: msg.proof_id,
            challenger: ctx.caller.to_string(),
        });
        Ok(ChallengeProofResponse {
            proof_id: msg.proof_id,
            reason: msg.reason,
        })
    }

    /// Handle a parameter update.
    pub fn update_params(
        &mut self,
        ctx: &ExecContext,
        msg: UpdateParamsMsg,
    ) -> Result<(), ModuleError> {
        self.require_authority(ctx)?;
        msg.params.validate()?;
        self.write_params(&msg.params)
    }
}
