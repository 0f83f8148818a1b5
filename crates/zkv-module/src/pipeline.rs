//! # Verification Pipeline
//!
//! Proof submission runs in two stages with different failure channels.
//!
//! **Admission** checks everything about the request itself: the circuit
//! exists and is active, payload bounds hold, referenced sub-proofs exist
//! and are valid, the data commitment is fresh, and a policy-acceptable
//! backend is registered. Any admission failure aborts the transaction;
//! nothing is written.
//!
//! **Outcome** runs once a submission is admitted: backend verification,
//! public-input decoding, schema validation, symbolic rules, and the
//! commitment binding. Outcome failures are not aborts; they persist as a
//! `VerificationResult` with `valid = false` and the failure reason, so a
//! rejected proof is as auditable as an accepted one.

use zkv_core::{
    to_hex, Circuit, FieldType, InputValue, Params, Proof, ProofId, PublicInputField,
    PublicInputs, VerificationResult,
};
use zkv_rules::check_rules;

use crate::error::ModuleError;
use crate::keeper::Keeper;
use crate::store::KvStore;

/// Facts established at admission, carried into the outcome stage.
#[derive(Debug)]
pub(crate) struct Admission {
    pub(crate) circuit: Circuit,
    pub(crate) params: Params,
    pub(crate) recursion_depth: u32,
}

impl<S: KvStore> Keeper<S> {
    /// Run the admission stage. No state is written here.
    pub(crate) fn admit_proof(
        &self,
        circuit_name: &str,
        proof_data: &[u8],
        public_inputs: &[u8],
        data_commitment: &[u8],
        recursive_proofs: &[ProofId],
    ) -> Result<Admission, ModuleError> {
        let params = self.params()?;
        let circuit = self.expect_circuit(circuit_name)?;
        if !circuit.active {
            return Err(ModuleError::CircuitInactive {
                name: circuit.name.clone(),
            });
        }

        if proof_data.is_empty() {
            return Err(ModuleError::InvalidProof {
                reason: "proof data must not be empty".to_string(),
            });
        }
        if proof_data.len() as u64 > params.max_proof_size {
            return Err(ModuleError::InvalidProof {
                reason: format!(
                    "proof is {} bytes, limit is {}",
                    proof_data.len(),
                    params.max_proof_size
                ),
            });
        }
        if public_inputs.len() as u64 > params.max_public_input_size {
            return Err(ModuleError::InvalidPublicInputs {
                reason: format!(
                    "public inputs are {} bytes, limit is {}",
                    public_inputs.len(),
                    params.max_public_input_size
                ),
            });
        }

        if !data_commitment.is_empty() && self.has_commitment(data_commitment) {
            return Err(ModuleError::DataCommitmentExists {
                commitment: to_hex(data_commitment),
            });
        }

        let recursion_depth = self.admitted_depth(&circuit, &params, recursive_proofs)?;

        let backend = self
            .verifiers
            .get(circuit.proof_system)
            .ok_or_else(|| ModuleError::UnsupportedProofSystem {
                system: circuit.proof_system.to_string(),
            })?;
        self.policy.validate(backend.class())?;

        Ok(Admission {
            circuit,
            params,
            recursion_depth,
        })
    }

    /// Depth the submission reaches, checked against the effective bound.
    ///
    /// Every referenced sub-proof must exist and currently read valid. The
    /// effective bound is the stricter of the global and per-circuit caps,
    /// so a circuit with a cap of zero admits no recursion at all.
    fn admitted_depth(
        &self,
        circuit: &Circuit,
        params: &Params,
        recursive_proofs: &[ProofId],
    ) -> Result<u32, ModuleError> {
        if recursive_proofs.is_empty() {
            return Ok(0);
        }
        let mut max_sub_depth = 0u32;
        for &sub_id in recursive_proofs {
            let result = self
                .result(sub_id)?
                .ok_or(ModuleError::RecursiveProofNotFound { id: sub_id })?;
            if !result.valid {
                return Err(ModuleError::RecursiveProofInvalid { id: sub_id });
            }
            max_sub_depth = max_sub_depth.max(result.recursion_depth);
        }
        let depth = max_sub_depth + 1;
        let bound = params.max_recursion_depth.min(circuit.max_recursion_depth);
        if depth > bound {
            return Err(ModuleError::MaxRecursionDepthExceeded { depth, max: bound });
        }
        Ok(depth)
    }

    /// Run the outcome stage over an admitted, stored proof.
    ///
    /// Always produces a result; failures land in `valid`/`error`, never
    /// in the return channel.
    pub(crate) fn run_verification(
        &self,
        admission: &Admission,
        proof: &Proof,
    ) -> Result<VerificationResult, ModuleError> {
        let started = std::time::Instant::now();
        let mut result = VerificationResult {
            proof_id: proof.id,
            circuit_name: proof.circuit_name.clone(),
            valid: false,
            verified_at_height: proof.submitted_height,
            verified_at: proof.submitted_at,
            data_commitment: proof.data_commitment.clone(),
            constraints_satisfied: vec![],
            error: String::new(),
            verification_time_ms: 0,
            recursion_depth: admission.recursion_depth,
            challenged: false,
            challenge_deadline: proof.submitted_at + admission.params.challenge_window(),
        };

        result.error = self.outcome_error(admission, proof, &mut result.constraints_satisfied)?;
        result.valid = result.error.is_empty();
        result.verification_time_ms = started.elapsed().as_millis() as u64;
        Ok(result)
    }

    /// The first outcome failure, or an empty string when the proof is
    /// valid. Rule names that passed accumulate into `satisfied`.
    fn outcome_error(
        &self,
        admission: &Admission,
        proof: &Proof,
        satisfied: &mut Vec<String>,
    ) -> Result<String, ModuleError> {
        let circuit = &admission.circuit;

        // Admission resolved this backend already; the registry cannot
        // change between the stages of one submission.
        let backend = self
            .verifiers
            .get(circuit.proof_system)
            .ok_or_else(|| ModuleError::UnsupportedProofSystem {
                system: circuit.proof_system.to_string(),
            })?;
        if let Err(err) = backend.verify(circuit, &proof.proof_data, &proof.public_inputs) {
            return Ok(format!("{} proof verification failed: {err}", circuit.proof_system));
        }

        let inputs = match PublicInputs::decode(&proof.public_inputs) {
            Ok(inputs) => inputs,
            Err(err) => return Ok(format!("malformed public inputs: {err}")),
        };
        if let Err(reason) = validate_schema(&circuit.public_input_schema, &inputs) {
            return Ok(format!("public input schema violation: {reason}"));
        }

        let rules = self.rules_for_circuit(&circuit.name)?;
        let check = check_rules(&rules, &inputs);
        *satisfied = check.satisfied;
        if let Some(violation) = check.violation {
            return Ok(format!("symbolic rule violation: {violation}"));
        }

        if !proof.data_commitment.is_empty() {
            if let Err(reason) = verify_commitment(&proof.data_commitment, &inputs) {
                return Ok(format!("data commitment verification failed: {reason}"));
            }
        }

        Ok(String::new())
    }
}

/// Check decoded public inputs against the circuit's declared schema.
fn validate_schema(
    schema: &[PublicInputField],
    inputs: &PublicInputs,
) -> Result<(), String> {
    for field in schema {
        let value = match inputs.get(&field.name) {
            Some(value) => value,
            None if field.required => {
                return Err(format!("missing required field {}", field.name))
            }
            None => continue,
        };
        let ok = match field.field_type {
            FieldType::Field => value.is_field_element(),
            FieldType::Hash => matches!(
                value,
                InputValue::Str(s) if s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
            ),
            FieldType::Uint64 => matches!(
                value,
                InputValue::Number(n) if n.fract() == 0.0 && *n >= 0.0
            ),
            FieldType::Bytes => matches!(value, InputValue::Str(_) | InputValue::Bytes(_)),
        };
        if !ok {
            return Err(format!(
                "field {} does not match declared type {}",
                field.name, field.field_type
            ));
        }
    }
    Ok(())
}

/// Check the commitment's shape and, when the inputs restate it, the
/// binding between the two.
///
/// A submission whose inputs carry a `data_commitment` field must match
/// the commitment either verbatim (hex) or as the SHA-256 of the field's
/// bytes. Inputs without the field leave the binding unverifiable here;
/// the commitment is then only checked for shape.
fn verify_commitment(commitment: &[u8], inputs: &PublicInputs) -> Result<(), String> {
    if commitment.len() != 32 {
        return Err(format!(
            "commitment is {} bytes, expected 32",
            commitment.len()
        ));
    }
    if let Some(stated) = inputs.get_str("data_commitment") {
        let direct = stated.eq_ignore_ascii_case(&to_hex(commitment));
        let hashed = zkv_core::sha256_raw(stated.as_bytes()) == commitment[..];
        if !direct && !hashed {
            return Err("public inputs restate a different commitment".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(json: &str) -> PublicInputs {
        PublicInputs::decode(json.as_bytes()).unwrap()
    }

    fn field(name: &str, field_type: FieldType, required: bool) -> PublicInputField {
        PublicInputField {
            name: name.to_string(),
            field_type,
            required,
        }
    }

    #[test]
    fn missing_required_field_fails_schema() {
        let schema = vec![field("amount", FieldType::Uint64, true)];
        let err = validate_schema(&schema, &inputs(r#"{"fields":{}}"#)).unwrap_err();
        assert!(err.contains("amount"));
    }

    #[test]
    fn missing_optional_field_passes_schema() {
        let schema = vec![field("memo", FieldType::Bytes, false)];
        assert!(validate_schema(&schema, &inputs(r#"{"fields":{}}"#)).is_ok());
    }

    #[test]
    fn uint64_rejects_fractional_and_negative() {
        let schema = vec![field("amount", FieldType::Uint64, true)];
        assert!(validate_schema(&schema, &inputs(r#"{"fields":{"amount":100}}"#)).is_ok());
        assert!(validate_schema(&schema, &inputs(r#"{"fields":{"amount":1.5}}"#)).is_err());
        assert!(validate_schema(&schema, &inputs(r#"{"fields":{"amount":-1}}"#)).is_err());
    }

    #[test]
    fn hash_requires_64_hex_chars() {
        let schema = vec![field("root", FieldType::Hash, true)];
        let good = format!(r#"{{"fields":{{"root":"{}"}}}}"#, "ab".repeat(32));
        assert!(validate_schema(&schema, &inputs(&good)).is_ok());
        assert!(validate_schema(&schema, &inputs(r#"{"fields":{"root":"abcd"}}"#)).is_err());
        let wrong_chars = format!(r#"{{"fields":{{"root":"{}"}}}}"#, "zz".repeat(32));
        assert!(validate_schema(&schema, &inputs(&wrong_chars)).is_err());
    }

    #[test]
    fn commitment_shape_is_checked() {
        let err = verify_commitment(&[1u8; 16], &inputs(r#"{"fields":{}}"#)).unwrap_err();
        assert!(err.contains("expected 32"));
        assert!(verify_commitment(&[1u8; 32], &inputs(r#"{"fields":{}}"#)).is_ok());
    }

    #[test]
    fn restated_commitment_must_bind() {
        let commitment = [0xabu8; 32];
        let matching = format!(
            r#"{{"fields":{{"data_commitment":"{}"}}}}"#,
            to_hex(&commitment)
        );
        assert!(verify_commitment(&commitment, &inputs(&matching)).is_ok());
        let mismatched = format!(
            r#"{{"fields":{{"data_commitment":"{}"}}}}"#,
            "00".repeat(32)
        );
        assert!(verify_commitment(&commitment, &inputs(&mismatched)).is_err());
    }

    #[test]
    fn hashed_restatement_binds_too() {
        let stated = "off-chain payload descriptor";
        let commitment = zkv_core::sha256_raw(stated.as_bytes());
        let json = format!(r#"{{"fields":{{"data_commitment":"{stated}"}}}}"#);
        assert!(verify_commitment(&commitment, &inputs(&json)).is_ok());
    }
}
