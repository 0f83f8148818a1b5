//! # Circuit Records
//!
//! A [`Circuit`] is the durable description of a verification circuit: its
//! verification key, the shape of its public inputs, and its recursion
//! bound. Circuits are created once by the administrative authority,
//! deactivated at most once, and never physically deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::identity::AccountId;

/// The proof systems the module can dispatch to.
///
/// A single supported value today; the enum exists so that registering a
/// circuit against an unknown system is unrepresentable rather than a
/// string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofSystem {
    /// STARK with FRI-based low-degree testing.
    Stark,
}

impl ProofSystem {
    /// The canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stark => "stark",
        }
    }
}

impl std::fmt::Display for ProofSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared type of a public-input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// A field element: numeric, or a string encoding of one.
    Field,
    /// A 32-byte hash, hex-encoded as a 64-character string.
    Hash,
    /// An unsigned 64-bit integer.
    Uint64,
    /// A byte string (raw bytes or a string).
    Bytes,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Field => "field",
            Self::Hash => "hash",
            Self::Uint64 => "uint64",
            Self::Bytes => "bytes",
        };
        f.write_str(s)
    }
}

/// One entry of a circuit's public-input schema. Immutable once the
/// circuit is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInputField {
    /// The field name submitters must use.
    pub name: String,
    /// The declared value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether submissions must include the field.
    pub required: bool,
}

/// A registered verification circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Globally unique circuit name; doubles as the store key.
    pub name: String,
    /// The verification key for the proof system.
    pub verification_key: Vec<u8>,
    /// Which proof system verifies proofs against this circuit.
    pub proof_system: ProofSystem,
    /// The declared shape of public inputs.
    pub public_input_schema: Vec<PublicInputField>,
    /// Lowercase-hex SHA-256 of the verification key, fixed at registration.
    pub constraint_hash: String,
    /// The authority account that registered the circuit.
    pub owner: AccountId,
    /// Whether the circuit accepts new proofs. Deactivation is one-way.
    pub active: bool,
    /// Block time at registration.
    pub created_at: DateTime<Utc>,
    /// Free-form operator description.
    pub description: String,
    /// Per-circuit cap on recursive aggregation depth.
    pub max_recursion_depth: u32,
}

impl Circuit {
    /// Validate the structural invariants of a circuit record.
    ///
    /// `min_verification_key_size` comes from module params; the global
    /// invariant (non-empty key) holds even when the configured minimum
    /// is zero.
    pub fn validate(&self, min_verification_key_size: u64) -> Result<(), RecordError> {
        if self.name.is_empty() {
            return Err(RecordError::EmptyCircuitName);
        }
        if self.verification_key.is_empty() {
            return Err(RecordError::InvalidVerificationKey {
                reason: "verification key must not be empty".to_string(),
            });
        }
        if (self.verification_key.len() as u64) < min_verification_key_size {
            return Err(RecordError::InvalidVerificationKey {
                reason: format!(
                    "verification key is {} bytes, minimum is {min_verification_key_size}",
                    self.verification_key.len()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn circuit(name: &str, vk_len: usize) -> Circuit {
        Circuit {
            name: name.to_string(),
            verification_key: vec![7u8; vk_len],
            proof_system: ProofSystem::Stark,
            public_input_schema: vec![],
            constraint_hash: String::new(),
            owner: AccountId::new("zkv1authority"),
            active: true,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            description: String::new(),
            max_recursion_depth: 4,
        }
    }

    #[test]
    fn valid_circuit_passes() {
        assert!(circuit("transfer", 32).validate(32).is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        assert_eq!(
            circuit("", 32).validate(32),
            Err(RecordError::EmptyCircuitName)
        );
    }

    #[test]
    fn empty_key_rejected_even_with_zero_minimum() {
        assert!(matches!(
            circuit("c", 0).validate(0),
            Err(RecordError::InvalidVerificationKey { .. })
        ));
    }

    #[test]
    fn short_key_rejected() {
        assert!(matches!(
            circuit("c", 16).validate(32),
            Err(RecordError::InvalidVerificationKey { .. })
        ));
    }

    #[test]
    fn schema_field_type_serializes_lowercase() {
        let field = PublicInputField {
            name: "amount".to_string(),
            field_type: FieldType::Uint64,
            required: true,
        };
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains(r#""type":"uint64""#));
    }

    #[test]
    fn proof_system_wire_name() {
        assert_eq!(
            serde_json::to_string(&ProofSystem::Stark).unwrap(),
            r#""stark""#
        );
        assert_eq!(ProofSystem::Stark.to_string(), "stark");
    }
}
