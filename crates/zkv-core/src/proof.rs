//! # Proof, Result, and Commitment Records
//!
//! [`Proof`] is the append-only record of a submission. Exactly one
//! [`VerificationResult`] exists per proof, written when the submission
//! transaction runs and mutated at most once more by a successful
//! challenge. [`DataCommitmentRecord`] binds a proof to an off-chain data
//! digest (validium-style publication).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::Sha256Accumulator;
use crate::identity::{AccountId, ProofId};

/// A submitted proof. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    /// Dense sequential identifier, assigned by the proof store.
    pub id: ProofId,
    /// The circuit this proof claims to satisfy.
    pub circuit_name: String,
    /// The proof artifact bytes.
    pub proof_data: Vec<u8>,
    /// Encoded public inputs (JSON `{"fields": …}` wire form).
    pub public_inputs: Vec<u8>,
    /// Optional 32-byte digest of off-chain data; empty when absent.
    pub data_commitment: Vec<u8>,
    /// Identifiers of aggregated sub-proofs, if any.
    pub recursive_proofs: Vec<ProofId>,
    /// The submitting account.
    pub submitter: AccountId,
    /// Block time at submission.
    pub submitted_at: DateTime<Utc>,
    /// Block height at submission.
    pub submitted_height: u64,
}

impl Proof {
    /// A stable reference hash over the proof's identifying content:
    /// circuit name, proof data, public inputs, and data commitment.
    pub fn reference_hash(&self) -> String {
        let mut acc = Sha256Accumulator::new();
        acc.update(self.circuit_name.as_bytes())
            .update(&self.proof_data)
            .update(&self.public_inputs)
            .update(&self.data_commitment);
        acc.finalize_hex()
    }
}

/// The stored outcome of verifying one proof.
///
/// Created for every submission that passes admission, whether or not
/// verification succeeded. A successful challenge is the only later
/// mutation: it sets `challenged = true` and `valid = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The proof this result belongs to (1:1).
    pub proof_id: ProofId,
    /// The circuit the proof was verified against.
    pub circuit_name: String,
    /// Whether verification succeeded and has not been overturned.
    pub valid: bool,
    /// Block height at verification.
    pub verified_at_height: u64,
    /// Block time at verification.
    pub verified_at: DateTime<Utc>,
    /// The data commitment the proof carried, if any.
    pub data_commitment: Vec<u8>,
    /// Names of the symbolic rules that passed, in evaluation order.
    pub constraints_satisfied: Vec<String>,
    /// Rejection reason; empty on success.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    /// Measured verification latency. Advisory: wall-clock timing is not
    /// replay-deterministic.
    pub verification_time_ms: u64,
    /// Nested aggregation depth of the proof (0 without recursion).
    pub recursion_depth: u32,
    /// Whether a challenge has been accepted against this result.
    pub challenged: bool,
    /// End of the fraud-proof window.
    pub challenge_deadline: DateTime<Utc>,
}

impl VerificationResult {
    /// Whether the result is final at `now`: valid, unchallenged, and the
    /// challenge window has closed. A valid result still inside its window
    /// is provisional and must not be treated as final.
    pub fn finalized_at(&self, now: DateTime<Utc>) -> bool {
        self.valid && !self.challenged && now > self.challenge_deadline
    }
}

/// A recorded binding between a data commitment and the proof that
/// carried it. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCommitmentRecord {
    /// The 32-byte commitment; doubles as the store key.
    pub commitment: Vec<u8>,
    /// Digest of the committed off-chain data, when known. Population is
    /// a data-availability concern outside this module.
    pub data_hash: Vec<u8>,
    /// The proof that carried the commitment.
    pub proof_id: ProofId,
    /// Block time when recorded.
    pub committed_at: DateTime<Utc>,
    /// Block height when recorded.
    pub committed_height: u64,
    /// Optional pointer into a data-availability layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn proof() -> Proof {
        Proof {
            id: ProofId::new(1),
            circuit_name: "transfer".to_string(),
            proof_data: vec![1; 64],
            public_inputs: br#"{"fields":{"amount":5}}"#.to_vec(),
            data_commitment: vec![],
            recursive_proofs: vec![],
            submitter: AccountId::new("zkv1alice"),
            submitted_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            submitted_height: 10,
        }
    }

    fn result(valid: bool) -> VerificationResult {
        VerificationResult {
            proof_id: ProofId::new(1),
            circuit_name: "transfer".to_string(),
            valid,
            verified_at_height: 10,
            verified_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            data_commitment: vec![],
            constraints_satisfied: vec![],
            error: String::new(),
            verification_time_ms: 1,
            recursion_depth: 0,
            challenged: false,
            challenge_deadline: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn reference_hash_is_stable_and_content_sensitive() {
        let a = proof();
        let mut b = proof();
        assert_eq!(a.reference_hash(), b.reference_hash());
        b.proof_data[0] ^= 0xff;
        assert_ne!(a.reference_hash(), b.reference_hash());
    }

    #[test]
    fn not_finalized_inside_window() {
        let r = result(true);
        let inside = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert!(!r.finalized_at(inside));
    }

    #[test]
    fn finalized_strictly_after_deadline() {
        let r = result(true);
        let at_deadline = r.challenge_deadline;
        let after = at_deadline + chrono::Duration::seconds(1);
        assert!(!r.finalized_at(at_deadline));
        assert!(r.finalized_at(after));
    }

    #[test]
    fn invalid_or_challenged_never_finalizes() {
        let after = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        assert!(!result(false).finalized_at(after));
        let mut challenged = result(true);
        challenged.challenged = true;
        challenged.valid = false;
        assert!(!challenged.finalized_at(after));
    }

    #[test]
    fn empty_error_is_omitted_from_wire_form() {
        let json = serde_json::to_string(&result(true)).unwrap();
        assert!(!json.contains(r#""error""#));
    }
}
