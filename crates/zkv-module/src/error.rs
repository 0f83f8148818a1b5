//! # Module Errors
//!
//! Every variant here aborts the enclosing transaction: nothing is written
//! and no events are emitted. Verification failures past admission are a
//! different channel entirely; they persist as a `VerificationResult` with
//! `valid = false` and never surface as a [`ModuleError`].

use thiserror::Error;
use zkv_core::{ProofId, RecordError};
use zkv_rules::EvalError;
use zkv_verifier::PolicyError;

/// Transaction-aborting errors of the verification module.
#[derive(Error, Debug)]
pub enum ModuleError {
    /// The caller lacks the administrative authority capability.
    #[error("unauthorized: {caller} is not the module authority")]
    Unauthorized {
        /// The rejected caller address.
        caller: String,
    },

    /// A circuit with this name is already registered.
    #[error("circuit {name} already exists")]
    CircuitAlreadyExists {
        /// The contested circuit name.
        name: String,
    },

    /// No circuit is registered under this name.
    #[error("circuit {name} not found")]
    CircuitNotFound {
        /// The missing circuit name.
        name: String,
    },

    /// The circuit exists but has been deactivated.
    #[error("circuit {name} is inactive")]
    CircuitInactive {
        /// The inactive circuit name.
        name: String,
    },

    /// The owner has reached the per-account circuit cap.
    #[error("owner {owner} has reached the circuit limit of {max}")]
    CircuitQuotaExceeded {
        /// The owner account at the cap.
        owner: String,
        /// The configured cap.
        max: u32,
    },

    /// A rule with this name is already attached to the circuit.
    #[error("rule {rule} already exists on circuit {circuit}")]
    RuleAlreadyExists {
        /// The target circuit.
        circuit: String,
        /// The contested rule name.
        rule: String,
    },

    /// A rule definition failed registration-time validation.
    #[error("invalid rule: {0}")]
    InvalidRule(#[from] EvalError),

    /// The proof payload failed admission checks.
    #[error("invalid proof: {reason}")]
    InvalidProof {
        /// What the payload violated.
        reason: String,
    },

    /// The encoded public inputs failed admission checks.
    #[error("invalid public inputs: {reason}")]
    InvalidPublicInputs {
        /// What the payload violated.
        reason: String,
    },

    /// No verifier backend is registered for the circuit's proof system.
    #[error("no verifier backend registered for proof system {system}")]
    UnsupportedProofSystem {
        /// The proof system without a backend.
        system: String,
    },

    /// The backend policy refused the registered backend.
    #[error(transparent)]
    BackendRejected(#[from] PolicyError),

    /// A referenced sub-proof does not exist.
    #[error("recursive sub-proof {id} not found")]
    RecursiveProofNotFound {
        /// The dangling sub-proof id.
        id: ProofId,
    },

    /// A referenced sub-proof exists but is not currently valid.
    #[error("recursive sub-proof {id} is not valid")]
    RecursiveProofInvalid {
        /// The invalid sub-proof id.
        id: ProofId,
    },

    /// Aggregation would exceed the effective recursion bound.
    #[error("recursion depth {depth} exceeds the limit of {max}")]
    MaxRecursionDepthExceeded {
        /// Depth the submission would reach.
        depth: u32,
        /// Effective bound (the stricter of global and per-circuit).
        max: u32,
    },

    /// A record with this data commitment already exists.
    #[error("data commitment {commitment} already recorded")]
    DataCommitmentExists {
        /// The duplicate commitment, lowercase hex.
        commitment: String,
    },

    /// No proof is stored under this id.
    #[error("proof {id} not found")]
    ProofNotFound {
        /// The missing proof id.
        id: ProofId,
    },

    /// The proof's result was already overturned by a challenge.
    #[error("proof {id} has already been successfully challenged")]
    ProofAlreadyChallenged {
        /// The already-challenged proof id.
        id: ProofId,
    },

    /// The fraud-proof window for this proof has closed.
    #[error("challenge window for proof {id} expired at {deadline}")]
    ChallengeWindowExpired {
        /// The proof whose window closed.
        id: ProofId,
        /// The deadline that passed, RFC 3339.
        deadline: String,
    },

    /// The fraud proof was rejected.
    #[error("invalid challenge: {reason}")]
    InvalidChallenge {
        /// Why the fraud proof was rejected.
        reason: String,
    },

    /// A record failed its structural validation.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// A stored record failed to encode or decode.
    #[error("codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}
