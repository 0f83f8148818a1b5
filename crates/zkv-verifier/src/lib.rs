//! # zkv-verifier — Pluggable Proof Verification
//!
//! Defines the trait seams between the verification pipeline and the
//! cryptographic machinery, so that a genuine STARK/FRI verifier (or a
//! real interactive fraud-proof protocol) can be substituted without
//! touching the pipeline's control flow.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): [`ProofVerifier`] checks a submitted proof
//!   against a circuit; [`FraudProofVerifier`] checks a challenge against
//!   a stored proof. Both are object-safe and `Send + Sync`.
//!
//! - **Structural placeholders** (`stark.rs`, `fraud.rs`):
//!   [`StructuralStarkVerifier`] and [`HashBindingFraudChecker`] perform
//!   shape and hash-binding checks only. They provide NO cryptographic
//!   soundness and exist to exercise the pipeline end to end.
//!
//! - **Registry** (`registry.rs`): [`VerifierRegistry`] dispatches on a
//!   circuit's declared proof system.
//!
//! - **Policy** (`policy.rs`): [`BackendPolicy`] lets a deployment refuse
//!   structural backends outright, so placeholder verification can never
//!   be mistaken for the real thing in production.

pub mod fraud;
pub mod policy;
pub mod registry;
pub mod stark;
pub mod traits;

pub use fraud::HashBindingFraudChecker;
pub use policy::{BackendClass, BackendPolicy, PolicyError, PolicyMode};
pub use registry::VerifierRegistry;
pub use stark::StructuralStarkVerifier;
pub use traits::{FraudProofVerifier, ProofVerifier, VerifierError};
