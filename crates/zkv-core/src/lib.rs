#![deny(missing_docs)]

//! # zkv-core — Foundational Types for the zkv Stack
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, `chrono`, and `sha2` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** A [`ProofId`] is not a
//!    bare `u64` and an [`AccountId`] is not a bare `String`.
//!
//! 2. **Tagged public-input values.** Decoded public inputs are
//!    [`InputValue`] variants, not dynamically typed blobs. Schema
//!    validation and rule evaluation pattern-match on variants; there are
//!    no runtime type assertions to get wrong.
//!
//! 3. **[`RecordError`] hierarchy.** Structured validation errors with
//!    `thiserror` — no `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! 4. **UTC block time only.** Every timestamp in persisted state comes
//!    from the injected block clock, never from the wall clock.

pub mod circuit;
pub mod digest;
pub mod error;
pub mod identity;
pub mod params;
pub mod proof;
pub mod value;

// Re-export primary types at crate root for ergonomic imports.
pub use circuit::{Circuit, FieldType, ProofSystem, PublicInputField};
pub use digest::{sha256_hex, sha256_raw, to_hex, Sha256Accumulator};
pub use error::RecordError;
pub use identity::{AccountId, ProofId};
pub use params::Params;
pub use proof::{DataCommitmentRecord, Proof, VerificationResult};
pub use value::{InputValue, PublicInputs};
