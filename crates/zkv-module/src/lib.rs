#![deny(missing_docs)]

//! # zkv-module — Ledger-Hosted Proof Verification
//!
//! The stateful verification module: circuit registry, symbolic rule
//! store, proof store, verification pipeline, data-commitment ledger, and
//! the optimistic challenge protocol. The hosting ledger supplies storage
//! ([`KvStore`]), the block clock and caller ([`ExecContext`]), and the
//! authority decision ([`Authority`]); everything else lives here.
//!
//! ## Security Invariant
//!
//! Two failure channels, never mixed. Request faults (unknown circuit,
//! oversize payload, dangling sub-proof, duplicate commitment) abort the
//! transaction and write nothing. Verification faults (backend rejection,
//! schema violation, rule violation, commitment mismatch) persist as a
//! `valid = false` result under a dense proof id, as auditable as a pass.
//!
//! ## Architecture
//!
//! - [`keeper`]: typed record accessors over the raw store.
//! - [`msgs`]: the six transaction handlers.
//! - [`pipeline`]: proof admission and the verification outcome stage.
//! - [`challenge`]: fraud-proof adjudication.
//! - [`query`]: the read-only surface.
//! - [`genesis`]: state import and export.

pub mod challenge;
pub mod context;
pub mod error;
pub mod events;
pub mod genesis;
pub mod keeper;
pub mod keys;
pub mod msgs;
pub mod pipeline;
pub mod query;
pub mod store;

pub use context::{Authority, ConfiguredAuthority, ExecContext};
pub use error::ModuleError;
pub use events::{Event, EventSink, RecordedEvents, RecordingSink, TracingSink};
pub use genesis::GenesisState;
pub use keeper::Keeper;
pub use msgs::{
    ChallengeProofMsg, ChallengeProofResponse, DeactivateCircuitMsg, RegisterCircuitMsg,
    RegisterCircuitResponse, RegisterSymbolicRuleMsg, RegisterSymbolicRuleResponse,
    SubmitProofMsg, SubmitProofResponse, UpdateParamsMsg,
};
pub use store::{KvStore, MemStore};
