//! # Module Events
//!
//! Typed events emitted by transaction handlers after state is written.
//! Aborted transactions emit nothing. The [`EventSink`] seam lets the
//! hosting ledger translate events into its own event bus; the module
//! ships a tracing sink for operators and a recording sink for tests.

use zkv_core::{ProofId, ProofSystem};

/// One emitted module event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A circuit was registered.
    CircuitRegistered {
        /// The new circuit's name.
        circuit_name: String,
        /// Its proof system.
        proof_system: ProofSystem,
        /// Hex digest binding the verification key.
        constraint_hash: String,
    },
    /// A circuit was deactivated.
    CircuitDeactivated {
        /// The deactivated circuit.
        circuit_name: String,
    },
    /// A symbolic rule was attached to a circuit.
    RuleRegistered {
        /// The constrained circuit.
        circuit_name: String,
        /// The new rule's name.
        rule_name: String,
    },
    /// A submitted proof verified successfully.
    ProofVerified {
        /// The stored proof id.
        proof_id: ProofId,
        /// The circuit verified against.
        circuit_name: String,
        /// Aggregation depth (0 without recursion).
        recursion_depth: u32,
        /// Measured verification latency.
        verification_time_ms: u64,
    },
    /// A submitted proof was admitted but failed verification.
    ProofRejected {
        /// The stored proof id.
        proof_id: ProofId,
        /// The circuit verified against.
        circuit_name: String,
        /// The stored rejection reason.
        error: String,
    },
    /// A recursive aggregation verified successfully.
    RecursiveAggregated {
        /// The aggregating proof.
        proof_id: ProofId,
        /// Number of aggregated sub-proofs.
        sub_proofs: usize,
        /// Resulting aggregation depth.
        recursion_depth: u32,
    },
    /// A data commitment was recorded.
    DataCommitmentRecorded {
        /// The commitment, lowercase hex.
        commitment: String,
        /// The carrying proof.
        proof_id: ProofId,
    },
    /// A fraud proof was accepted and the result overturned.
    ProofChallenged {
        /// The invalidated proof.
        proof_id: ProofId,
        /// The challenger account address.
        challenger: String,
    },
}

/// Receives events after the handler has written state.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: Event);
}

/// Sink that logs every event through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: Event) {
        match &event {
            Event::CircuitRegistered {
                circuit_name,
                proof_system,
                constraint_hash,
            } => tracing::info!(
                target: "zkv::events",
                circuit = %circuit_name,
                system = %proof_system,
                constraint_hash = %constraint_hash,
                "circuit registered"
            ),
            Event::CircuitDeactivated { circuit_name } => tracing::info!(
                target: "zkv::events",
                circuit = %circuit_name,
                "circuit deactivated"
            ),
            Event::RuleRegistered {
                circuit_name,
                rule_name,
            } => tracing::info!(
                target: "zkv::events",
                circuit = %circuit_name,
                rule = %rule_name,
                "symbolic rule registered"
            ),
            Event::ProofVerified {
                proof_id,
                circuit_name,
                recursion_depth,
                verification_time_ms,
            } => tracing::info!(
                target: "zkv::events",
                proof_id = %proof_id,
                circuit = %circuit_name,
                depth = recursion_depth,
                elapsed_ms = verification_time_ms,
                "proof verified"
            ),
            Event::ProofRejected {
                proof_id,
                circuit_name,
                error,
            } => tracing::warn!(
                target: "zkv::events",
                proof_id = %proof_id,
                circuit = %circuit_name,
                error = %error,
                "proof rejected"
            ),
            Event::RecursiveAggregated {
                proof_id,
                sub_proofs,
                recursion_depth,
            } => tracing::info!(
                target: "zkv::events",
                proof_id = %proof_id,
                sub_proofs = sub_proofs,
                depth = recursion_depth,
                "recursive proofs aggregated"
            ),
            Event::DataCommitmentRecorded {
                commitment,
                proof_id,
            } => tracing::info!(
                target: "zkv::events",
                commitment = %commitment,
                proof_id = %proof_id,
                "data commitment recorded"
            ),
            Event::ProofChallenged {
                proof_id,
                challenger,
            } => tracing::warn!(
                target: "zkv::events",
                proof_id = %proof_id,
                challenger = %challenger,
                "proof invalidated by challenge"
            ),
        }
    }
}

/// Sink that appends events to a shared log for inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    log: std::rc::Rc<std::cell::RefCell<Vec<Event>>>,
}

/// Read handle onto a [`RecordingSink`]'s log, usable after the sink has
/// moved into the module.
#[derive(Debug, Clone)]
pub struct RecordedEvents {
    log: std::rc::Rc<std::cell::RefCell<Vec<Event>>>,
}

impl RecordingSink {
    /// An empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// A read handle sharing this sink's log.
    pub fn handle(&self) -> RecordedEvents {
        RecordedEvents {
            log: std::rc::Rc::clone(&self.log),
        }
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl RecordedEvents {
    /// Snapshot of every event emitted so far.
    pub fn snapshot(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    /// Number of events emitted so far.
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Whether no events have been emitted.
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_shares_log_with_handle() {
        let mut sink = RecordingSink::new();
        let handle = sink.handle();
        assert!(handle.is_empty());
        sink.emit(Event::CircuitDeactivated {
            circuit_name: "transfer".to_string(),
        });
        assert_eq!(handle.len(), 1);
        assert_eq!(
            handle.snapshot()[0],
            Event::CircuitDeactivated {
                circuit_name: "transfer".to_string()
            }
        );
    }
}
