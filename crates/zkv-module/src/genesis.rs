//! # Genesis State
//!
//! Initial state import and full-state export. Export followed by import
//! into an empty store reproduces the circuits, rules, parameters, and the
//! proof counter exactly; proofs and results are runtime state and do not
//! cross a genesis boundary.

use serde::{Deserialize, Serialize};
use zkv_core::{Circuit, Params};
use zkv_rules::SymbolicRule;

use crate::error::ModuleError;
use crate::keeper::Keeper;
use crate::store::KvStore;

/// The module's genesis document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Module parameters.
    pub params: Params,
    /// Circuits to seed, with their recorded timestamps and flags.
    pub circuits: Vec<Circuit>,
    /// Symbolic rules to seed.
    pub symbolic_rules: Vec<SymbolicRule>,
    /// The proof counter to resume from.
    pub proof_count: u64,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            params: Params::default(),
            circuits: vec![],
            symbolic_rules: vec![],
            proof_count: 0,
        }
    }
}

impl<S: KvStore> Keeper<S> {
    /// Seed an empty store from a genesis document.
    ///
    /// Records are written verbatim so that an exported state re-imports
    /// identically; handler-side stamping does not apply here.
    pub fn init_genesis(&mut self, genesis: GenesisState) -> Result<(), ModuleError> {
        genesis.params.validate()?;
        self.write_params(&genesis.params)?;

        let min_key = genesis.params.min_verification_key_size;
        for circuit in &genesis.circuits {
            circuit.validate(min_key)?;
            if self.has_circuit(&circuit.name) {
                return Err(ModuleError::CircuitAlreadyExists {
                    name: circuit.name.clone(),
                });
            }
            self.write_circuit(circuit)?;
        }

        for rule in &genesis.symbolic_rules {
            rule.validate()?;
            self.expect_circuit(&rule.circuit_name)?;
            if self.has_rule(&rule.circuit_name, &rule.name) {
                return Err(ModuleError::RuleAlreadyExists {
                    circuit: rule.circuit_name.clone(),
                    rule: rule.name.clone(),
                });
            }
            self.write_rule(rule)?;
        }

        self.write_proof_count(genesis.proof_count)
    }

    /// Export the genesis-relevant state.
    pub fn export_genesis(&self) -> Result<GenesisState, ModuleError> {
        Ok(GenesisState {
            params: self.params()?,
            circuits: self.all_circuits()?,
            symbolic_rules: self.all_rules()?,
            proof_count: self.proof_count()?,
        })
    }
}
