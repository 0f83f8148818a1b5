//! # Verifier Registry
//!
//! Dispatches proof verification on a circuit's declared proof system.
//! The module embeds one registry at construction; swapping a placeholder
//! for a genuine verifier is a registry change, not a pipeline change.

use std::collections::HashMap;

use zkv_core::ProofSystem;

use crate::stark::StructuralStarkVerifier;
use crate::traits::ProofVerifier;

/// A per-proof-system table of verifier backends.
pub struct VerifierRegistry {
    backends: HashMap<ProofSystem, Box<dyn ProofVerifier>>,
}

impl VerifierRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// The default registry: the structural STARK placeholder.
    pub fn with_structural_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ProofSystem::Stark, Box::new(StructuralStarkVerifier));
        registry
    }

    /// Register (or replace) the backend for a proof system.
    pub fn register(&mut self, system: ProofSystem, verifier: Box<dyn ProofVerifier>) {
        self.backends.insert(system, verifier);
    }

    /// Look up the backend for a proof system.
    pub fn get(&self, system: ProofSystem) -> Option<&dyn ProofVerifier> {
        self.backends.get(&system).map(|b| b.as_ref())
    }
}

impl Default for VerifierRegistry {
    fn default() -> Self {
        Self::with_structural_defaults()
    }
}

impl std::fmt::Debug for VerifierRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifierRegistry")
            .field("systems", &self.backends.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::BackendClass;

    #[test]
    fn default_registry_serves_stark() {
        let registry = VerifierRegistry::default();
        let verifier = registry.get(ProofSystem::Stark).unwrap();
        assert_eq!(verifier.class(), BackendClass::Structural);
    }

    #[test]
    fn empty_registry_serves_nothing() {
        assert!(VerifierRegistry::new().get(ProofSystem::Stark).is_none());
    }
}
