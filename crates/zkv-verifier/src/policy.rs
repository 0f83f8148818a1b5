//! # Backend Acceptance Policy
//!
//! The shipped verifier backends are structural stand-ins with zero
//! cryptographic security. If a deployment accepted their verdicts as
//! authoritative, anyone could fabricate "verified" proofs. The
//! [`BackendPolicy`] is checked at proof admission: in production mode,
//! structural backends are rejected unconditionally.
//!
//! ## Configuration
//!
//! The policy mode is determined by:
//! 1. Explicit construction ([`BackendPolicy::production`] /
//!    [`BackendPolicy::development`])
//! 2. Runtime environment variable (`ZKV_PROOF_POLICY`)
//! 3. Compile-time default: release builds are `Production`, debug builds
//!    `Development`

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error from backend policy enforcement.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolicyError {
    /// A structural backend was rejected in production mode.
    #[error("structural verifier backend rejected: production mode requires a cryptographic proof backend")]
    StructuralBackendRejected,
}

/// Whether a verifier backend provides real cryptographic soundness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendClass {
    /// Shape and hash-binding checks only — no soundness.
    Structural,
    /// A genuine proof-system verifier.
    Cryptographic,
}

/// Policy mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyMode {
    /// Reject structural backends unconditionally.
    Production,
    /// Accept structural backends (testing and local development).
    Development,
}

/// Runtime policy validating whether a verifier backend is acceptable for
/// the current deployment.
#[derive(Debug, Clone)]
pub struct BackendPolicy {
    mode: PolicyMode,
}

impl BackendPolicy {
    /// Create a policy with the given mode.
    pub fn new(mode: PolicyMode) -> Self {
        Self { mode }
    }

    /// Production policy: structural backends rejected.
    pub fn production() -> Self {
        Self::new(PolicyMode::Production)
    }

    /// Development policy: structural backends accepted.
    pub fn development() -> Self {
        Self::new(PolicyMode::Development)
    }

    /// Determine the policy from the environment.
    ///
    /// Checks `ZKV_PROOF_POLICY` (`production` or `development`), then
    /// falls back to the compile-time default: release builds are
    /// production, debug builds development.
    pub fn from_environment() -> Self {
        if let Ok(val) = std::env::var("ZKV_PROOF_POLICY") {
            match val.to_lowercase().as_str() {
                "production" | "prod" => return Self::production(),
                "development" | "dev" => return Self::development(),
                _ => {} // Fall through to the compile-time default.
            }
        }
        if cfg!(not(debug_assertions)) {
            Self::production()
        } else {
            Self::development()
        }
    }

    /// Validate a backend class under this policy.
    pub fn validate(&self, class: BackendClass) -> Result<(), PolicyError> {
        match (self.mode, class) {
            (PolicyMode::Production, BackendClass::Structural) => {
                Err(PolicyError::StructuralBackendRejected)
            }
            _ => Ok(()),
        }
    }

    /// The current mode.
    pub fn mode(&self) -> PolicyMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_rejects_structural() {
        let policy = BackendPolicy::production();
        assert_eq!(
            policy.validate(BackendClass::Structural),
            Err(PolicyError::StructuralBackendRejected)
        );
    }

    #[test]
    fn production_accepts_cryptographic() {
        assert!(BackendPolicy::production()
            .validate(BackendClass::Cryptographic)
            .is_ok());
    }

    #[test]
    fn development_accepts_both() {
        let policy = BackendPolicy::development();
        assert!(policy.validate(BackendClass::Structural).is_ok());
        assert!(policy.validate(BackendClass::Cryptographic).is_ok());
    }

    #[test]
    fn from_environment_does_not_panic() {
        let _ = BackendPolicy::from_environment().mode();
    }
}
