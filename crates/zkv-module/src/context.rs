//! # Execution Context and Authority
//!
//! Every entry point receives an [`ExecContext`] carrying the hosting
//! ledger's block height, block time, and the authenticated caller. The
//! module never reads the wall clock; timestamps in persisted state come
//! from the context.
//!
//! ## Security Invariant
//!
//! The caller in the context is trusted as authenticated by the hosting
//! ledger. Authorization (who may register circuits, rules, and parameter
//! updates) is the module's concern, decided through [`Authority`].

use chrono::{DateTime, Utc};
use zkv_core::AccountId;

/// Per-transaction execution environment.
#[derive(Debug, Clone)]
pub struct ExecContext {
    /// Current block height.
    pub height: u64,
    /// Current block time, UTC.
    pub block_time: DateTime<Utc>,
    /// The authenticated transaction signer.
    pub caller: AccountId,
}

impl ExecContext {
    /// Build a context for one transaction.
    pub fn new(height: u64, block_time: DateTime<Utc>, caller: AccountId) -> Self {
        Self {
            height,
            block_time,
            caller,
        }
    }
}

/// Decides whether an account holds the administrative capability.
pub trait Authority {
    /// Whether `account` may perform administrative operations.
    fn is_authority(&self, account: &AccountId) -> bool;
}

/// A single configured authority account, fixed at module construction.
#[derive(Debug, Clone)]
pub struct ConfiguredAuthority {
    account: AccountId,
}

impl ConfiguredAuthority {
    /// Authority granted to exactly `account`.
    pub fn new(account: AccountId) -> Self {
        Self { account }
    }

    /// The configured authority account.
    pub fn account(&self) -> &AccountId {
        &self.account
    }
}

impl Authority for ConfiguredAuthority {
    fn is_authority(&self, account: &AccountId) -> bool {
        !account.is_empty() && *account == self.account
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_authority_matches_exactly() {
        let auth = ConfiguredAuthority::new(AccountId::new("zkv1gov"));
        assert!(auth.is_authority(&AccountId::new("zkv1gov")));
        assert!(!auth.is_authority(&AccountId::new("zkv1alice")));
    }

    #[test]
    fn empty_caller_is_never_authority() {
        let auth = ConfiguredAuthority::new(AccountId::new(""));
        assert!(!auth.is_authority(&AccountId::new("")));
    }
}
