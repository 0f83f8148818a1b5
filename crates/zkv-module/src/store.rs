//! # Key-Value Store Abstraction
//!
//! The module persists through a minimal ordered key-value interface; the
//! hosting ledger supplies the durable implementation. [`MemStore`] backs
//! tests and local tooling.

use std::collections::BTreeMap;

/// Ordered byte-keyed storage as exposed by the hosting ledger.
///
/// Prefix scans must return entries in ascending key order; the dense
/// proof-id ordering of queries depends on it.
pub trait KvStore {
    /// Read the value at `key`, if any.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Write `value` at `key`, replacing any previous value.
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Remove the value at `key`, if any.
    fn delete(&mut self, key: &[u8]);

    /// Whether a value exists at `key`.
    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// All entries whose key starts with `prefix`, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)>;
}

/// In-memory store over a `BTreeMap`.
#[derive(Debug, Default, Clone)]
pub struct MemStore {
    map: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.map.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.map.remove(key);
    }

    fn has(&self, key: &[u8]) -> bool {
        self.map.contains_key(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.map
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
