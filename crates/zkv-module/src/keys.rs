//! # Store Key Layout
//!
//! Single-byte prefixes partition the key space; every record lives under
//! exactly one prefix. Proof and result keys use the big-endian id so that
//! a prefix scan yields proofs in submission order.

use zkv_core::ProofId;

/// Prefix for circuit records, keyed by circuit name.
pub const CIRCUIT_PREFIX: u8 = 0x01;
/// Prefix for proof records, keyed by big-endian proof id.
pub const PROOF_PREFIX: u8 = 0x02;
/// Prefix for verification results, keyed by big-endian proof id.
pub const RESULT_PREFIX: u8 = 0x03;
/// Prefix for data commitment records, keyed by the commitment bytes.
pub const COMMITMENT_PREFIX: u8 = 0x04;
/// Prefix for symbolic rules, keyed by `circuit-name/rule-name`.
pub const RULE_PREFIX: u8 = 0x05;

/// Key of the dense proof-id counter.
pub const PROOF_COUNT_KEY: [u8; 1] = [0x06];
/// Key of the module parameters record.
pub const PARAMS_KEY: [u8; 1] = [0x07];

/// Separator between circuit name and rule name in rule keys.
const RULE_KEY_SEPARATOR: u8 = b'/';

/// Store key of a circuit record.
pub fn circuit_key(name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + name.len());
    key.push(CIRCUIT_PREFIX);
    key.extend_from_slice(name.as_bytes());
    key
}

/// Store key of a proof record.
pub fn proof_key(id: ProofId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(PROOF_PREFIX);
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// Store key of a verification result.
pub fn result_key(id: ProofId) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(RESULT_PREFIX);
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// Store key of a data commitment record.
pub fn commitment_key(commitment: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + commitment.len());
    key.push(COMMITMENT_PREFIX);
    key.extend_from_slice(commitment);
    key
}

/// Store key of a symbolic rule.
pub fn rule_key(circuit_name: &str, rule_name: &str) -> Vec<u8> {
    let mut key = rule_scan_prefix(circuit_name);
    key.extend_from_slice(rule_name.as_bytes());
    key
}

/// Scan prefix covering every rule of one circuit.
pub fn rule_scan_prefix(circuit_name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(2 + circuit_name.len());
    key.push(RULE_PREFIX);
    key.extend_from_slice(circuit_name.as_bytes());
    key.push(RULE_KEY_SEPARATOR);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proof_keys_sort_in_submission_order() {
        let a = proof_key(ProofId::new(1));
        let b = proof_key(ProofId::new(2));
        let c = proof_key(ProofId::new(256));
        assert!(a < b && b < c);
    }

    #[test]
    fn rule_key_scoped_under_circuit_prefix() {
        let key = rule_key("transfer", "positive-amount");
        assert!(key.starts_with(&rule_scan_prefix("transfer")));
        assert_eq!(key[0], RULE_PREFIX);
    }

    #[test]
    fn prefixes_partition_the_key_space() {
        assert_ne!(circuit_key("x")[0], rule_key("x", "y")[0]);
        assert_ne!(proof_key(ProofId::new(1))[0], result_key(ProofId::new(1))[0]);
    }
}
