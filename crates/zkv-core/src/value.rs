//! # Typed Public-Input Values
//!
//! Decoded public inputs are a map from field name to [`InputValue`], a
//! tagged variant type. Schema validation and rule evaluation pattern-match
//! on the variants; there is no dynamically typed escape hatch.
//!
//! ## Wire Form
//!
//! Submitters encode public inputs as a JSON object
//! `{"fields": {"name": value, …}}`. JSON numbers decode to
//! [`InputValue::Number`], strings to [`InputValue::Str`], booleans to
//! [`InputValue::Bool`], and byte arrays to [`InputValue::Bytes`].
//!
//! ## Canonical String Form
//!
//! Comparisons and set-membership tests that fall back to string equality
//! use [`InputValue::canonical_string`]. Integral numbers render without a
//! fractional part, so the JSON input `100` and the rule literal `"100"`
//! agree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::digest::to_hex;

/// Largest magnitude at which every f64 still represents an exact integer.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0; // 2^53

/// A single decoded public-input value.
///
/// Variant order matters: serde tries untagged variants in declaration
/// order, so `Bool` must precede `Number` and `Bytes` must come last
/// (a JSON array of small integers is only a byte string if nothing else
/// matched).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    /// A boolean flag.
    Bool(bool),
    /// A numeric value (field elements, uint64s; JSON numbers).
    Number(f64),
    /// A UTF-8 string (hashes are 64-hex-char strings).
    Str(String),
    /// A raw byte string.
    Bytes(Vec<u8>),
}

impl InputValue {
    /// Numeric view of the value, if it has one.
    ///
    /// Strings that parse as decimal numbers count as numeric — rule
    /// literals arrive as strings. Booleans and byte strings do not.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Str(s) => s.parse::<f64>().ok(),
            Self::Bool(_) | Self::Bytes(_) => None,
        }
    }

    /// The canonical string form used for equality fallback and
    /// set-membership tests.
    pub fn canonical_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Str(s) => s.clone(),
            Self::Bytes(b) => to_hex(b),
        }
    }

    /// Whether the value is numeric-or-string (the `field` schema type).
    pub fn is_field_element(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Str(_))
    }
}

/// Render a number canonically: integral values without a fractional part.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() <= MAX_EXACT_INT {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// The decoded public inputs of a proof: a name → value map.
///
/// `BTreeMap` keeps iteration deterministic, which matters for replayed
/// execution and stable error messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicInputs {
    /// The decoded field map.
    #[serde(default)]
    pub fields: BTreeMap<String, InputValue>,
}

impl PublicInputs {
    /// Decode public inputs from their JSON wire form.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.fields.get(name)
    }

    /// Look up a string field by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(InputValue::Str(s)) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn decode_typed_fields() {
        let raw = br#"{"fields":{"amount":100,"approved":true,"owner":"alice","tag":[1,2,255]}}"#;
        let pi = PublicInputs::decode(raw).unwrap();
        assert_eq!(pi.get("amount"), Some(&InputValue::Number(100.0)));
        assert_eq!(pi.get("approved"), Some(&InputValue::Bool(true)));
        assert_eq!(pi.get_str("owner"), Some("alice"));
        assert_eq!(pi.get("tag"), Some(&InputValue::Bytes(vec![1, 2, 255])));
    }

    #[test]
    fn decode_missing_fields_key_yields_empty_map() {
        let pi = PublicInputs::decode(b"{}").unwrap();
        assert!(pi.fields.is_empty());
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(InputValue::Number(100.0).canonical_string(), "100");
        assert_eq!(InputValue::Number(-3.0).canonical_string(), "-3");
        assert_eq!(InputValue::Number(0.5).canonical_string(), "0.5");
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(InputValue::Bool(false).canonical_string(), "false");
        assert_eq!(
            InputValue::Str("deadbeef".into()).canonical_string(),
            "deadbeef"
        );
        assert_eq!(
            InputValue::Bytes(vec![0xde, 0xad]).canonical_string(),
            "dead"
        );
    }

    #[test]
    fn numeric_view() {
        assert_eq!(InputValue::Number(4.0).as_f64(), Some(4.0));
        assert_eq!(InputValue::Str("4.5".into()).as_f64(), Some(4.5));
        assert_eq!(InputValue::Str("abc".into()).as_f64(), None);
        assert_eq!(InputValue::Bool(true).as_f64(), None);
        assert_eq!(InputValue::Bytes(vec![4]).as_f64(), None);
    }

    proptest! {
        #[test]
        fn integral_canonical_string_roundtrips(n in -1_000_000_000i64..1_000_000_000i64) {
            let v = InputValue::Number(n as f64);
            prop_assert_eq!(v.canonical_string(), n.to_string());
        }

        #[test]
        fn number_json_roundtrip(n in -1_000_000_000i64..1_000_000_000i64) {
            let json = format!(r#"{{"fields":{{"x":{n}}}}}"#);
            let pi = PublicInputs::decode(json.as_bytes()).unwrap();
            prop_assert_eq!(pi.get("x").unwrap().as_f64(), Some(n as f64));
        }
    }
}
