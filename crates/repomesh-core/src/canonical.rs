//! # Canonical Serialization — Deterministic Byte Production
//!
//! Defines `CanonicalBytes`, the sole construction path for bytes used in
//! content-hash computation across the trust core.
//!
//! ## Security Invariant
//!
//! `CanonicalBytes` has a private inner field. The only way to construct it
//! is through `CanonicalBytes::new()`. Any function requiring canonical
//! bytes for digest computation must accept `&CanonicalBytes` — it is a
//! compile error to pass a raw `serde_json::to_vec()` result instead.
//!
//! ## Canonical Form (spec §4.1)
//!
//! - Object keys sorted lexicographically by Unicode code point.
//! - Arrays preserve source order.
//! - No insignificant whitespace.
//! - Numbers in JSON-native form.
//!
//! `serde_json::Value`'s `Object` variant is backed by a `BTreeMap` as long
//! as the `preserve_order` feature is not enabled (it is not, in this
//! workspace), so converting through `Value` already yields sorted keys;
//! `serde_json::to_vec` already omits insignificant whitespace. No extra
//! canonicalization crate is needed for this event shape, which contains
//! only strings, integers, bools, arrays, and objects — see `DESIGN.md` for
//! why `serde_jcs` (used by the teacher) was dropped.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by the sorted-key, whitespace-free
/// canonicalization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the only way to construct `CanonicalBytes`. All digest and
    /// signature computation in the trust core must flow through this
    /// constructor.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let bytes = serialize_canonical(&value)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Serialize a JSON value in canonical form: sorted keys, no whitespace.
fn serialize_canonical(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    Ok(serde_json::to_vec(value)?)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,50}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,10}", inner, 0..8).prop_map(|m| {
                    let map: serde_json::Map<String, Value> = m.into_iter().collect();
                    Value::Object(map)
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_bytes_never_panics(value in json_value()) {
            let result = CanonicalBytes::new(&value);
            prop_assert!(result.is_ok());
        }

        #[test]
        fn canonical_bytes_deterministic(value in json_value()) {
            let a = CanonicalBytes::new(&value).unwrap();
            let b = CanonicalBytes::new(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        #[test]
        fn canonical_bytes_valid_utf8(value in json_value()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            prop_assert!(std::str::from_utf8(cb.as_bytes()).is_ok());
        }

        #[test]
        fn canonical_bytes_valid_json(value in json_value()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            let parsed: Result<Value, _> = serde_json::from_slice(cb.as_bytes());
            prop_assert!(parsed.is_ok());
        }

        #[test]
        fn canonical_bytes_sorted_keys(
            keys in prop::collection::btree_set("[a-z]{1,8}", 2..6)
        ) {
            let map: serde_json::Map<String, Value> = keys.iter()
                .enumerate()
                .map(|(i, k)| (k.clone(), serde_json::json!(i)))
                .collect();
            let value = Value::Object(map);
            let cb = CanonicalBytes::new(&value).unwrap();
            let s = std::str::from_utf8(cb.as_bytes()).unwrap();

            let parsed: serde_json::Map<String, Value> = serde_json::from_str(s).unwrap();
            let output_keys: Vec<&String> = parsed.keys().collect();
            let mut sorted_keys = output_keys.clone();
            sorted_keys.sort();
            prop_assert_eq!(output_keys, sorted_keys);
        }

        /// `structurallyEqual` value trees (same fields, same array order)
        /// canonicalize identically regardless of the order fields were
        /// inserted in the source map (spec §8, canonicalization totality).
        #[test]
        fn structurally_equal_values_canonicalize_identically(
            keys in prop::collection::vec("[a-z]{1,6}", 2..6)
        ) {
            let mut forward = serde_json::Map::new();
            for (i, k) in keys.iter().enumerate() {
                forward.insert(k.clone(), serde_json::json!(i));
            }
            let mut backward = serde_json::Map::new();
            for (i, k) in keys.iter().enumerate().rev() {
                backward.insert(k.clone(), serde_json::json!(i));
            }
            let a = CanonicalBytes::new(&Value::Object(forward)).unwrap();
            let b = CanonicalBytes::new(&Value::Object(backward)).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }
    }
}
