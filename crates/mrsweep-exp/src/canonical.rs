//! Key-sorted JSON encoding and the content hashes derived from it.
//!
//! Two values that serialize to the same JSON tree, whatever their map
//! insertion order, produce identical bytes and therefore identical hashes.

use std::fmt::Write;

use mrsweep_core::errors::{ErrorInfo, SweepError};
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sorted(value)))
                    .collect::<Map<_, _>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sorted).collect()),
        leaf => leaf,
    }
}

/// Compact JSON with object keys sorted at every depth. Used for persisted
/// sweep reports and as the input of [`stable_hash_string`].
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SweepError> {
    let tree = serde_json::to_value(value)
        .map_err(|err| SweepError::Serde(ErrorInfo::new("canonical_encode", err.to_string())))?;
    serde_json::to_vec(&sorted(tree))
        .map_err(|err| SweepError::Serde(ErrorInfo::new("canonical_write", err.to_string())))
}

/// Lowercase hex SHA-256 of the canonical JSON form of `value`.
///
/// Identifies a sweep independently of how its input file was ordered.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, SweepError> {
    let mut hasher = Sha256::new();
    hasher.update(to_canonical_json_bytes(value)?);
    let digest = hasher.finalize();
    Ok(digest.iter().fold(String::with_capacity(64), |mut hex, byte| {
        let _ = write!(hex, "{byte:02x}");
        hex
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_keys_are_sorted() {
        let bytes = to_canonical_json_bytes(&json!({"b": {"z": 1, "a": [{"y": 0, "x": 0}]}, "a": 2}))
            .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"a":2,"b":{"a":[{"x":0,"y":0}],"z":1}}"#
        );
    }

    #[test]
    fn hash_ignores_insertion_order() {
        let left = stable_hash_string(&json!({"mappers": [2, 4], "mode": "serial"})).unwrap();
        let right = stable_hash_string(&json!({"mode": "serial", "mappers": [2, 4]})).unwrap();
        assert_eq!(left, right);
        assert_eq!(left.len(), 64);
        assert_ne!(left, stable_hash_string(&json!({"mode": "serial", "mappers": [4, 2]})).unwrap());
    }
}
