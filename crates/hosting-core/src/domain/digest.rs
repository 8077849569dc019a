//! Canonical JSON and SHA-256 digests for synthesized templates.
//!
//! Two templates describing the same desired state hash identically: object
//! keys are sorted by UTF-16 code units (RFC 8785 §3.2.3) and integer-valued
//! floats are written as integers. Array order is significant and kept.

use sha2::{Digest, Sha256};

use super::error::{HostingError, Result};

fn canonicalize(value: &serde_json::Value) -> Result<serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));

            let mut sorted = serde_json::Map::new();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), canonicalize(v)?);
                }
            }
            Ok(serde_json::Value::Object(sorted))
        }
        serde_json::Value::Array(items) => Ok(serde_json::Value::Array(
            items.iter().map(canonicalize).collect::<Result<Vec<_>>>()?,
        )),
        serde_json::Value::Number(n) if !(n.is_i64() || n.is_u64()) => {
            let f = n
                .as_f64()
                .ok_or_else(|| HostingError::Digest(format!("unrepresentable number {n}")))?;
            if !f.is_finite() {
                return Err(HostingError::Digest(
                    "NaN/Infinity not permitted in canonical JSON".to_string(),
                ));
            }
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                Ok(serde_json::Value::Number(serde_json::Number::from(f as i64)))
            } else {
                Ok(value.clone())
            }
        }
        other => Ok(other.clone()),
    }
}

/// Compact canonical JSON text for `value`.
pub fn canonical_json(value: &serde_json::Value) -> Result<String> {
    Ok(serde_json::to_string(&canonicalize(value)?)?)
}

/// SHA-256 hex digest of the canonical JSON form of `value`.
pub fn compute_digest(value: &serde_json::Value) -> Result<String> {
    let canonical = canonical_json(value)?;
    Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
}

/// First `len` uppercase hex characters of the SHA-256 of `input`.
pub fn short_hash(input: &str, len: usize) -> String {
    let mut encoded = hex::encode_upper(Sha256::digest(input.as_bytes()));
    encoded.truncate(len);
    encoded
}
