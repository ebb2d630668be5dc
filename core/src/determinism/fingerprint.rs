use crate::error::CoreResult;
use serde::Serialize;
use sha2::{Digest, Sha256};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// `<prefix>_<16 hex>` over the parts joined with a unit separator.
pub fn short_id(prefix: &str, parts: &[&str]) -> String {
    let joined = parts.join("\u{1f}");
    let hex = sha256_hex(joined.as_bytes());
    format!("{}_{}", prefix, &hex[..16])
}

/// SHA-256 of the serde_json encoding. Struct fields serialize in declaration
/// order so identical values always hash identically.
pub fn fingerprint<T: Serialize>(value: &T) -> CoreResult<String> {
    let bytes = serde_json::to_vec(value)?;
    Ok(sha256_hex(&bytes))
}
