//! `deserialize_with` helpers for upstream optional fields. A value of the
//! wrong shape decodes as `None` instead of failing the enclosing record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

fn value<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Option::<Value>::deserialize(d)
}

/// Strings pass through; numbers and booleans are rendered as text.
pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match value(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Booleans, `"true"/"yes"/"1"`-style strings, and numbers (non-zero is true).
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match value(d)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Non-negative integers, as numbers or numeric strings.
pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(match value(d)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// Decodes each element on its own; an element that is not a decodable
/// object becomes `T::default()` so positional counts are preserved.
pub fn each_or_default<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let values = match value(d)? {
        Some(Value::Array(values)) => values,
        Some(other) => {
            warn!(value = %other, "expected a list, ignoring");
            Vec::new()
        }
        None => Vec::new(),
    };
    Ok(values
        .into_iter()
        .enumerate()
        .map(|(idx, v)| {
            serde_json::from_value(v).unwrap_or_else(|e| {
                warn!(index = idx, error = %e, "undecodable entry, using defaults");
                T::default()
            })
        })
        .collect())
}
