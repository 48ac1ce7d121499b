//! Lenient scalar coercion for schemaless stored JSON.
//!
//! Effect payloads predate the current schema and were authored by hand, so
//! numbers show up as JSON numbers or as numeric strings. Coercion mirrors
//! what the storage format has historically tolerated.

use serde_json::Value;

/// Coerce a JSON value to a number: real numbers pass through, numeric
/// strings are parsed after trimming. Everything else is `None`.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Coerce a JSON value to an integer. Fractional values are rejected, not
/// truncated.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    let n = as_number(value)?;
    if n.fract() == 0.0 && n.is_finite() {
        Some(n as i64)
    } else {
        None
    }
}

/// Read a non-empty trimmed string field from a JSON object.
pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    let s = value.get(key)?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
