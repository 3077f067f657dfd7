//! Lenient JSON field coercions
//!
//! Client request bodies tolerate absent, null, or mistyped numeric
//! fields: anything that does not read as a number falls back to the
//! field default. Used with `#[serde(deserialize_with = ...)]` on the
//! request schemas and the bulk-import row type.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value to i64: numbers truncate, numeric strings parse,
/// booleans map to 0/1, everything else (incl. null/missing) is 0.
pub fn value_to_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        Value::Bool(b) => *b as i64,
        _ => 0,
    }
}

/// Coerce a JSON value to f64 with the same rules as [`value_to_i64`]
pub fn value_to_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => *b as i64 as f64,
        _ => 0.0,
    }
}

/// JSON truthiness: false, null, 0, "" and empty containers are false
pub fn value_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

pub fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(value_to_i64).unwrap_or(0))
}

pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(value_to_f64).unwrap_or(0.0))
}

pub fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(value_truthy).unwrap_or(false))
}
