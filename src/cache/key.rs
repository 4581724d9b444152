//! Cache Key Module
//!
//! Derives deterministic string keys from a prefix and a parameter value.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::KeyError;

// == Generate Key ==
/// Builds `"{prefix}_{params}"` where `params` is canonical JSON.
///
/// Object keys are sorted at every depth, so two parameter sets that differ
/// only in field order map to the same key. Absent params produce
/// `"{prefix}_"`.
///
/// # Errors
/// Returns `KeyError` if `params` cannot be represented as JSON, for
/// example a map keyed by something other than strings.
pub fn generate_key<P>(prefix: &str, params: Option<&P>) -> Result<String, KeyError>
where
    P: Serialize + ?Sized,
{
    let serialized = match params {
        Some(params) => {
            let value = canonicalize(serde_json::to_value(params)?);
            serde_json::to_string(&value)?
        }
        None => String::new(),
    };

    Ok(format!("{}_{}", prefix, serialized))
}

/// Rebuilds every object in `value` with its keys in sorted order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = map.into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = fields
                .into_iter()
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
