/*!
 * Argument Vector Marshaling
 *
 * The argument vector travels as a compact JSON array string between the call
 * adapter and the low-level boundary. Encoding and decoding live side by side
 * so the two representations cannot drift apart.
 */

use crate::core::errors::CallError;
use crate::core::serialization::json;
use crate::core::types::CallResult;
use serde_json::Value;

const EXPECTED_ARGS: &str = "array of strings";

/// Encode a JSON `args` value as a compact array string
///
/// Only the shape is checked here; element contents are checked on decode.
pub fn encode_args(field: &str, value: &Value) -> CallResult<String> {
    let items = value
        .as_array()
        .ok_or_else(|| CallError::type_mismatch(field, EXPECTED_ARGS))?;

    if items.iter().any(|item| !item.is_string()) {
        return Err(CallError::type_mismatch(field, EXPECTED_ARGS));
    }

    json::to_string(value).map_err(|e| {
        CallError::invalid_argument(format!("Cannot encode '{}': {}", field, e.detail()))
    })
}

/// Decode an argument vector from its JSON array string
pub fn decode_args(name: &str, args_json: &str) -> CallResult<Vec<String>> {
    let value: Value = json::from_str(args_json).map_err(|e| {
        CallError::invalid_argument(format!(
            "Invalid '{}' parameter specified: {}",
            name,
            e.detail()
        ))
    })?;

    let Value::Array(items) = value else {
        return Err(CallError::type_mismatch(name, EXPECTED_ARGS));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) if s.is_empty() => Err(CallError::invalid_argument(format!(
                "Invalid '{}' parameter specified: empty argument at index [{}]",
                name, index
            ))),
            Value::String(s) => Ok(s),
            _ => Err(CallError::type_mismatch(name, EXPECTED_ARGS)),
        })
        .collect()
}
