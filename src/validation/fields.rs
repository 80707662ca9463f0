/*!
 * Strict JSON Object Fields
 *
 * Request payloads are JSON objects read field by field in document order.
 * Duplicate names are kept during parsing so they can be rejected instead of
 * silently collapsing to the last value.
 */

use super::args::encode_args;
use crate::core::errors::CallError;
use crate::core::limits::{MAX_PID, MIN_PID};
use crate::core::serialization::json;
use crate::core::types::{CallResult, Pid};
use ahash::AHashSet;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;

/// A single named field of a request object
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// String value that must not be empty
    pub fn as_string_nonempty(&self) -> CallResult<&str> {
        let s = self.as_string()?;
        if s.is_empty() {
            return Err(CallError::invalid_argument(format!(
                "Empty string specified for field '{}'",
                self.name
            )));
        }
        Ok(s)
    }

    /// String value, empty allowed
    pub fn as_string(&self) -> CallResult<&str> {
        self.value
            .as_str()
            .ok_or_else(|| CallError::type_mismatch(&self.name, "string"))
    }

    pub fn as_bool(&self) -> CallResult<bool> {
        self.value
            .as_bool()
            .ok_or_else(|| CallError::type_mismatch(&self.name, "boolean"))
    }

    /// Positive integer PID in the signed 32-bit range
    pub fn as_pid(&self) -> CallResult<Pid> {
        let out_of_range = || {
            CallError::invalid_argument(format!(
                "Invalid '{}' field specified: [{}]",
                self.name, self.value
            ))
        };

        let number = match &self.value {
            Value::Number(n) => n,
            _ => return Err(CallError::type_mismatch(&self.name, "positive integer")),
        };

        if let Some(raw) = number.as_i64() {
            if !(MIN_PID..=MAX_PID).contains(&raw) {
                return Err(out_of_range());
            }
            return Pid::try_from(raw).map_err(|_| out_of_range());
        }

        if number.is_u64() {
            // Larger than i64::MAX
            return Err(out_of_range());
        }

        Err(CallError::type_mismatch(&self.name, "positive integer"))
    }

    /// Argument vector as its compact JSON array string
    pub fn as_args_json(&self) -> CallResult<String> {
        encode_args(&self.name, &self.value)
    }

    /// Error for a field outside the operation's schema
    pub fn unknown(&self) -> CallError {
        CallError::unknown_field(&self.name)
    }
}

/// The fields of a request object, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    fields: Vec<Field>,
}

impl Fields {
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn ensure_unique(&self) -> CallResult<()> {
        let mut seen = AHashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(CallError::invalid_argument(format!(
                    "Duplicate data field: [{}]",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Fields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_unit<E>(self) -> Result<Fields, E> {
                Ok(Fields::default())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Fields, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    fields.push(Field { name, value });
                }
                Ok(Fields { fields })
            }
        }

        deserializer.deserialize_any(FieldsVisitor)
    }
}

/// Parse a request payload that must be a JSON object
///
/// `null` is read as an empty object.
pub fn parse_object(payload: &[u8]) -> CallResult<Fields> {
    let fields: Fields = json::from_slice(payload).map_err(|e| {
        if e.is_data() {
            CallError::type_mismatch("payload", "JSON object")
        } else {
            CallError::invalid_argument(format!("Invalid JSON payload: {}", e.detail()))
        }
    })?;
    fields.ensure_unique()?;
    Ok(fields)
}

/// Parse a payload for an operation that takes no input
///
/// An empty or whitespace-only payload is an empty object.
pub fn parse_optional_object(payload: &[u8]) -> CallResult<Fields> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::default());
    }
    parse_object(payload)
}
