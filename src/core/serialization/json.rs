/*!
 * JSON Serialization
 * Typed wrappers over serde_json for request parsing and response buffers
 */

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};

/// Result type for JSON operations
pub type JsonResult<T> = Result<T, JsonError>;

/// JSON operation errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum JsonError {
    #[error("Serialization failed: {context}")]
    Serialization {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Deserialization failed: {context}")]
    Deserialization {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl JsonError {
    /// True when the input was well-formed JSON of an unexpected shape
    pub fn is_data(&self) -> bool {
        match self {
            Self::Deserialization { source, .. } => source.is_data(),
            Self::Serialization { .. } => false,
        }
    }

    /// Message of the underlying serde_json error
    pub fn detail(&self) -> String {
        match self {
            Self::Serialization { source, .. } | Self::Deserialization { source, .. } => {
                source.to_string()
            }
        }
    }
}

/// Serialize to JSON bytes
#[inline]
pub fn to_vec<T: Serialize>(value: &T) -> JsonResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| JsonError::Serialization {
        context: "standard serialization",
        source,
    })
}

/// Serialize to a response buffer
#[inline]
pub fn to_bytes<T: Serialize>(value: &T) -> JsonResult<Bytes> {
    to_vec(value).map(Bytes::from)
}

/// Serialize to a compact JSON string
#[inline]
pub fn to_string<T: Serialize>(value: &T) -> JsonResult<String> {
    serde_json::to_string(value).map_err(|source| JsonError::Serialization {
        context: "compact string serialization",
        source,
    })
}

/// Deserialize from JSON bytes
#[inline]
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> JsonResult<T> {
    serde_json::from_slice(bytes).map_err(|source| JsonError::Deserialization {
        context: "standard deserialization",
        source,
    })
}

/// Deserialize from a JSON string
#[inline]
pub fn from_str<T: DeserializeOwned>(s: &str) -> JsonResult<T> {
    serde_json::from_str(s).map_err(|source| JsonError::Deserialization {
        context: "string deserialization",
        source,
    })
}
