/*!
 * Call Registry
 * Explicit name-to-handler table for the JSON call surface
 */

use crate::core::errors::{CallError, ErrorKind};
use crate::core::types::CallResult;
use crate::monitoring::generate_trace_id;
use ahash::AHashMap;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handler for one named operation: JSON payload in, response bytes out
pub type CallHandler = Arc<dyn Fn(&[u8]) -> CallResult<Bytes> + Send + Sync>;

/// Caller-facing failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&CallError> for CallFailure {
    fn from(err: &CallError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for CallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Outcome of a dispatched call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResponse {
    Success { data: Bytes },
    Failure(CallFailure),
}

impl CallResponse {
    pub fn success(data: Bytes) -> Self {
        Self::Success { data }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&Bytes> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&CallFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

/// Registry of named call handlers
///
/// Built once during initialization and immutable afterwards.
#[derive(Clone, Default)]
pub struct CallRegistry {
    handlers: AHashMap<String, CallHandler>,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a unique name
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F) -> CallResult<()>
    where
        F: Fn(&[u8]) -> CallResult<Bytes> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(CallError::invalid_argument(format!(
                "Operation already registered: [{}]",
                name
            )));
        }
        debug!(operation = %name, "Registering call handler");
        self.handlers.insert(name, Arc::new(handler));
        Ok(())
    }

    /// Run a handler, propagating its error
    pub fn invoke(&self, name: &str, payload: &[u8]) -> CallResult<Bytes> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| CallError::UnknownOperation(name.to_string()))?;
        handler(payload)
    }

    /// Run a handler and convert its outcome for the caller
    pub fn dispatch(&self, name: &str, payload: &[u8]) -> CallResponse {
        match self.invoke(name, payload) {
            Ok(data) => CallResponse::success(data),
            Err(e) => {
                let trace_id = generate_trace_id();
                warn!(operation = name, trace_id = %trace_id, error = %e, kind = %e.kind(), "Call failed");
                CallResponse::Failure(CallFailure::from(&e))
            }
        }
    }

    /// Registered operation names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

impl fmt::Debug for CallRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallRegistry")
            .field("operations", &self.names())
            .finish()
    }
}
