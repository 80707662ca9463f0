/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Call-layer errors with serialization support
///
/// Every variant renders to a single human-readable message; that message is
/// what reaches the caller.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
#[non_exhaustive]
pub enum CallError {
    #[error("{0}")]
    #[diagnostic(
        code(call::invalid_argument),
        help("Check the named parameter: null buffers, out-of-range lengths, empty strings and non-positive PIDs are rejected.")
    )]
    InvalidArgument(String),

    #[error("Required parameter '{0}' not specified")]
    #[diagnostic(code(call::missing_parameter))]
    MissingRequiredParameter(String),

    #[error("Unknown data field: [{0}]")]
    #[diagnostic(
        code(call::unknown_field),
        help("Request objects use a strict schema; remove fields the operation does not define.")
    )]
    UnknownField(String),

    #[error("Type mismatch for field '{field}': expected {expected}")]
    #[diagnostic(code(call::type_mismatch))]
    TypeMismatch { field: String, expected: String },

    #[error("Execution of '{operation}' failed: {message}")]
    #[diagnostic(
        code(call::execution_failure),
        help("The process primitive reported an error. Check the executable, output file and directory.")
    )]
    ExecutionFailure { operation: String, message: String },

    #[error("Unknown operation: [{0}]")]
    #[diagnostic(code(call::unknown_operation))]
    UnknownOperation(String),
}

impl CallError {
    #[inline]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    #[inline]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingRequiredParameter(name.into())
    }

    #[inline]
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    #[inline]
    pub fn type_mismatch(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
        }
    }

    #[inline]
    pub fn execution(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailure {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Stable classification of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::MissingRequiredParameter(_) => ErrorKind::MissingRequiredParameter,
            Self::UnknownField(_) => ErrorKind::UnknownField,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::ExecutionFailure { .. } => ErrorKind::ExecutionFailure,
            Self::UnknownOperation(_) => ErrorKind::UnknownOperation,
        }
    }

    /// True for errors raised before any OS interaction
    pub const fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::ExecutionFailure { .. } | Self::UnknownOperation(_)
        )
    }
}

/// Error classification carried by caller-facing failures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    MissingRequiredParameter,
    UnknownField,
    TypeMismatch,
    ExecutionFailure,
    UnknownOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::MissingRequiredParameter => "missing_required_parameter",
            Self::UnknownField => "unknown_field",
            Self::TypeMismatch => "type_mismatch",
            Self::ExecutionFailure => "execution_failure",
            Self::UnknownOperation => "unknown_operation",
        };
        f.write_str(name)
    }
}
