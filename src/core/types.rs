/*!
 * Core Types
 * Common types used across the call layer
 */

/// OS process ID type
pub type Pid = u32;

/// Process exit code type
pub type ExitCode = i32;

/// Common result type for call-layer operations
pub type CallResult<T> = Result<T, super::errors::CallError>;
