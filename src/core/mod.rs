/*!
 * Core Module
 * Shared types, errors, limits, configuration and serialization
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod serialization;
pub mod types;

pub use config::{CallConfig, ResponseShape};
pub use errors::{CallError, ErrorKind};
pub use types::{CallResult, ExitCode, Pid};
