/*!
 * Process Calls Library
 * Process lifecycle operations exposed as validated named calls
 */

pub mod api;
pub mod calls;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod validation;

// Re-exports
pub use api::{ProcessApi, SpawnParams};
pub use calls::{
    process_registry, register_process_calls, CallFailure, CallHandler, CallRegistry,
    CallResponse,
};
pub use crate::core::{CallConfig, CallError, CallResult, ErrorKind, ExitCode, Pid, ResponseShape};
pub use monitoring::{init_tracing, span_operation};
pub use process::{
    KillStatus, OsPrimitives, ProcessDispatcher, ProcessPrimitives, OP_CURRENT_PID,
    OP_KILL_BY_PID, OP_SPAWN, OP_SPAWN_SHELL,
};
pub use validation::{LengthRule, RawParam};
