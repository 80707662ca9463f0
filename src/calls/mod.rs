/*!
 * Calls Module
 * Named JSON operations dispatched through an explicit registry
 */

mod process_calls;
mod registry;

pub use process_calls::{process_registry, register_process_calls};
pub use registry::{CallFailure, CallHandler, CallRegistry, CallResponse};
