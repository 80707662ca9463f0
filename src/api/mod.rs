/*!
 * API Module
 * Low-level boundary: raw-parameter process API and its C ABI
 */

pub mod ffi;
mod process_api;

pub use process_api::{
    ProcessApi, SpawnParams, PARAM_ARGS_LIST_JSON, PARAM_COMMAND, PARAM_DIRECTORY,
    PARAM_EXECUTABLE, PARAM_OUTPUT_FILE,
};
