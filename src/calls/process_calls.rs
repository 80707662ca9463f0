/*!
 * Process Calls
 *
 * The four named process operations of the JSON call surface. Handlers only
 * parse the payload, call the low-level API and package the result.
 */

use super::registry::CallRegistry;
use crate::api::{ProcessApi, SpawnParams};
use crate::core::config::{CallConfig, ResponseShape};
use crate::core::errors::CallError;
use crate::core::serialization::json;
use crate::core::types::{CallResult, ExitCode, Pid};
use crate::process::{OP_CURRENT_PID, OP_KILL_BY_PID, OP_SPAWN, OP_SPAWN_SHELL};
use crate::validation::{expect_no_fields, KillCall, RawParam, ShellCall, SpawnCall};
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize)]
struct PidResponse {
    pid: Pid,
}

#[derive(Debug, Serialize)]
struct CodeResponse {
    code: ExitCode,
}

fn encode<T: Serialize>(operation: &str, value: &T) -> CallResult<Bytes> {
    json::to_bytes(value).map_err(|e| CallError::execution(operation, e.detail()))
}

fn spawn(api: &ProcessApi, shape: ResponseShape, payload: &[u8]) -> CallResult<Bytes> {
    let call = SpawnCall::from_json(payload)?;
    let pid = api.spawn(&SpawnParams {
        executable: RawParam::from_text(&call.executable),
        args_list_json: RawParam::from_text(&call.args_json),
        output_file: RawParam::from_text(&call.output_file),
        directory: RawParam::from_text(&call.directory),
        await_exit: call.await_exit,
    })?;

    match shape {
        ResponseShape::Structured => encode(OP_SPAWN, &PidResponse { pid }),
        ResponseShape::Legacy => encode(OP_SPAWN, &pid),
    }
}

fn spawn_shell(api: &ProcessApi, shape: ResponseShape, payload: &[u8]) -> CallResult<Bytes> {
    let call = ShellCall::from_json(payload)?;
    let code = api.spawn_shell(RawParam::from_text(&call.command))?;

    match shape {
        ResponseShape::Structured => encode(OP_SPAWN_SHELL, &CodeResponse { code }),
        ResponseShape::Legacy => encode(OP_SPAWN_SHELL, &code),
    }
}

fn current_pid(api: &ProcessApi, payload: &[u8]) -> CallResult<Bytes> {
    expect_no_fields(payload)?;
    let pid = api.current_pid()?;
    encode(OP_CURRENT_PID, &PidResponse { pid })
}

/// Raw status bytes; empty when the process was killed
fn kill_by_pid(api: &ProcessApi, payload: &[u8]) -> CallResult<Bytes> {
    let call = KillCall::from_json(payload)?;
    let status = api.kill_by_pid(i64::from(call.pid))?;
    Ok(Bytes::copy_from_slice(status.message().as_bytes()))
}

/// Register the four process operations
pub fn register_process_calls(
    registry: &mut CallRegistry,
    api: Arc<ProcessApi>,
    shape: ResponseShape,
) -> CallResult<()> {
    let handler_api = Arc::clone(&api);
    registry.register(OP_SPAWN, move |payload| spawn(&handler_api, shape, payload))?;

    let handler_api = Arc::clone(&api);
    registry.register(OP_SPAWN_SHELL, move |payload| {
        spawn_shell(&handler_api, shape, payload)
    })?;

    let handler_api = Arc::clone(&api);
    registry.register(OP_CURRENT_PID, move |payload| current_pid(&handler_api, payload))?;

    registry.register(OP_KILL_BY_PID, move |payload| kill_by_pid(&api, payload))?;
    Ok(())
}

/// Build a registry of process operations over the host operating system
pub fn process_registry(config: &CallConfig) -> CallResult<CallRegistry> {
    let mut registry = CallRegistry::new();
    let api = Arc::new(ProcessApi::with_os(config));
    register_process_calls(&mut registry, api, config.response_shape)?;
    info!(
        operations = registry.len(),
        shape = ?config.response_shape,
        "Process calls registered"
    );
    Ok(registry)
}
