/*!
 * Process Dispatcher
 * Chooses the primitive and execution mode for each validated request
 */

use super::primitives::ProcessPrimitives;
use super::types::{KillRequest, KillStatus, ShellSpawnRequest, SpawnRequest};
use crate::core::errors::CallError;
use crate::core::types::{CallResult, ExitCode, Pid};
use crate::monitoring::span_operation;
use std::sync::Arc;
use tracing::{debug, error};

pub const OP_SPAWN: &str = "process_spawn";
pub const OP_SPAWN_SHELL: &str = "process_spawn_shell";
pub const OP_CURRENT_PID: &str = "process_current_pid";
pub const OP_KILL_BY_PID: &str = "process_kill_by_pid";

/// Dispatches validated requests to the process primitives
///
/// Stateless: nothing about a spawned child is retained after the call returns.
#[derive(Clone)]
pub struct ProcessDispatcher {
    primitives: Arc<dyn ProcessPrimitives>,
}

impl ProcessDispatcher {
    pub fn new(primitives: Arc<dyn ProcessPrimitives>) -> Self {
        Self { primitives }
    }

    /// Spawn a child, blocking until exit when `await_exit` is set
    ///
    /// Returns the child's PID in both modes.
    pub fn spawn(&self, request: &SpawnRequest) -> CallResult<Pid> {
        let span = span_operation(OP_SPAWN);
        let _guard = span.enter();

        debug!(
            executable = %request.executable,
            args = ?request.args,
            output_file = %request.output_sink.display(),
            directory = ?request.working_directory,
            await_exit = request.await_exit,
            "Spawning process"
        );

        let result = if request.await_exit {
            self.primitives.spawn_sync(request)
        } else {
            self.primitives.spawn_async(request)
        };

        match result {
            Ok(pid) => {
                span.record_pid(pid);
                span.record_result(true);
                debug!(pid, "Process spawn complete");
                Ok(pid)
            }
            Err(e) => {
                let message = format!(
                    "executable: [{}], output_file: [{}], directory: [{}], await_exit: [{}]: {}",
                    request.executable,
                    request.output_sink.display(),
                    request
                        .working_directory
                        .as_deref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_default(),
                    request.await_exit,
                    e
                );
                error!(error = %e, executable = %request.executable, "Process spawn failed");
                span.record_error(&message);
                Err(CallError::execution(OP_SPAWN, message))
            }
        }
    }

    /// Run a command through the shell and return its exit code
    pub fn spawn_shell(&self, request: &ShellSpawnRequest) -> CallResult<ExitCode> {
        let span = span_operation(OP_SPAWN_SHELL);
        let _guard = span.enter();
        debug!(command = %request.command, "Spawning shell process");

        match self.primitives.spawn_shell(&request.command) {
            Ok(code) => {
                span.record_code(code);
                span.record_result(true);
                debug!(code, "Shell spawn complete");
                Ok(code)
            }
            Err(e) => {
                let message = format!("command: [{}]: {}", request.command, e);
                error!(error = %e, "Shell spawn failed");
                span.record_error(&message);
                Err(CallError::execution(OP_SPAWN_SHELL, message))
            }
        }
    }

    /// PID of the calling process
    pub fn current_pid(&self) -> CallResult<Pid> {
        let span = span_operation(OP_CURRENT_PID);
        let _guard = span.enter();

        match self.primitives.current_pid() {
            Ok(pid) => {
                span.record_pid(pid);
                span.record_result(true);
                debug!(pid, "PID obtained");
                Ok(pid)
            }
            Err(e) => {
                error!(error = %e, "Cannot obtain current PID");
                span.record_error(&e.to_string());
                Err(CallError::execution(OP_CURRENT_PID, e.to_string()))
            }
        }
    }

    /// Request termination of a process
    ///
    /// OS refusals come back as `KillStatus::Failed`, forwarded uninterpreted.
    pub fn kill_by_pid(&self, request: &KillRequest) -> CallResult<KillStatus> {
        let span = span_operation(OP_KILL_BY_PID);
        let _guard = span.enter();
        span.record_pid(request.pid);
        debug!(pid = request.pid, "Killing process");

        match self.primitives.kill(request.pid) {
            Ok(status) => {
                span.record_result(true);
                debug!(pid = request.pid, status = %status, "Process kill performed");
                Ok(status)
            }
            Err(e) => {
                let message = format!("pid: [{}]: {}", request.pid, e);
                error!(error = %e, pid = request.pid, "Process kill could not be attempted");
                span.record_error(&message);
                Err(CallError::execution(OP_KILL_BY_PID, message))
            }
        }
    }
}

impl std::fmt::Debug for ProcessDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessDispatcher").finish_non_exhaustive()
    }
}
