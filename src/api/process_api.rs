/*!
 * Process API
 *
 * Low-level boundary over raw buffer+length parameters. Every operation is a
 * pure `validate_*` step producing a typed request, followed by execution
 * through the dispatcher. Nothing reaches the OS unless validation passed.
 */

use crate::core::config::CallConfig;
use crate::core::types::{CallResult, ExitCode, Pid};
use crate::process::{
    KillRequest, KillStatus, OsPrimitives, ProcessDispatcher, ProcessPrimitives,
    ShellSpawnRequest, SpawnRequest,
};
use crate::validation::{decode_args, validate_pid, LengthRule, RawParam};
use std::sync::Arc;
use tracing::warn;

pub const PARAM_EXECUTABLE: &str = "executable";
pub const PARAM_ARGS_LIST_JSON: &str = "args_list_json";
pub const PARAM_OUTPUT_FILE: &str = "output_file";
pub const PARAM_DIRECTORY: &str = "directory";
pub const PARAM_COMMAND: &str = "command";

/// Raw parameters of a spawn
///
/// `directory` is always present; an empty value inherits the caller's
/// working directory.
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams<'a> {
    pub executable: RawParam<'a>,
    pub args_list_json: RawParam<'a>,
    pub output_file: RawParam<'a>,
    pub directory: RawParam<'a>,
    pub await_exit: bool,
}

/// Validate-then-execute process operations
#[derive(Debug, Clone)]
pub struct ProcessApi {
    dispatcher: ProcessDispatcher,
    max_param_len: usize,
}

impl ProcessApi {
    pub fn new(primitives: Arc<dyn ProcessPrimitives>, config: &CallConfig) -> Self {
        Self {
            dispatcher: ProcessDispatcher::new(primitives),
            max_param_len: config.max_param_len,
        }
    }

    /// API over the host operating system
    pub fn with_os(config: &CallConfig) -> Self {
        Self::new(Arc::new(OsPrimitives::new()), config)
    }

    pub fn max_param_len(&self) -> usize {
        self.max_param_len
    }

    /// Dispatcher for requests that already passed `validate_*`
    pub fn dispatcher(&self) -> &ProcessDispatcher {
        &self.dispatcher
    }

    pub fn validate_spawn(&self, params: &SpawnParams<'_>) -> CallResult<SpawnRequest> {
        let max = self.max_param_len;
        let executable = params
            .executable
            .require(PARAM_EXECUTABLE, LengthRule::Positive, max)?;
        let args_json = params
            .args_list_json
            .require(PARAM_ARGS_LIST_JSON, LengthRule::Positive, max)?;
        let output_file = params
            .output_file
            .require(PARAM_OUTPUT_FILE, LengthRule::Positive, max)?;
        let directory = params
            .directory
            .require(PARAM_DIRECTORY, LengthRule::AllowEmpty, max)?;
        let args = decode_args(PARAM_ARGS_LIST_JSON, args_json)?;

        Ok(SpawnRequest::new(executable, output_file)
            .with_args(args)
            .with_working_directory(directory)
            .with_await_exit(params.await_exit))
    }

    /// Spawn a process, returning its PID
    pub fn spawn(&self, params: &SpawnParams<'_>) -> CallResult<Pid> {
        let request = self.validate_spawn(params).inspect_err(|e| {
            warn!(error = %e, "Rejected spawn parameters");
        })?;
        self.dispatcher.spawn(&request)
    }

    pub fn validate_spawn_shell(&self, command: RawParam<'_>) -> CallResult<ShellSpawnRequest> {
        let command = command.require(PARAM_COMMAND, LengthRule::Positive, self.max_param_len)?;
        Ok(ShellSpawnRequest {
            command: command.to_string(),
        })
    }

    /// Run a shell command, returning its exit code
    pub fn spawn_shell(&self, command: RawParam<'_>) -> CallResult<ExitCode> {
        let request = self.validate_spawn_shell(command).inspect_err(|e| {
            warn!(error = %e, "Rejected shell parameters");
        })?;
        self.dispatcher.spawn_shell(&request)
    }

    pub fn current_pid(&self) -> CallResult<Pid> {
        self.dispatcher.current_pid()
    }

    pub fn validate_kill(&self, pid: i64) -> CallResult<KillRequest> {
        Ok(KillRequest {
            pid: validate_pid(pid)?,
        })
    }

    /// Kill a process; OS refusals come back as `KillStatus::Failed`
    pub fn kill_by_pid(&self, pid: i64) -> CallResult<KillStatus> {
        let request = self.validate_kill(pid).inspect_err(|e| {
            warn!(error = %e, "Rejected kill parameters");
        })?;
        self.dispatcher.kill_by_pid(&request)
    }
}
