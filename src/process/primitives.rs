/*!
 * Process Primitives
 * The OS-facing operations the dispatcher relies on
 */

use super::types::{KillStatus, SpawnRequest};
use crate::core::types::{ExitCode, Pid};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a process primitive
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PrimitiveError {
    #[error("Cannot open output file '{}': {source}", path.display())]
    OutputSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot wait for process {pid}: {source}")]
    Wait {
        pid: Pid,
        #[source]
        source: io::Error,
    },

    #[error("Cannot determine current process ID: {0}")]
    CurrentPid(String),

    #[error("Cannot attempt to kill process {pid}: {reason}")]
    Kill { pid: Pid, reason: String },
}

/// Platform process operations
///
/// Implementations perform the actual system calls; the dispatcher only
/// chooses which one to call. Output redirection handles are owned and closed
/// by the implementation.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessPrimitives: Send + Sync {
    /// Start the child with stdout/stderr redirected and block until it exits.
    /// Returns the child's PID.
    fn spawn_sync(&self, request: &SpawnRequest) -> Result<Pid, PrimitiveError>;

    /// Start the child with stdout/stderr redirected and return immediately.
    fn spawn_async(&self, request: &SpawnRequest) -> Result<Pid, PrimitiveError>;

    /// Run `command` through the platform shell and return its exit code.
    fn spawn_shell(&self, command: &str) -> Result<ExitCode, PrimitiveError>;

    /// PID of the calling process.
    fn current_pid(&self) -> Result<Pid, PrimitiveError>;

    /// Request termination of `pid`; OS refusals are reported as `KillStatus::Failed`.
    fn kill(&self, pid: Pid) -> Result<KillStatus, PrimitiveError>;
}
