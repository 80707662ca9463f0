/*!
 * Process Request Types
 * Validated, strongly-typed requests consumed by the dispatcher
 */

use crate::core::types::Pid;
use std::fmt;
use std::path::PathBuf;

/// Validated request to spawn a child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    /// Program to execute (non-empty)
    pub executable: String,
    /// Argument vector, in order, excluding the program name
    pub args: Vec<String>,
    /// File receiving the child's stdout and stderr (created or truncated)
    pub output_sink: PathBuf,
    /// Initial working directory; `None` inherits the caller's
    pub working_directory: Option<PathBuf>,
    /// Block until the child exits
    pub await_exit: bool,
}

impl SpawnRequest {
    pub fn new(executable: impl Into<String>, output_sink: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: Vec::new(),
            output_sink: output_sink.into(),
            working_directory: None,
            await_exit: false,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the working directory; an empty path means inherit
    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.working_directory = if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir)
        };
        self
    }

    pub fn with_await_exit(mut self, await_exit: bool) -> Self {
        self.await_exit = await_exit;
        self
    }
}

/// Validated request to run a command through the platform shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSpawnRequest {
    /// Passed verbatim to the interpreter
    pub command: String,
}

/// Validated request to terminate a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillRequest {
    pub pid: Pid,
}

/// Outcome of a kill attempt
///
/// A refused or failed kill is data, not an error: the caller usually wants
/// to tell "already gone" apart from a malformed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillStatus {
    Killed,
    Failed(String),
}

impl KillStatus {
    /// Build from a legacy status message (empty means success)
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self::Killed
        } else {
            Self::Failed(message)
        }
    }

    /// Legacy status message: empty on success, the reason otherwise
    pub fn message(&self) -> &str {
        match self {
            Self::Killed => "",
            Self::Failed(reason) => reason,
        }
    }

    pub fn is_killed(&self) -> bool {
        matches!(self, Self::Killed)
    }
}

impl fmt::Display for KillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Killed => f.write_str("killed"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
