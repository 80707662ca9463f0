/*!
 * OS Process Primitives
 * std::process based spawning, nix based signal delivery
 */

use super::primitives::{PrimitiveError, ProcessPrimitives};
use super::types::{KillStatus, SpawnRequest};
use crate::core::limits::UNKNOWN_EXIT_CODE;
use crate::core::types::{ExitCode, Pid};
use std::fs::File;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use tracing::{debug, warn};

/// Process primitives backed by the host operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsPrimitives;

impl OsPrimitives {
    pub fn new() -> Self {
        Self
    }

    /// Build the command with both output streams sharing one file description
    fn command(request: &SpawnRequest) -> Result<Command, PrimitiveError> {
        let sink_error = |source| PrimitiveError::OutputSink {
            path: request.output_sink.clone(),
            source,
        };

        let stdout = File::create(&request.output_sink).map_err(sink_error)?;
        let stderr = stdout.try_clone().map_err(sink_error)?;

        let mut cmd = Command::new(&request.executable);
        cmd.args(&request.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr);

        if let Some(ref dir) = request.working_directory {
            cmd.current_dir(dir);
        }

        Ok(cmd)
    }

    fn start(request: &SpawnRequest) -> Result<Child, PrimitiveError> {
        // The Command (and the parent's copies of the sink) is dropped on return
        Self::command(request)?
            .spawn()
            .map_err(|source| PrimitiveError::Spawn {
                command: request.executable.clone(),
                source,
            })
    }
}

impl ProcessPrimitives for OsPrimitives {
    fn spawn_sync(&self, request: &SpawnRequest) -> Result<Pid, PrimitiveError> {
        let mut child = Self::start(request)?;
        let pid = child.id();
        debug!(pid, executable = %request.executable, "Child started, waiting for exit");

        let status = child
            .wait()
            .map_err(|source| PrimitiveError::Wait { pid, source })?;
        debug!(pid, code = exit_code(status), "Child exited");

        Ok(pid)
    }

    fn spawn_async(&self, request: &SpawnRequest) -> Result<Pid, PrimitiveError> {
        let mut child = Self::start(request)?;
        let pid = child.id();
        debug!(pid, executable = %request.executable, "Child started detached");

        // Nothing else holds the handle; the reaper collects the exit status
        let reaper = thread::Builder::new()
            .name(format!("reaper-{}", pid))
            .spawn(move || match child.wait() {
                Ok(status) => debug!(pid, code = exit_code(status), "Detached child exited"),
                Err(e) => warn!(pid, error = %e, "Failed to reap detached child"),
            });

        if let Err(e) = reaper {
            warn!(pid, error = %e, "Could not start reaper thread, child left unreaped");
        }

        Ok(pid)
    }

    fn spawn_shell(&self, command: &str) -> Result<ExitCode, PrimitiveError> {
        let status = shell_command(command)
            .status()
            .map_err(|source| PrimitiveError::Spawn {
                command: command.to_string(),
                source,
            })?;
        Ok(exit_code(status))
    }

    fn current_pid(&self) -> Result<Pid, PrimitiveError> {
        Ok(std::process::id())
    }

    #[cfg(unix)]
    fn kill(&self, pid: Pid) -> Result<KillStatus, PrimitiveError> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid as NixPid;

        let raw = i32::try_from(pid)
            .ok()
            .filter(|raw| *raw > 0)
            .ok_or_else(|| PrimitiveError::Kill {
                pid,
                reason: "PID outside the positive signed 32-bit range".to_string(),
            })?;

        match kill(NixPid::from_raw(raw), Signal::SIGKILL) {
            Ok(()) => Ok(KillStatus::Killed),
            Err(errno) => Ok(KillStatus::Failed(errno.desc().to_string())),
        }
    }

    #[cfg(not(unix))]
    fn kill(&self, pid: Pid) -> Result<KillStatus, PrimitiveError> {
        let output = Command::new("taskkill")
            .args(["/F", "/PID", &pid.to_string()])
            .output()
            .map_err(|e| PrimitiveError::Kill {
                pid,
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(KillStatus::Killed);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.is_empty() {
            Ok(KillStatus::Failed(format!("taskkill exited with {}", output.status)))
        } else {
            Ok(KillStatus::Failed(stderr))
        }
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(not(unix))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Exit code as a shell would report it
fn exit_code(status: ExitStatus) -> ExitCode {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use crate::core::limits::SIGNAL_EXIT_CODE_BASE;
        use std::os::unix::process::ExitStatusExt;

        if let Some(signal) = status.signal() {
            return SIGNAL_EXIT_CODE_BASE + signal;
        }
    }

    UNKNOWN_EXIT_CODE
}
