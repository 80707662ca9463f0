/*!
 * Call Payload Validation
 * Schemas of the four JSON-object entry points
 */

use super::fields::{parse_object, parse_optional_object};
use crate::core::errors::CallError;
use crate::core::types::{CallResult, Pid};

pub const FIELD_EXECUTABLE: &str = "executable";
pub const FIELD_ARGS: &str = "args";
pub const FIELD_OUTPUT_FILE: &str = "outputFile";
pub const FIELD_DIRECTORY: &str = "directory";
pub const FIELD_AWAIT_EXIT: &str = "awaitExit";
pub const FIELD_COMMAND: &str = "command";
pub const FIELD_PID: &str = "pid";

/// Parsed spawn payload, still in boundary representation
///
/// `args_json` is the compact JSON array string handed to the low-level
/// boundary; `directory` is empty when the caller's directory is inherited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnCall {
    pub executable: String,
    pub args_json: String,
    pub output_file: String,
    pub directory: String,
    pub await_exit: bool,
}

impl SpawnCall {
    pub fn from_json(payload: &[u8]) -> CallResult<Self> {
        let fields = parse_object(payload)?;

        let mut executable = None;
        let mut args_json = None;
        let mut output_file = None;
        let mut directory = String::new();
        let mut await_exit = false;

        for field in &fields {
            match field.name() {
                FIELD_EXECUTABLE => executable = Some(field.as_string_nonempty()?.to_string()),
                FIELD_ARGS => args_json = Some(field.as_args_json()?),
                FIELD_OUTPUT_FILE => output_file = Some(field.as_string_nonempty()?.to_string()),
                FIELD_DIRECTORY => directory = field.as_string()?.to_string(),
                FIELD_AWAIT_EXIT => await_exit = field.as_bool()?,
                _ => return Err(field.unknown()),
            }
        }

        Ok(Self {
            executable: executable.ok_or_else(|| CallError::missing(FIELD_EXECUTABLE))?,
            args_json: args_json.ok_or_else(|| CallError::missing(FIELD_ARGS))?,
            output_file: output_file.ok_or_else(|| CallError::missing(FIELD_OUTPUT_FILE))?,
            directory,
            await_exit,
        })
    }
}

/// Parsed spawn-shell payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCall {
    pub command: String,
}

impl ShellCall {
    pub fn from_json(payload: &[u8]) -> CallResult<Self> {
        let fields = parse_object(payload)?;
        let mut command = None;

        for field in &fields {
            match field.name() {
                FIELD_COMMAND => command = Some(field.as_string_nonempty()?.to_string()),
                _ => return Err(field.unknown()),
            }
        }

        Ok(Self {
            command: command.ok_or_else(|| CallError::missing(FIELD_COMMAND))?,
        })
    }
}

/// Parsed kill-by-pid payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillCall {
    pub pid: Pid,
}

impl KillCall {
    pub fn from_json(payload: &[u8]) -> CallResult<Self> {
        let fields = parse_object(payload)?;
        let mut pid = None;

        for field in &fields {
            match field.name() {
                FIELD_PID => pid = Some(field.as_pid()?),
                _ => return Err(field.unknown()),
            }
        }

        Ok(Self {
            pid: pid.ok_or_else(|| CallError::missing(FIELD_PID))?,
        })
    }
}

/// Validate the (empty) current-pid payload
pub fn expect_no_fields(payload: &[u8]) -> CallResult<()> {
    let fields = parse_optional_object(payload)?;
    match fields.iter().next() {
        Some(field) => Err(field.unknown()),
        None => Ok(()),
    }
}
