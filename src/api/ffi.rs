/*!
 * C ABI
 *
 * `extern "C"` rendition of the process API. Strings arrive as pointer+length
 * pairs, results leave through out-pointers, and the return value is NULL on
 * success or an owned NUL-terminated diagnostic. Every string handed out by
 * this module is released with `process_free`.
 */

use super::process_api::{ProcessApi, SpawnParams};
use crate::core::config::CallConfig;
use crate::core::errors::CallError;
use crate::core::types::CallResult;
use crate::validation::RawParam;
use std::ffi::CString;
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::sync::OnceLock;
use tracing::info;

static API: OnceLock<ProcessApi> = OnceLock::new();

fn api() -> &'static ProcessApi {
    API.get_or_init(|| {
        let config = CallConfig::from_env();
        info!(?config, "Initializing process API");
        ProcessApi::with_os(&config)
    })
}

/// Borrow a pointer+length pair
///
/// The buffer is only touched when the declared length is within the bound;
/// otherwise an empty buffer is passed on and the bound check rejects it.
unsafe fn raw_param<'a>(data: *const c_char, len: c_int, max_len: usize) -> RawParam<'a> {
    if data.is_null() {
        return RawParam::new(None, len);
    }
    match usize::try_from(len) {
        Ok(readable) if readable <= max_len => {
            // SAFETY: the caller guarantees `data` points to at least `len` bytes
            let bytes = std::slice::from_raw_parts(data.cast::<u8>(), readable);
            RawParam::new(Some(bytes), len)
        }
        _ => RawParam::new(Some(&[]), len),
    }
}

fn owned_string(text: &str) -> *mut c_char {
    let sanitized = text.replace('\0', " ");
    CString::new(sanitized).unwrap_or_default().into_raw()
}

fn into_message(result: CallResult<()>) -> *mut c_char {
    match result {
        Ok(()) => ptr::null_mut(),
        Err(e) => owned_string(&e.to_string()),
    }
}

/// Validate inputs, check the out-pointer, then execute and store the result
///
/// Input errors take precedence over a null out-pointer; nothing executes
/// unless both checks pass.
unsafe fn validate_then_write<R, T>(
    out: *mut T,
    name: &str,
    validate: impl FnOnce() -> CallResult<R>,
    execute: impl FnOnce(R) -> CallResult<T>,
) -> CallResult<()> {
    let request = validate()?;
    if out.is_null() {
        return Err(CallError::invalid_argument(format!(
            "Null '{}' parameter specified",
            name
        )));
    }
    out.write(execute(request)?);
    Ok(())
}

/// Spawn a process
///
/// # Safety
///
/// Each non-null string pointer must reference at least its declared length
/// of readable bytes. `pid_out` must be null or valid for a `u32` write.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn process_spawn(
    executable: *const c_char,
    executable_len: c_int,
    args_list_json: *const c_char,
    args_list_json_len: c_int,
    output_file: *const c_char,
    output_file_len: c_int,
    directory: *const c_char,
    directory_len: c_int,
    await_exit: bool,
    pid_out: *mut u32,
) -> *mut c_char {
    let api = api();
    let max = api.max_param_len();

    let params = SpawnParams {
        executable: raw_param(executable, executable_len, max),
        args_list_json: raw_param(args_list_json, args_list_json_len, max),
        output_file: raw_param(output_file, output_file_len, max),
        directory: raw_param(directory, directory_len, max),
        await_exit,
    };
    into_message(validate_then_write(
        pid_out,
        "pid_out",
        || api.validate_spawn(&params),
        |request| api.dispatcher().spawn(&request),
    ))
}

/// Run a command through the platform shell
///
/// # Safety
///
/// `command` must be null or reference at least `command_len` readable bytes.
/// `code_out` must be null or valid for an `i32` write.
#[no_mangle]
pub unsafe extern "C" fn process_spawn_shell(
    command: *const c_char,
    command_len: c_int,
    code_out: *mut i32,
) -> *mut c_char {
    let api = api();

    let command = raw_param(command, command_len, api.max_param_len());
    into_message(validate_then_write(
        code_out,
        "code_out",
        || api.validate_spawn_shell(command),
        |request| api.dispatcher().spawn_shell(&request),
    ))
}

/// PID of the calling process
///
/// # Safety
///
/// `pid_out` must be null or valid for a `u32` write.
#[no_mangle]
pub unsafe extern "C" fn process_current_pid(pid_out: *mut u32) -> *mut c_char {
    into_message(validate_then_write(
        pid_out,
        "pid_out",
        || Ok(()),
        |()| api().current_pid(),
    ))
}

/// Kill a process
///
/// On return without error `status_out` holds an owned status string, empty
/// when the process was killed and the OS reason otherwise.
///
/// # Safety
///
/// `status_out` must be null or valid for a pointer write.
#[no_mangle]
pub unsafe extern "C" fn process_kill_by_pid(pid: i64, status_out: *mut *mut c_char) -> *mut c_char {
    let api = api();
    into_message(validate_then_write(
        status_out,
        "status_out",
        || api.validate_kill(pid),
        |request| {
            api.dispatcher()
                .kill_by_pid(&request)
                .map(|status| owned_string(status.message()))
        },
    ))
}

/// Release a string returned by this module
///
/// # Safety
///
/// `text` must be null or a pointer previously returned by this module and
/// not yet released.
#[no_mangle]
pub unsafe extern "C" fn process_free(text: *mut c_char) {
    if !text.is_null() {
        drop(CString::from_raw(text));
    }
}
