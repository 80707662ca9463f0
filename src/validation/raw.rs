/*!
 * Raw Parameter Validation
 * Buffer+length pairs as they cross the low-level boundary
 */

use crate::core::errors::CallError;
use crate::core::limits::{MAX_PID, MIN_PID};
use crate::core::types::{CallResult, Pid};

/// Whether a zero length is acceptable for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    /// `1..=max`
    Positive,
    /// `0..=max`; the empty string is a meaningful value
    AllowEmpty,
}

/// A buffer and its declared length
///
/// `data: None` is a null buffer. `len` is the caller's claim and is checked
/// against both the configured bound and the buffer actually supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParam<'a> {
    data: Option<&'a [u8]>,
    len: i32,
}

impl<'a> RawParam<'a> {
    pub const fn new(data: Option<&'a [u8]>, len: i32) -> Self {
        Self { data, len }
    }

    pub const fn null() -> Self {
        Self { data: None, len: 0 }
    }

    /// Wrap a string with its exact length
    ///
    /// Strings longer than `i32::MAX` keep `i32::MAX` as the declared length and
    /// fail the bound check.
    pub fn from_text(s: &'a str) -> Self {
        Self {
            data: Some(s.as_bytes()),
            len: i32::try_from(s.len()).unwrap_or(i32::MAX),
        }
    }

    /// Validate and borrow the parameter as UTF-8
    pub fn require(&self, name: &str, rule: LengthRule, max_len: usize) -> CallResult<&'a str> {
        let data = self.data.ok_or_else(|| {
            CallError::invalid_argument(format!("Null '{}' parameter specified", name))
        })?;

        let min = match rule {
            LengthRule::Positive => 1,
            LengthRule::AllowEmpty => 0,
        };
        let len = usize::try_from(self.len)
            .ok()
            .filter(|len| *len >= min && *len <= max_len)
            .ok_or_else(|| {
                CallError::invalid_argument(format!(
                    "Invalid '{}_len' parameter specified: [{}]",
                    name, self.len
                ))
            })?;

        let bytes = data.get(..len).ok_or_else(|| {
            CallError::invalid_argument(format!(
                "Invalid '{}_len' parameter specified: [{}], buffer holds [{}] bytes",
                name,
                self.len,
                data.len()
            ))
        })?;

        std::str::from_utf8(bytes).map_err(|e| {
            CallError::invalid_argument(format!(
                "Invalid '{}' parameter specified: not valid UTF-8 ({})",
                name, e
            ))
        })
    }
}

/// Validate a PID crossing the boundary
pub fn validate_pid(pid: i64) -> CallResult<Pid> {
    if !(MIN_PID..=MAX_PID).contains(&pid) {
        return Err(CallError::invalid_argument(format!(
            "Invalid 'pid' parameter specified: [{}]",
            pid
        )));
    }
    Pid::try_from(pid).map_err(|_| {
        CallError::invalid_argument(format!("Invalid 'pid' parameter specified: [{}]", pid))
    })
}
