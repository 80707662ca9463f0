/*!
 * Validation Layer
 *
 * Converts untrusted input into typed values before any OS interaction:
 * - `raw`: buffer+length parameters of the low-level boundary
 * - `args`: the argument vector's JSON array representation
 * - `fields`: strict, ordered JSON object fields
 * - `calls`: per-operation JSON payload schemas
 */

pub mod args;
pub mod calls;
pub mod fields;
pub mod raw;

pub use args::{decode_args, encode_args};
pub use calls::{expect_no_fields, KillCall, ShellCall, SpawnCall};
pub use fields::{parse_object, parse_optional_object, Field, Fields};
pub use raw::{validate_pid, LengthRule, RawParam};
