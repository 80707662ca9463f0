/*!
 * Boundary Limits and Constants
 *
 * Centralized bounds for values crossing the call boundary.
 * Lengths are carried as signed 32-bit integers at the raw boundary, so every
 * bound here fits in `i32`.
 */

// =============================================================================
// PARAMETER LENGTHS
// =============================================================================

/// Default maximum length of a raw string parameter (64KB - 1)
/// Guards against garbage lengths crossing the boundary, not a protocol limit
/// [SECURITY]
pub const DEFAULT_MAX_PARAM_LEN: usize = u16::MAX as usize;

/// Upper bound for a configured parameter length
pub const MAX_PARAM_LEN_CEILING: usize = i32::MAX as usize;

// =============================================================================
// PROCESS IDS
// =============================================================================

/// Smallest PID accepted by kill-by-pid
pub const MIN_PID: i64 = 1;

/// Largest PID accepted by kill-by-pid
/// [SECURITY] Anything above would reach kill(2) as a negative process-group target
pub const MAX_PID: i64 = i32::MAX as i64;

// =============================================================================
// CHILD EXIT CODES
// =============================================================================

/// Offset added to a terminating signal number, as shells report it
/// [LINUX-COMPAT]
pub const SIGNAL_EXIT_CODE_BASE: i32 = 128;

/// Exit code reported when the platform gives neither a code nor a signal
pub const UNKNOWN_EXIT_CODE: i32 = -1;
