/*!
 * Process Module
 * Typed requests, the primitives seam and execution-mode dispatch
 */

pub mod dispatch;
pub mod os;
pub mod primitives;
pub mod types;

pub use dispatch::{
    ProcessDispatcher, OP_CURRENT_PID, OP_KILL_BY_PID, OP_SPAWN, OP_SPAWN_SHELL,
};
pub use os::OsPrimitives;
pub use primitives::{PrimitiveError, ProcessPrimitives};
pub use types::{KillRequest, KillStatus, ShellSpawnRequest, SpawnRequest};
