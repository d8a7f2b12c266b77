/*!
 * Rootveil Library
 * Process-visibility denylist engine for a privileged root-management daemon
 */

pub mod core;
pub mod denylist;
pub mod procfs;
pub mod storage;

// Re-exports
pub use crate::core::{AddError, DenylistConfig, EnableError, RemoveError, StoreError};
pub use denylist::{DenyResponse, DenylistEngine, PolicyEntry, ISOLATED_MAGIC};
pub use procfs::{KernelSignaler, NameMatch, ProcDir, SignalSender};
pub use storage::{JsonStore, MemoryStore, PolicyRow, PolicyStore};
