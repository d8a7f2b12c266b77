/*!
 * Core Module
 * Shared types, errors, and configuration
 */

pub mod config;
pub mod errors;
pub mod types;

pub use config::DenylistConfig;
pub use errors::{AddError, AddResult, EnableError, EnableResult, RemoveError, RemoveResult, StoreError};
pub use types::{is_isolated_uid, Pid, Uid, ISOLATED_UID_FLOOR, UIDS_PER_USER};
