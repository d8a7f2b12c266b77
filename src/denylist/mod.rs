/*!
 * Denylist Module
 * Policy model, validation, UID resolution, and the enforcement engine
 *
 * The engine decides, for every process on the device, whether it must be
 * prevented from observing root access. Policy is a set of (package,
 * process) rules; enforcement resolves them to UIDs through app-data
 * ownership and kills already-running targets.
 */

pub mod engine;
pub mod response;
pub mod store;
pub mod types;
pub mod uid_map;
pub mod validate;

pub use engine::{DenylistEngine, DENYLIST_FLAG_KEY};
pub use response::DenyResponse;
pub use store::DenyListStore;
pub use types::{PolicyEntry, ISOLATED_MAGIC};
pub use uid_map::UidProcessMap;
pub use validate::validate;
