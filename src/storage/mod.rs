/*!
 * Storage Module
 * Persistent policy store boundary and bundled implementations
 */

pub mod json;
pub mod memory;
pub mod traits;
pub mod types;

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use traits::PolicyStore;
pub use types::{PolicyRow, StoreError, StoreResult};
