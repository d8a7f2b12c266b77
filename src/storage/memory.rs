/*!
 * In-Memory Policy Store
 * Ephemeral store for tests and in-process deployments
 */

use super::traits::PolicyStore;
use super::types::{PolicyRow, StoreError, StoreResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Policy store backed by in-process tables
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<Vec<PolicyRow>>>,
    flags: Arc<RwLock<HashMap<String, bool>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, to exercise persistence-failure paths
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of persisted rows
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("write failure injected".into()));
        }
        Ok(())
    }
}

impl PolicyStore for MemoryStore {
    fn load_entries(&self) -> StoreResult<Vec<PolicyRow>> {
        Ok(self.entries.read().clone())
    }

    fn insert_entry(&self, row: &PolicyRow) -> StoreResult<()> {
        self.check_writable()?;
        let mut entries = self.entries.write();
        if !entries.contains(row) {
            entries.push(row.clone());
        }
        Ok(())
    }

    fn remove_entries(&self, package: &str, process: Option<&str>) -> StoreResult<usize> {
        self.check_writable()?;
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|row| {
            row.package != package || process.is_some_and(|p| row.process != p)
        });
        Ok(before - entries.len())
    }

    fn get_flag(&self, key: &str) -> StoreResult<Option<bool>> {
        Ok(self.flags.read().get(key).copied())
    }

    fn set_flag(&self, key: &str, value: bool) -> StoreResult<()> {
        self.check_writable()?;
        self.flags.write().insert(key.to_string(), value);
        Ok(())
    }
}
