/*!
 * JSON Policy Store
 * Durable policy document on the local filesystem
 */

use super::traits::PolicyStore;
use super::types::{PolicyRow, StoreError, StoreResult};
use log::warn;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The on-disk document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PolicyDocument {
    #[serde(default)]
    entries: Vec<PolicyRow>,
    #[serde(default)]
    flags: HashMap<String, bool>,
}

/// Policy store persisted as a JSON document
///
/// Writes go through a temp file and rename so a crash mid-write never leaves
/// a truncated document behind.
pub struct JsonStore {
    path: PathBuf,
    // Serializes read-modify-write cycles between daemon threads
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Open a store at `path`, creating parent directories as needed.
    /// A missing file reads as an empty document.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<PolicyDocument> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PolicyDocument::default())
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, doc: &PolicyDocument) -> StoreResult<()> {
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(doc)?;
        fs::write(&tmp, bytes)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            // Leave no stale temp file behind on failure
            if let Err(rm) = fs::remove_file(&tmp) {
                warn!("Failed to clean up temp policy file: {}", rm);
            }
            return Err(e.into());
        }
        Ok(())
    }
}

impl PolicyStore for JsonStore {
    fn load_entries(&self) -> StoreResult<Vec<PolicyRow>> {
        Ok(self.load()?.entries)
    }

    fn insert_entry(&self, row: &PolicyRow) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let mut doc = self.load()?;
        if !doc.entries.contains(row) {
            doc.entries.push(row.clone());
            self.save(&doc)?;
        }
        Ok(())
    }

    fn remove_entries(&self, package: &str, process: Option<&str>) -> StoreResult<usize> {
        let _guard = self.write_lock.lock();
        let mut doc = self.load()?;
        let before = doc.entries.len();
        doc.entries.retain(|row| {
            row.package != package || process.is_some_and(|p| row.process != p)
        });
        let removed = before - doc.entries.len();
        if removed > 0 {
            self.save(&doc)?;
        }
        Ok(removed)
    }

    fn get_flag(&self, key: &str) -> StoreResult<Option<bool>> {
        Ok(self.load()?.flags.get(key).copied())
    }

    fn set_flag(&self, key: &str, value: bool) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let mut doc = self.load()?;
        doc.flags.insert(key.to_string(), value);
        self.save(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> JsonStore {
        JsonStore::open(dir.path().join("policy.json")).unwrap()
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.load_entries().unwrap().is_empty());
        assert_eq!(store.get_flag("denylist_config").unwrap(), None);
    }

    #[test]
    fn test_rows_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_store(&dir);
            store
                .insert_entry(&PolicyRow::new("com.foo", "com.foo"))
                .unwrap();
            store.set_flag("denylist_config", true).unwrap();
        }

        let store = open_store(&dir);
        let rows = store.load_entries().unwrap();
        assert_eq!(rows, vec![PolicyRow::new("com.foo", "com.foo")]);
        assert_eq!(store.get_flag("denylist_config").unwrap(), Some(true));
    }

    #[test]
    fn test_remove_bulk() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        store
            .insert_entry(&PolicyRow::new("com.foo", "com.foo"))
            .unwrap();
        store
            .insert_entry(&PolicyRow::new("com.foo", "com.foo:push"))
            .unwrap();
        store
            .insert_entry(&PolicyRow::new("com.bar", "com.bar"))
            .unwrap();

        assert_eq!(store.remove_entries("com.foo", None).unwrap(), 2);
        assert_eq!(store.load_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("policy.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = JsonStore::open(&path).unwrap();
        let err = store.load_entries().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
