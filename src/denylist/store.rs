/*!
 * DenyList Store
 * The in-memory set of active policy entries
 */

use super::types::PolicyEntry;
use std::collections::BTreeSet;

/// The authoritative set of active denylist entries
///
/// Ordered so `list` output is deterministic. Exists only while enforcement
/// is enabled; the engine guards every access with its lock.
#[derive(Debug, Default)]
pub struct DenyListStore {
    entries: BTreeSet<PolicyEntry>,
}

impl DenyListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; `false` if the exact entry is already present
    pub fn insert(&mut self, entry: PolicyEntry) -> bool {
        self.entries.insert(entry)
    }

    /// Remove entries for a package. `None` process removes every entry whose
    /// wire-form package column matches. Returns how many were removed.
    pub fn remove(&mut self, package: &str, process: Option<&str>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| {
            entry.package() != package || process.is_some_and(|p| entry.process() != p)
        });
        before - self.entries.len()
    }

    pub fn contains(&self, entry: &PolicyEntry) -> bool {
        self.entries.contains(entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolicyEntry> {
        self.entries.iter()
    }

    /// Copy of the current entries, in stable order
    pub fn snapshot(&self) -> Vec<PolicyEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::denylist::types::ISOLATED_MAGIC;

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let mut store = DenyListStore::new();
        assert!(store.insert(PolicyEntry::from_parts("com.foo", "com.foo")));
        assert!(!store.insert(PolicyEntry::from_parts("com.foo", "com.foo")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_same_package_different_process_coexist() {
        let mut store = DenyListStore::new();
        assert!(store.insert(PolicyEntry::from_parts("com.foo", "com.foo")));
        assert!(store.insert(PolicyEntry::from_parts("com.foo", "com.foo:push")));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_bulk_remove_by_package() {
        let mut store = DenyListStore::new();
        store.insert(PolicyEntry::from_parts("com.foo", "com.foo"));
        store.insert(PolicyEntry::from_parts("com.foo", "com.foo:push"));
        store.insert(PolicyEntry::from_parts("com.bar", "com.bar"));

        assert_eq!(store.remove("com.foo", None), 2);
        assert_eq!(store.len(), 1);
        assert!(store.contains(&PolicyEntry::from_parts("com.bar", "com.bar")));
    }

    #[test]
    fn test_remove_specific_process() {
        let mut store = DenyListStore::new();
        store.insert(PolicyEntry::from_parts("com.foo", "com.foo"));
        store.insert(PolicyEntry::from_parts("com.foo", "com.foo:push"));

        assert_eq!(store.remove("com.foo", Some("com.foo:push")), 1);
        assert_eq!(store.remove("com.foo", Some("com.foo:push")), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_bulk_remove_covers_isolated_entries() {
        let mut store = DenyListStore::new();
        store.insert(PolicyEntry::from_parts(ISOLATED_MAGIC, "com.foo:iso"));
        store.insert(PolicyEntry::from_parts(ISOLATED_MAGIC, "com.bar:iso"));

        assert_eq!(store.remove(ISOLATED_MAGIC, Some("com.foo:iso")), 1);
        assert_eq!(store.remove(ISOLATED_MAGIC, None), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_is_ordered() {
        let mut store = DenyListStore::new();
        store.insert(PolicyEntry::from_parts("com.b", "com.b"));
        store.insert(PolicyEntry::from_parts("com.a", "com.a"));

        let listed: Vec<String> = store.snapshot().iter().map(|e| e.to_string()).collect();
        assert_eq!(listed, vec!["com.a|com.a", "com.b|com.b"]);
    }
}
