/*!
 * UID Resolution Cache
 * Derived uid -> process-pattern index, rebuilt from filesystem ownership
 */

use super::store::DenyListStore;
use super::types::PolicyEntry;
use crate::core::types::Uid;
use ahash::RandomState;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

/// Index from UID to the process names that UID must hide from
///
/// Fully rebuilt after every denylist mutation and on enforcement enable;
/// never patched in place. The isolated slot aggregates every isolated
/// entry's pattern and is seeded once, independent of how many user profiles
/// are installed.
#[derive(Debug, Default)]
pub struct UidProcessMap {
    isolated: Vec<String>,
    uids: HashMap<Uid, Vec<String>, RandomState>,
}

impl UidProcessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh map from the active entries and the per-user app-data
    /// tree rooted at `app_data_dir`.
    ///
    /// For every user profile and every normal entry, the package's data
    /// directory is stat-ed; when it exists, the entry's process name is
    /// recorded under the directory's owning UID. Packages not installed for
    /// a profile are expected and skipped. An unreadable root yields an
    /// empty map.
    pub fn rebuild(store: &DenyListStore, app_data_dir: &Path) -> Self {
        let mut map = Self::new();

        for (index, user_dir) in user_profiles(app_data_dir).iter().enumerate() {
            if index == 0 {
                for entry in store.iter() {
                    if let PolicyEntry::Isolated { pattern } = entry {
                        map.isolated.push(pattern.clone());
                    }
                }
            }
            for entry in store.iter() {
                let PolicyEntry::Normal { package, process } = entry else {
                    continue;
                };
                match fs::metadata(user_dir.join(package)) {
                    Ok(meta) => {
                        map.uids.entry(meta.uid()).or_default().push(process.clone());
                    }
                    Err(_) => {
                        debug!(
                            "Package {} not installed under {}",
                            package,
                            user_dir.display()
                        );
                    }
                }
            }
        }

        map
    }

    /// Whether `name` starts with any isolated pattern
    pub fn isolated_matches(&self, name: &str) -> bool {
        self.isolated.iter().any(|pattern| name.starts_with(pattern))
    }

    /// Whether `uid` must hide from a process named exactly `name`
    pub fn uid_matches(&self, uid: Uid, name: &str) -> bool {
        self.uids
            .get(&uid)
            .is_some_and(|patterns| patterns.iter().any(|p| p == name))
    }

    pub fn isolated_patterns(&self) -> &[String] {
        &self.isolated
    }

    pub fn tracked_uids(&self) -> usize {
        self.uids.len()
    }
}

/// Numeric user-profile directories under the app-data root, user 0 first
fn user_profiles(app_data_dir: &Path) -> Vec<std::path::PathBuf> {
    let Ok(read) = fs::read_dir(app_data_dir) else {
        return Vec::new();
    };
    let mut profiles: Vec<(u32, std::path::PathBuf)> = read
        .flatten()
        .filter_map(|entry| {
            let user: u32 = entry.file_name().to_str()?.parse().ok()?;
            entry.path().is_dir().then(|| (user, entry.path()))
        })
        .collect();
    profiles.sort_by_key(|(user, _)| *user);
    profiles.into_iter().map(|(_, path)| path).collect()
}
