/*!
 * Denylist Engine
 * Enforcement state machine and command surface, behind one lock
 */

use super::store::DenyListStore;
use super::types::PolicyEntry;
use super::uid_map::UidProcessMap;
use super::validate::validate;
use crate::core::config::DenylistConfig;
use crate::core::errors::{AddError, AddResult, EnableError, EnableResult, RemoveError, RemoveResult};
use crate::core::types::{is_isolated_uid, Uid};
use crate::procfs::killer::{kill_matching, KernelSignaler};
use crate::procfs::scanner::ProcDir;
use crate::procfs::traits::SignalSender;
use crate::procfs::types::NameMatch;
use crate::storage::traits::PolicyStore;
use crate::storage::types::PolicyRow;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;

/// Key of the persisted enforcement flag
pub const DENYLIST_FLAG_KEY: &str = "denylist_config";

/// Zygote pool processes swept on enable when the capability flag is set
const USAP_POOLS: [&str; 2] = ["usap32", "usap64"];
const APP_ZYGOTE_SUFFIX: &str = "_zygote";

/// Everything the engine lock guards.
///
/// Store, map, and the procfs handle are only ever read or written together,
/// so a denylist mutation can never be observed without its map rebuild.
#[derive(Default)]
struct EngineState {
    enforced: bool,
    entries: Option<DenyListStore>,
    uid_map: Option<UidProcessMap>,
    // Opened on first enable, then kept for the life of the process
    proc: Option<ProcDir>,
}

impl EngineState {
    fn rebuild_uid_map(&mut self, config: &DenylistConfig) {
        if let Some(entries) = &self.entries {
            self.uid_map = Some(UidProcessMap::rebuild(entries, &config.app_data_dir));
        }
    }

    fn kill_entry(&mut self, signaler: &dyn SignalSender, entry: &PolicyEntry) {
        let Some(proc_dir) = self.proc.as_mut() else {
            return;
        };
        match entry {
            PolicyEntry::Normal { process, .. } => {
                kill_matching(proc_dir, signaler, process, NameMatch::Exact, false)
            }
            PolicyEntry::Isolated { pattern } => {
                kill_matching(proc_dir, signaler, pattern, NameMatch::Prefix, true)
            }
        }
    }
}

/// The process-visibility denylist engine
///
/// Constructed once at daemon start and shared as `Arc<DenylistEngine>`
/// across every thread that dispatches client commands or new-process
/// notifications.
pub struct DenylistEngine {
    state: Mutex<EngineState>,
    db: Arc<dyn PolicyStore>,
    signaler: Arc<dyn SignalSender>,
    config: DenylistConfig,
}

impl DenylistEngine {
    pub fn new(db: Arc<dyn PolicyStore>, config: DenylistConfig) -> Self {
        Self {
            state: Mutex::new(EngineState::default()),
            db,
            signaler: Arc::new(KernelSignaler),
            config,
        }
    }

    /// Substitute the signal-delivery seam (tests record instead of kill)
    pub fn with_signaler(mut self, signaler: Arc<dyn SignalSender>) -> Self {
        self.signaler = signaler;
        self
    }

    pub fn config(&self) -> &DenylistConfig {
        &self.config
    }

    /// Add one denylist entry.
    ///
    /// Kills already-running matches and rebuilds the UID map before
    /// persisting; a persistence failure leaves the in-memory mutation in
    /// place (the next restart reconciles from the store).
    pub fn add(&self, package: &str, process: &str) -> AddResult<()> {
        let process = if process.is_empty() { package } else { process };
        if !validate(package, process) {
            return Err(AddError::InvalidName {
                package: package.to_string(),
                process: process.to_string(),
            });
        }

        let entry = PolicyEntry::from_parts(package, process);
        {
            let mut state = self.state.lock();
            if !state.enforced {
                return Err(AddError::NotEnforced);
            }
            let entries = state.entries.get_or_insert_with(DenyListStore::new);
            if !entries.insert(entry.clone()) {
                return Err(AddError::AlreadyExists {
                    package: package.to_string(),
                    process: process.to_string(),
                });
            }
            info!("Denylist add: [{}/{}]", package, process);
            state.kill_entry(&*self.signaler, &entry);
            state.rebuild_uid_map(&self.config);
        }

        self.db.insert_entry(&PolicyRow::from(&entry))?;
        Ok(())
    }

    /// Remove entries. An empty `process` removes every entry for `package`.
    pub fn remove(&self, package: &str, process: &str) -> RemoveResult<()> {
        let process = (!process.is_empty()).then_some(process);
        {
            let mut state = self.state.lock();
            if !state.enforced {
                return Err(RemoveError::NotEnforced);
            }
            let removed = state
                .entries
                .as_mut()
                .map(|entries| entries.remove(package, process))
                .unwrap_or(0);
            if removed == 0 {
                return Err(RemoveError::NotFound {
                    package: package.to_string(),
                    process: process.unwrap_or_default().to_string(),
                });
            }
            match process {
                Some(proc_name) => info!("Denylist rm: [{}/{}]", package, proc_name),
                None => info!("Denylist rm: [{}]", package),
            }
            state.rebuild_uid_map(&self.config);
        }

        self.db.remove_entries(package, process)?;
        Ok(())
    }

    /// Snapshot of the active entries, in stable order.
    /// Empty while enforcement is disabled.
    pub fn list(&self) -> Vec<PolicyEntry> {
        let state = self.state.lock();
        state
            .entries
            .as_ref()
            .map(DenyListStore::snapshot)
            .unwrap_or_default()
    }

    /// Number of active entries
    pub fn entry_count(&self) -> usize {
        let state = self.state.lock();
        state.entries.as_ref().map_or(0, DenyListStore::len)
    }

    /// Turn enforcement on: load persisted policy, kill already-running
    /// targets, sweep the zygote pools, and build the UID map.
    pub fn enable(&self) -> EnableResult<()> {
        let mut state = self.state.lock();
        if state.enforced {
            return Err(EnableError::AlreadyEnforced);
        }

        if !self.config.proc_root.join("self/ns/mnt").exists() {
            warn!("The kernel does not support mount namespaces");
            return Err(EnableError::NoNamespaceSupport);
        }

        if state.proc.is_none() {
            let proc_dir = ProcDir::open(&self.config.proc_root)
                .map_err(|e| EnableError::Proc(e.to_string()))?;
            state.proc = Some(proc_dir);
        }

        info!("* Enable DenyList");

        let rows = self.db.load_entries()?;
        let mut entries = DenyListStore::new();
        for row in &rows {
            let process = if row.process.is_empty() {
                &row.package
            } else {
                &row.process
            };
            if !validate(&row.package, process) {
                warn!(
                    "Skipping invalid persisted entry: [{}/{}]",
                    row.package, row.process
                );
                continue;
            }
            let entry = PolicyEntry::from_parts(&row.package, process);
            if entries.insert(entry.clone()) {
                debug!("Denylist load: [{}/{}]", row.package, process);
                state.kill_entry(&*self.signaler, &entry);
            }
        }
        state.entries = Some(entries);

        if self.config.kill_zygote_pools {
            // App zygote pools fork before policy applies; restart them all
            // (the shared WebView zygote excepted)
            if let Some(proc_dir) = state.proc.as_mut() {
                for pool in USAP_POOLS {
                    kill_matching(proc_dir, &*self.signaler, pool, NameMatch::Exact, true);
                }
                kill_matching(
                    proc_dir,
                    &*self.signaler,
                    APP_ZYGOTE_SUFFIX,
                    NameMatch::Suffix,
                    true,
                );
            }
        }

        state.enforced = true;
        if let Err(e) = self.db.set_flag(DENYLIST_FLAG_KEY, true) {
            warn!("Failed to persist enforcement flag: {}", e);
        }
        state.rebuild_uid_map(&self.config);
        Ok(())
    }

    /// Turn enforcement off. Idempotent; the procfs handle stays open for
    /// the next enable.
    pub fn disable(&self) {
        let mut state = self.state.lock();
        if state.enforced {
            info!("* Disable DenyList");
        }
        state.enforced = false;
        state.entries = None;
        state.uid_map = None;
        if let Err(e) = self.db.set_flag(DENYLIST_FLAG_KEY, false) {
            warn!("Failed to persist enforcement flag: {}", e);
        }
    }

    /// Re-enter enforcement after a daemon restart if the persisted flag
    /// says it was on. Failures are logged; the next restart reconciles.
    pub fn check_enforce_on_startup(&self) {
        if self.is_enforced() {
            return;
        }
        match self.db.get_flag(DENYLIST_FLAG_KEY) {
            Ok(Some(true)) => {
                info!("Enforcement flag set at last shutdown, re-enabling denylist");
                if let Err(e) = self.enable() {
                    warn!("Could not re-enable denylist on startup: {}", e);
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Could not read enforcement flag: {}", e),
        }
    }

    pub fn is_enforced(&self) -> bool {
        self.state.lock().enforced
    }

    /// Whether the process identified by `(uid, process_name)` must be
    /// hidden from. Called synchronously on every new-process notification;
    /// no I/O is performed under the lock.
    pub fn is_deny_target(&self, uid: Uid, process_name: &str) -> bool {
        let state = self.state.lock();
        if !state.enforced {
            return false;
        }
        let Some(map) = &state.uid_map else {
            return false;
        };
        if is_isolated_uid(uid) {
            map.isolated_matches(process_name)
        } else {
            map.uid_matches(uid, process_name)
        }
    }
}
