/*!
 * Engine Configuration
 * Paths and platform capability flags, overridable via environment
 */

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Configuration for the denylist engine and daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenylistConfig {
    /// Root of the process table (normally `/proc`)
    pub proc_root: PathBuf,
    /// Root of the per-user application data tree
    pub app_data_dir: PathBuf,
    /// Whether enabling enforcement also sweeps the zygote process pools.
    /// Capability flag derived from the platform SDK level by the caller.
    pub kill_zygote_pools: bool,
    /// Location of the JSON policy store mounted by the daemon binary
    pub store_path: PathBuf,
}

impl Default for DenylistConfig {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            app_data_dir: PathBuf::from("/data/user_de"),
            kill_zygote_pools: true,
            store_path: PathBuf::from("/data/adb/rootveil/policy.json"),
        }
    }
}

impl DenylistConfig {
    /// Build a configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            proc_root: env_path("ROOTVEIL_PROC_ROOT", defaults.proc_root),
            app_data_dir: env_path("ROOTVEIL_APP_DATA_DIR", defaults.app_data_dir),
            kill_zygote_pools: env_bool("ROOTVEIL_KILL_ZYGOTE_POOLS", defaults.kill_zygote_pools),
            store_path: env_path("ROOTVEIL_STORE_PATH", defaults.store_path),
        }
    }
}

fn env_path(key: &str, default: PathBuf) -> PathBuf {
    env::var_os(key).map(PathBuf::from).unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => matches!(v.as_str(), "1" | "true" | "yes"),
        Err(_) => default,
    }
}
