/*!
 * Rootveil Daemon - Main Entry Point
 *
 * Thin daemon skeleton that:
 * - Mounts the JSON policy store
 * - Constructs the denylist engine
 * - Reconciles enforcement with the persisted flag
 *
 * The socket command dispatcher and the new-process notifier attach to the
 * engine from the daemon's IPC layer, which lives outside this crate.
 */

use log::{error, info};
use rootveil::{DenylistConfig, DenylistEngine, JsonStore};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Rootveil daemon starting...");
    info!("================================================");

    let config = DenylistConfig::from_env();
    info!(
        "Policy store at {}, app data at {}",
        config.store_path.display(),
        config.app_data_dir.display()
    );

    let store = match JsonStore::open(&config.store_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Could not open policy store: {}", e);
            return Err(format!("Could not open policy store: {}", e).into());
        }
    };

    info!("Initializing denylist engine...");
    let engine = Arc::new(DenylistEngine::new(store, config));

    // Survive daemon restarts without the client re-issuing enable
    engine.check_enforce_on_startup();

    info!("Engine initialization complete");
    info!("================================================");
    info!("Waiting for dispatcher commands");

    loop {
        info!(
            "Denylist {}: {} entries",
            if engine.is_enforced() {
                "enforced"
            } else {
                "idle"
            },
            engine.entry_count()
        );
        std::thread::sleep(Duration::from_secs(30));
    }
}
