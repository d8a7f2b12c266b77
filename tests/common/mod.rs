/*!
 * Shared Test Fixtures
 * Fake proc/app-data trees and a recording signal sink
 */

// Not every test binary exercises every fixture helper
#![allow(dead_code)]

use parking_lot::Mutex;
use rootveil::core::types::{Pid, Uid};
use rootveil::{DenylistConfig, SignalSender};
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// Records kill decisions instead of delivering signals
#[derive(Default)]
pub struct RecordingSignaler {
    killed: Mutex<Vec<Pid>>,
}

impl RecordingSignaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded pid, in kill order
    pub fn killed(&self) -> Vec<Pid> {
        self.killed.lock().clone()
    }

    /// How many times `pid` was killed
    pub fn kill_count(&self, pid: Pid) -> usize {
        self.killed.lock().iter().filter(|&&p| p == pid).count()
    }
}

impl SignalSender for RecordingSignaler {
    fn terminate(&self, pid: Pid) -> bool {
        self.killed.lock().push(pid);
        true
    }
}

/// A device-shaped filesystem fixture: a fake proc tree (with the
/// mount-namespace marker) and a per-user app-data tree
pub struct Fixture {
    root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("proc/self/ns")).unwrap();
        fs::write(root.path().join("proc/self/ns/mnt"), b"mnt:[4026531840]").unwrap();
        fs::create_dir_all(root.path().join("data/0")).unwrap();
        Self { root }
    }

    /// A fixture whose proc tree has no mount-namespace marker
    pub fn without_mnt_ns() -> Self {
        let fixture = Self::new();
        fs::remove_file(fixture.root.path().join("proc/self/ns/mnt")).unwrap();
        fixture
    }

    pub fn proc_root(&self) -> PathBuf {
        self.root.path().join("proc")
    }

    pub fn app_data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    pub fn config(&self) -> DenylistConfig {
        DenylistConfig {
            proc_root: self.proc_root(),
            app_data_dir: self.app_data_dir(),
            kill_zygote_pools: false,
            store_path: self.root.path().join("policy.json"),
        }
    }

    /// Spawn a fake process: a numeric proc entry with a cmdline
    pub fn add_process(&self, pid: Pid, cmdline: &str) {
        let pid_dir = self.proc_root().join(pid.to_string());
        fs::create_dir_all(&pid_dir).unwrap();
        fs::write(pid_dir.join("cmdline"), format!("{}\0", cmdline)).unwrap();
    }

    /// Install a package for a user profile; returns the owning UID the
    /// engine will resolve through the directory
    pub fn install_package(&self, user: &str, package: &str) -> Uid {
        let pkg_dir = self.app_data_dir().join(user).join(package);
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::metadata(&pkg_dir).unwrap().uid()
    }
}
