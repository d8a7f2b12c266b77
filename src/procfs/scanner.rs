/*!
 * Process Table Scanner
 * Crawls procfs through a directory handle held open across scans
 */

use crate::core::types::Pid;
use nix::dir::Dir;
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Longest cmdline token we care about; real process names are far shorter
const CMDLINE_BUF: usize = 4096;

/// One live process as seen during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcEntry {
    pub pid: Pid,
    /// First cmdline token; `None` when the process exited mid-scan
    pub cmdline: Option<String>,
}

/// An open handle on the process table root
///
/// The handle is opened once (at enforcement enable) and rewound for every
/// scan, so steady-state crawling never re-opens `/proc`.
pub struct ProcDir {
    root: PathBuf,
    dir: Dir,
}

impl ProcDir {
    /// Open the process table at `root` (normally `/proc`)
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        let dir = Dir::open(
            &root,
            OFlag::O_RDONLY | OFlag::O_DIRECTORY | OFlag::O_CLOEXEC,
            Mode::empty(),
        )
        .map_err(|e| io::Error::from_raw_os_error(e as i32))?;
        Ok(Self { root, dir })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every numeric entry of the process table, rewound to the start
    fn pids(&mut self) -> impl Iterator<Item = Pid> + '_ {
        self.dir.iter().filter_map(|entry| {
            let pid: Pid = entry.ok()?.file_name().to_str().ok()?.parse().ok()?;
            (pid > 0).then_some(pid)
        })
    }

    /// Scan the process table as `{pid, cmdline}` pairs
    pub fn processes(&mut self) -> impl Iterator<Item = ProcEntry> + '_ {
        let root = self.root.clone();
        self.dir.iter().filter_map(move |entry| {
            let pid: Pid = entry.ok()?.file_name().to_str().ok()?.parse().ok()?;
            if pid <= 0 {
                return None;
            }
            Some(ProcEntry {
                pid,
                cmdline: read_cmdline(&root, pid),
            })
        })
    }

    /// Visit every pid in the table; stops early when `visit` returns `false`
    pub fn crawl<F: FnMut(Pid) -> bool>(&mut self, mut visit: F) {
        for pid in self.pids() {
            if !visit(pid) {
                break;
            }
        }
    }

    /// First cmdline token of `pid`, if the process still exists
    pub fn cmdline(&self, pid: Pid) -> Option<String> {
        read_cmdline(&self.root, pid)
    }
}

/// Read the first NUL- or newline-terminated token of `<root>/<pid>/cmdline`.
/// Failure to open or read means the process exited mid-scan: no match.
pub fn read_cmdline(root: &Path, pid: Pid) -> Option<String> {
    let path = root.join(pid.to_string()).join("cmdline");
    let mut file = File::open(path).ok()?;
    let mut buf = [0u8; CMDLINE_BUF];
    let len = file.read(&mut buf).ok()?;
    let token = buf[..len]
        .split(|&b| b == 0 || b == b'\n')
        .next()
        .unwrap_or(&[]);
    if token.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(token).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_proc(entries: &[(Pid, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (pid, cmdline) in entries {
            let pid_dir = dir.path().join(pid.to_string());
            fs::create_dir(&pid_dir).unwrap();
            fs::write(pid_dir.join("cmdline"), format!("{}\0", cmdline)).unwrap();
        }
        dir
    }

    #[test]
    fn test_processes_skips_non_numeric_entries() {
        let fixture = fake_proc(&[(101, "com.foo"), (202, "com.bar")]);
        fs::create_dir(fixture.path().join("self")).unwrap();
        fs::write(fixture.path().join("version"), "6.1").unwrap();

        let mut proc_dir = ProcDir::open(fixture.path()).unwrap();
        let mut seen: Vec<ProcEntry> = proc_dir.processes().collect();
        seen.sort_by_key(|p| p.pid);
        assert_eq!(
            seen,
            vec![
                ProcEntry {
                    pid: 101,
                    cmdline: Some("com.foo".into())
                },
                ProcEntry {
                    pid: 202,
                    cmdline: Some("com.bar".into())
                },
            ]
        );
    }

    #[test]
    fn test_crawl_stops_early() {
        let fixture = fake_proc(&[(101, "a"), (202, "b"), (303, "c")]);
        let mut proc_dir = ProcDir::open(fixture.path()).unwrap();
        let mut visits = 0;
        proc_dir.crawl(|_| {
            visits += 1;
            false
        });
        assert_eq!(visits, 1);
    }

    #[test]
    fn test_scans_rewind_between_calls() {
        let fixture = fake_proc(&[(101, "a"), (202, "b")]);
        let mut proc_dir = ProcDir::open(fixture.path()).unwrap();

        assert_eq!(proc_dir.processes().count(), 2);
        assert_eq!(proc_dir.processes().count(), 2);
    }

    #[test]
    fn test_cmdline_first_token() {
        let fixture = fake_proc(&[(101, "com.foo")]);
        // cmdline carries argv separated by NULs; only argv[0] matters
        fs::write(
            fixture.path().join("101").join("cmdline"),
            b"com.foo\0--flag\0",
        )
        .unwrap();

        let proc_dir = ProcDir::open(fixture.path()).unwrap();
        assert_eq!(proc_dir.cmdline(101).as_deref(), Some("com.foo"));
    }

    #[test]
    fn test_cmdline_of_exited_process_is_none() {
        let fixture = fake_proc(&[]);
        let proc_dir = ProcDir::open(fixture.path()).unwrap();
        assert_eq!(proc_dir.cmdline(4242), None);
    }
}
