/*!
 * Process Killer
 * Match-and-terminate sweeps over the process table
 */

use super::scanner::ProcDir;
use super::traits::SignalSender;
use super::types::NameMatch;
use crate::core::types::Pid;
use log::debug;

#[cfg(unix)]
use nix::sys::signal::{kill, Signal};
#[cfg(unix)]
use nix::unistd::Pid as NixPid;

/// Delivers real SIGKILLs through the kernel
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelSignaler;

impl SignalSender for KernelSignaler {
    #[cfg(unix)]
    fn terminate(&self, pid: Pid) -> bool {
        match kill(NixPid::from_raw(pid), Signal::SIGKILL) {
            Ok(_) => true,
            Err(e) => {
                // The target exiting first is the common cause; not an error
                debug!("SIGKILL to PID {} not delivered: {}", pid, e);
                false
            }
        }
    }

    #[cfg(not(unix))]
    fn terminate(&self, pid: Pid) -> bool {
        log::warn!("Signal delivery not supported on this platform (PID {})", pid);
        false
    }
}

/// Sweep the process table and terminate every process whose cmdline matches
/// `pattern` under `op`. Stops after the first kill unless `multi`.
pub fn kill_matching(
    proc_dir: &mut ProcDir,
    signaler: &dyn SignalSender,
    pattern: &str,
    op: NameMatch,
    multi: bool,
) {
    for proc in proc_dir.processes() {
        let Some(name) = proc.cmdline else { continue };
        if !op.matches(&name, pattern) {
            continue;
        }
        if signaler.terminate(proc.pid) {
            debug!("Denylist kill: PID {} ({})", proc.pid, name);
        }
        if !multi {
            break;
        }
    }
}
