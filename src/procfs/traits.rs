/*!
 * Procfs Traits
 * Signal-delivery seam
 */

use crate::core::types::Pid;

/// Delivers termination signals to processes
///
/// The engine only ever needs SIGKILL; the seam exists so tests can observe
/// kill decisions without signalling real pids.
pub trait SignalSender: Send + Sync {
    /// Send SIGKILL to `pid`. Returns whether delivery was accepted.
    /// Fire-and-forget: the target exiting on its own first is benign.
    fn terminate(&self, pid: Pid) -> bool;
}
