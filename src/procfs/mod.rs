/*!
 * Procfs Module
 * Process-table scanning and best-effort termination
 */

pub mod killer;
pub mod scanner;
pub mod traits;
pub mod types;

pub use killer::{kill_matching, KernelSignaler};
pub use scanner::{read_cmdline, ProcDir, ProcEntry};
pub use traits::SignalSender;
pub use types::{NameMatch, WEBVIEW_ZYGOTE};
