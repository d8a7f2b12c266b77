/*!
 * Procfs Types
 * Process-name matching operators
 */

use serde::{Deserialize, Serialize};

/// The shared WebView zygote; killing it destabilizes every app rendering
/// web content, so pattern-based sweeps must never touch it.
pub const WEBVIEW_ZYGOTE: &str = "webview_zygote";

/// Comparison operator for matching a process cmdline against a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatch {
    /// Whole-name equality (normal denylist entries)
    Exact,
    /// Pattern is a name prefix (isolated-service entries)
    Prefix,
    /// Pattern is a name suffix (zygote sweeps)
    Suffix,
}

impl NameMatch {
    /// Whether `cmdline` matches `pattern` under this operator.
    /// Prefix and suffix matching exempt the WebView zygote.
    pub fn matches(self, cmdline: &str, pattern: &str) -> bool {
        match self {
            NameMatch::Exact => cmdline == pattern,
            NameMatch::Prefix => cmdline != WEBVIEW_ZYGOTE && cmdline.starts_with(pattern),
            NameMatch::Suffix => cmdline != WEBVIEW_ZYGOTE && cmdline.ends_with(pattern),
        }
    }
}
