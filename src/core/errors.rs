/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export StoreError from the storage module
pub use crate::storage::types::StoreError;

/// Result of an `add` command
///
/// # Must Use
/// Command results carry the wire response and must be handled
#[must_use = "command results carry the wire response and must be handled"]
pub type AddResult<T> = Result<T, AddError>;

/// Result of a `remove` command
#[must_use = "command results carry the wire response and must be handled"]
pub type RemoveResult<T> = Result<T, RemoveError>;

/// Result of an `enable` command
#[must_use = "command results carry the wire response and must be handled"]
pub type EnableResult<T> = Result<T, EnableError>;

/// Errors surfaced by the `add` command
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error", content = "details", rename_all = "snake_case")]
pub enum AddError {
    #[error("Invalid package or process name: [{package}/{process}]")]
    #[diagnostic(
        code(denylist::invalid_name),
        help("Package names are dot-separated identifier segments; process names allow alphanumerics, '_', ':' and '.'.")
    )]
    InvalidName { package: String, process: String },

    #[error("Entry already present: [{package}/{process}]")]
    #[diagnostic(
        code(denylist::item_exists),
        help("Each (package, process) pair may appear on the denylist only once.")
    )]
    AlreadyExists { package: String, process: String },

    #[error("Denylist enforcement is not active")]
    #[diagnostic(
        code(denylist::not_enforced),
        help("Enable enforcement before mutating the denylist.")
    )]
    NotEnforced,

    #[error("Policy store error: {0}")]
    #[diagnostic(code(denylist::store))]
    Store(#[from] StoreError),
}

/// Errors surfaced by the `remove` command
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error", content = "details", rename_all = "snake_case")]
pub enum RemoveError {
    #[error("No matching entry: [{package}/{process}]")]
    #[diagnostic(
        code(denylist::item_not_found),
        help("The pair was not on the denylist. An empty process removes every entry for the package.")
    )]
    NotFound { package: String, process: String },

    #[error("Denylist enforcement is not active")]
    #[diagnostic(
        code(denylist::not_enforced),
        help("Enable enforcement before mutating the denylist.")
    )]
    NotEnforced,

    #[error("Policy store error: {0}")]
    #[diagnostic(code(denylist::store))]
    Store(#[from] StoreError),
}

/// Errors surfaced by the `enable` command
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error", content = "details", rename_all = "snake_case")]
pub enum EnableError {
    #[error("Denylist is already enforced")]
    #[diagnostic(code(denylist::already_enforced))]
    AlreadyEnforced,

    #[error("The kernel does not support mount namespaces")]
    #[diagnostic(
        code(denylist::no_namespace),
        help("Without per-process mount namespaces the daemon cannot hide mounts; enforcement is refused.")
    )]
    NoNamespaceSupport,

    #[error("Failed to open procfs: {0}")]
    #[diagnostic(code(denylist::procfs))]
    Proc(String),

    #[error("Policy store error: {0}")]
    #[diagnostic(code(denylist::store))]
    Store(#[from] StoreError),
}
