/*!
 * Storage Types
 * Persisted row form and storage errors
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage operation result
///
/// # Must Use
/// Persistence failures decide the wire response and must be handled
#[must_use = "persistence failures decide the wire response and must be handled"]
pub type StoreResult<T> = Result<T, StoreError>;

/// One persisted denylist row, exactly as stored
///
/// The isolated-service sentinel convention of the wire protocol is preserved
/// here; conversion to the typed `PolicyEntry` happens at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRow {
    pub package: String,
    pub process: String,
}

impl PolicyRow {
    pub fn new(package: impl Into<String>, process: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            process: process.into(),
        }
    }
}

/// Unified storage error type
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Corrupt policy document: {0}")]
    Corrupt(String),

    #[error("Store rejected the operation: {0}")]
    Rejected(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}
