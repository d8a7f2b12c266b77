/*!
 * Denylist Types
 * Policy entries and the isolated-service sentinel
 */

use crate::storage::types::PolicyRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved package-name value marking an isolated-service wildcard rule.
/// Contains no `.`, so it can never collide with a real package name.
pub const ISOLATED_MAGIC: &str = "isolated";

/// One denylist rule
///
/// The wire and storage layers overload the package column with
/// `ISOLATED_MAGIC`; here the two rule forms are distinct variants so the
/// distinction is carried by the type system instead of string equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PolicyEntry {
    /// Hide from one process of an installed package, matched exactly
    Normal { package: String, process: String },
    /// Hide from every isolated service whose name starts with `pattern`
    Isolated { pattern: String },
}

impl PolicyEntry {
    /// Build an entry from wire-form package/process strings.
    /// Callers validate first; this only routes on the sentinel.
    pub fn from_parts(package: &str, process: &str) -> Self {
        if package == ISOLATED_MAGIC {
            PolicyEntry::Isolated {
                pattern: process.to_string(),
            }
        } else {
            PolicyEntry::Normal {
                package: package.to_string(),
                process: process.to_string(),
            }
        }
    }

    /// The wire-form package column (`ISOLATED_MAGIC` for isolated rules)
    pub fn package(&self) -> &str {
        match self {
            PolicyEntry::Normal { package, .. } => package,
            PolicyEntry::Isolated { .. } => ISOLATED_MAGIC,
        }
    }

    /// The wire-form process column (the pattern for isolated rules)
    pub fn process(&self) -> &str {
        match self {
            PolicyEntry::Normal { process, .. } => process,
            PolicyEntry::Isolated { pattern } => pattern,
        }
    }

    pub fn is_isolated(&self) -> bool {
        matches!(self, PolicyEntry::Isolated { .. })
    }
}

impl From<&PolicyEntry> for PolicyRow {
    fn from(entry: &PolicyEntry) -> Self {
        PolicyRow::new(entry.package(), entry.process())
    }
}

impl From<&PolicyRow> for PolicyEntry {
    fn from(row: &PolicyRow) -> Self {
        PolicyEntry::from_parts(&row.package, &row.process)
    }
}

impl fmt::Display for PolicyEntry {
    /// The dispatcher's `list` line format
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.package(), self.process())
    }
}
