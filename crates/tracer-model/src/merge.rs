//! Merge outcome reporting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why the merger fell back to the unmerged matching-columns surface.
///
/// A skipped merge is recovered, not fatal: analysis continues with reduced
/// column coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MergeSkipReason {
    /// No explicit merge keys and no identifier-looking shared columns.
    NoKeys,
    /// A key column has incompatible types on the two sides.
    KeyTypeMismatch { column: String },
    /// The join failed or duplicated result rows (duplicate right-side keys).
    JoinFailed,
}

impl fmt::Display for MergeSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeSkipReason::NoKeys => write!(f, "no usable merge keys"),
            MergeSkipReason::KeyTypeMismatch { column } => {
                write!(f, "merge key `{column}` has mismatched types")
            }
            MergeSkipReason::JoinFailed => write!(f, "left join failed or was not row-preserving"),
        }
    }
}
