//! Semantic column classification.
//!
//! Every input column is classified once, up front, and the tag is carried
//! through the rest of the pipeline instead of re-inspecting dtypes at each
//! stage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic kind of a divider column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Parses as calendar dates; always a divider candidate.
    Date,
    /// String-typed and coarse enough to slice on.
    Text,
    /// Integer-typed and coarse enough to slice on.
    Integer,
    /// Boolean-typed; always a divider candidate.
    Boolean,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Date => "date",
            ColumnKind::Text => "string",
            ColumnKind::Integer => "integer",
            ColumnKind::Boolean => "boolean",
        }
    }

    /// Date columns are filtered by range, everything else by value.
    pub fn is_date(self) -> bool {
        matches!(self, ColumnKind::Date)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
