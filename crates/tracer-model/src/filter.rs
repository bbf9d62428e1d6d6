//! Concrete filter predicates materialized from the selected gain.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gain::GainRecord;

/// A predicate over input rows. Rows matching the predicate are KEPT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "predicate", rename_all = "snake_case")]
pub enum FilterPredicate {
    /// Keep rows dated strictly after `cutoff`, and rows with no date at all.
    /// Nulls are preserved; only `DropNullDates` removes them.
    KeepAfterDate { column: String, cutoff: NaiveDate },
    /// Drop rows whose date cell is missing.
    DropNullDates { column: String },
    /// Keep rows whose value differs from `value` (missing values kept).
    /// Only the single worst-offending value is excluded per run; filtering
    /// is applied iteratively across runs.
    ExcludeValue { column: String, value: String },
}

impl FilterPredicate {
    pub fn column(&self) -> &str {
        match self {
            FilterPredicate::KeepAfterDate { column, .. }
            | FilterPredicate::DropNullDates { column }
            | FilterPredicate::ExcludeValue { column, .. } => column,
        }
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPredicate::KeepAfterDate { column, cutoff } => {
                write!(f, "keep `{column}` > {cutoff} (or missing)")
            }
            FilterPredicate::DropNullDates { column } => {
                write!(f, "drop rows with missing `{column}`")
            }
            FilterPredicate::ExcludeValue { column, value } => {
                write!(f, "keep `{column}` != {value:?}")
            }
        }
    }
}

/// The winning gain together with its materialized predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestFilter {
    pub gain: GainRecord,
    pub predicate: FilterPredicate,
}

impl BestFilter {
    pub fn weighted_benefit(&self) -> f64 {
        self.gain.weighted_benefit()
    }
}
