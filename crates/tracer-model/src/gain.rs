//! Gain records produced by the estimator stages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::column::ColumnKind;
use crate::window::DateWindow;

/// One candidate filter and the benefit of applying it.
///
/// Date and categorical gains carry different payloads, so the record is a
/// tagged union and the selector matches exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gain", rename_all = "snake_case")]
pub enum GainRecord {
    /// The input has rows with missing dates that never reach the result.
    NullDate { column: String, rows_saved: usize },
    /// All result rows are newer than `cutoff`; older input rows are waste.
    DateRange {
        column: String,
        window: DateWindow,
        cutoff: NaiveDate,
        rows_saved: usize,
    },
    /// Distinct input values that never appear on the result side.
    Category {
        column: String,
        kind: ColumnKind,
        /// Sorted for deterministic selection.
        unused_values: Vec<String>,
        rows_saved: usize,
        weighted_benefit: f64,
    },
}

impl GainRecord {
    pub fn column(&self) -> &str {
        match self {
            GainRecord::NullDate { column, .. }
            | GainRecord::DateRange { column, .. }
            | GainRecord::Category { column, .. } => column,
        }
    }

    pub fn rows_saved(&self) -> usize {
        match self {
            GainRecord::NullDate { rows_saved, .. }
            | GainRecord::DateRange { rows_saved, .. }
            | GainRecord::Category { rows_saved, .. } => *rows_saved,
        }
    }

    /// Benefit used to rank candidates. Date gains count every skippable row;
    /// categorical gains average rows over the values that must be excluded.
    pub fn weighted_benefit(&self) -> f64 {
        match self {
            GainRecord::NullDate { rows_saved, .. }
            | GainRecord::DateRange { rows_saved, .. } => *rows_saved as f64,
            GainRecord::Category {
                weighted_benefit, ..
            } => *weighted_benefit,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            GainRecord::NullDate { .. } | GainRecord::DateRange { .. } => ColumnKind::Date.as_str(),
            GainRecord::Category { kind, .. } => kind.as_str(),
        }
    }

    /// Human-readable description of what would be filtered out.
    pub fn filter_out(&self) -> String {
        match self {
            GainRecord::NullDate { .. } => "missing dates".to_string(),
            GainRecord::DateRange { window, cutoff, .. } => {
                format!("rows before {cutoff} ({window})")
            }
            GainRecord::Category { unused_values, .. } => {
                format!("{} unused values", unused_values.len())
            }
        }
    }
}

/// A value combination across several divider columns that is frequent in the
/// input but never reaches the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboFilter {
    pub columns: Vec<String>,
    pub values: Vec<String>,
    /// Input rows carrying this combination.
    pub rows: usize,
    /// `rows` as a share of all input rows.
    pub ratio: f64,
}
