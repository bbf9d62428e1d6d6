//! Per-column usage percentages.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, DataType};
use tracing::{debug, info};

use tracer_model::{AnalysisError, Result};

use crate::frame_utils::unique_values;

/// Usage ratios per column plus their unweighted mean.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSummary {
    pub per_column: BTreeMap<String, f64>,
    /// `None` when no column was computable (every shared column was a date
    /// or boolean column).
    pub overall: Option<f64>,
}

/// True when a column name carries the date marker used for classification.
pub fn is_date_named(name: &str) -> bool {
    name.contains("date") || name.contains("Date")
}

/// Fraction of distinct input values that reach the final surface, for every
/// column of the analysis surface.
///
/// Date-named and boolean columns are excluded: a unique-value ratio says
/// nothing useful about them. A column with zero overlap scores 0; when that
/// column is one of the declared merge keys the whole run is invalid
/// (the merge joined on values that never match) and an error is returned.
pub fn column_usage(
    input: &DataFrame,
    final_df: &DataFrame,
    surface: &[String],
    merge_keys: &[String],
) -> Result<UsageSummary> {
    let mut per_column = BTreeMap::new();
    for name in surface {
        if is_date_named(name) {
            continue;
        }
        let Ok(column) = input.column(name) else {
            continue;
        };
        if column.dtype() == &DataType::Boolean {
            continue;
        }
        let Some(input_unique) = unique_values(input, name) else {
            continue;
        };
        if input_unique.is_empty() {
            debug!(column = %name, "no non-null input values, usage undefined");
            continue;
        }
        let Some(final_unique) = unique_values(final_df, name) else {
            continue;
        };
        let shared = input_unique.intersection(&final_unique).count();
        if shared == 0 {
            info!(column = %name, "column is present in both tables but no values overlap");
            if merge_keys.contains(name) {
                return Err(AnalysisError::NoOverlapOnMergeKey {
                    column: name.clone(),
                });
            }
            per_column.insert(name.clone(), 0.0);
        } else {
            per_column.insert(name.clone(), shared as f64 / input_unique.len() as f64);
        }
    }
    let overall = if per_column.is_empty() {
        None
    } else {
        Some(per_column.values().sum::<f64>() / per_column.len() as f64)
    };
    Ok(UsageSummary {
        per_column,
        overall,
    })
}
