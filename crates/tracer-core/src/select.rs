//! Best-filter selection and predicate materialization.

use std::collections::HashMap;

use polars::prelude::DataFrame;
use tracing::info;

use tracer_model::{AnalysisError, BestFilter, FilterPredicate, GainRecord, Result};

use crate::frame_utils::cell;

/// Pick the gain with the highest weighted benefit and materialize its
/// concrete predicate.
///
/// Ties keep the first-encountered candidate. For categorical gains only the
/// single worst-offending unused value is excluded; the caller re-runs the
/// analysis to peel off further values one run at a time.
pub fn select_best_filter(input: &DataFrame, candidates: &[GainRecord]) -> Result<BestFilter> {
    let mut best: Option<&GainRecord> = None;
    for candidate in candidates {
        let replace = match best {
            Some(current) => candidate.weighted_benefit() > current.weighted_benefit(),
            None => true,
        };
        if replace {
            best = Some(candidate);
        }
    }
    let Some(gain) = best else {
        return Err(AnalysisError::NoGainCandidates);
    };

    let predicate = match gain {
        GainRecord::DateRange { column, cutoff, .. } => FilterPredicate::KeepAfterDate {
            column: column.clone(),
            cutoff: *cutoff,
        },
        GainRecord::NullDate { column, .. } => FilterPredicate::DropNullDates {
            column: column.clone(),
        },
        GainRecord::Category {
            column,
            unused_values,
            ..
        } => {
            let value = largest_unused_value(input, column, unused_values)?;
            FilterPredicate::ExcludeValue {
                column: column.clone(),
                value,
            }
        }
    };
    info!(
        column = gain.column(),
        benefit = gain.weighted_benefit(),
        predicate = %predicate,
        "selected best filter"
    );
    Ok(BestFilter {
        gain: gain.clone(),
        predicate,
    })
}

/// The unused value covering the most input rows; ties keep the first value
/// in sorted order.
fn largest_unused_value(input: &DataFrame, column: &str, unused: &[String]) -> Result<String> {
    let column_ref = input.column(column)?;
    let mut counts: HashMap<&str, usize> = unused.iter().map(|value| (value.as_str(), 0)).collect();
    for idx in 0..column_ref.len() {
        if let Some(value) = cell(column_ref, idx) {
            if let Some(count) = counts.get_mut(value.as_str()) {
                *count += 1;
            }
        }
    }
    let mut best: Option<(&String, usize)> = None;
    for value in unused {
        let count = counts.get(value.as_str()).copied().unwrap_or(0);
        let replace = match best {
            Some((_, current)) => count > current,
            None => true,
        };
        if replace {
            best = Some((value, count));
        }
    }
    Ok(best.map(|(value, _)| value.clone()).unwrap_or_default())
}
