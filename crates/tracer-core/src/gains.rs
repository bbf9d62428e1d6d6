//! Gain estimation for single divider columns.

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use tracer_model::{ColumnKind, DateWindow, GainRecord};

use crate::dates::parse_date_column;
use crate::frame_utils::{cell, unique_values};

/// Estimate gains for one date divider column.
///
/// Two independent findings are possible: input rows whose date is missing
/// while the result has none, and a relative window cutoff with no surviving
/// result rows before it. Windows are evaluated widest-first (ascending
/// cutoff date) and a strictly larger input-row count is required to replace
/// the current best, so the selection is deterministic.
pub fn date_gains(
    final_df: &DataFrame,
    column: &str,
    input_dates: &[Option<NaiveDate>],
    reference: NaiveDate,
    candidates: &mut Vec<GainRecord>,
) {
    let Some(final_dates) = parse_date_column(final_df, column) else {
        debug!(column, "result-side dates missing or unparseable, column skipped");
        return;
    };

    let input_nulls = input_dates.iter().filter(|date| date.is_none()).count();
    let final_nulls = final_dates.iter().filter(|date| date.is_none()).count();
    if input_nulls > 0 && final_nulls == 0 {
        info!(
            column,
            rows = input_nulls,
            "input rows with missing dates never reach the result"
        );
        candidates.push(GainRecord::NullDate {
            column: column.to_string(),
            rows_saved: input_nulls,
        });
    }

    let mut windows: Vec<(DateWindow, NaiveDate)> = DateWindow::ALL
        .iter()
        .map(|window| (*window, window.cutoff(reference)))
        .collect();
    windows.sort_by_key(|(_, cutoff)| *cutoff);

    let mut best: Option<(DateWindow, NaiveDate, usize)> = None;
    for (window, cutoff) in windows {
        let surviving = final_dates
            .iter()
            .flatten()
            .filter(|date| **date < cutoff)
            .count();
        if surviving > 0 {
            continue;
        }
        let saved = input_dates
            .iter()
            .flatten()
            .filter(|date| **date < cutoff)
            .count();
        if saved > best.map_or(0, |(_, _, rows)| rows) {
            info!(column, window = %window, rows = saved, "found date-range filter gain");
            best = Some((window, cutoff, saved));
        }
    }
    if let Some((window, cutoff, rows_saved)) = best {
        candidates.push(GainRecord::DateRange {
            column: column.to_string(),
            window,
            cutoff,
            rows_saved,
        });
    }
}

/// Estimate the gain of excluding a categorical column's unused values.
///
/// Skipped when the column's usage is already complete, or when the column
/// has no presence on the final surface to compare against.
pub fn category_gain(
    input: &DataFrame,
    final_df: &DataFrame,
    column: &str,
    kind: ColumnKind,
    usage: Option<f64>,
) -> Option<GainRecord> {
    if usage.is_some_and(|value| value >= 1.0) {
        return None;
    }
    let input_unique = unique_values(input, column)?;
    let final_unique = unique_values(final_df, column)?;
    let unused: Vec<String> = input_unique.difference(&final_unique).cloned().collect();
    if unused.is_empty() {
        return None;
    }

    let column_ref = input.column(column).ok()?;
    let rows_saved = (0..column_ref.len())
        .filter(|&idx| {
            cell(column_ref, idx).is_some_and(|value| unused.binary_search(&value).is_ok())
        })
        .count();
    let weighted_benefit = rows_saved as f64 / unused.len() as f64;
    info!(
        column,
        rows = rows_saved,
        values = unused.len(),
        "found category filter gain"
    );
    Some(GainRecord::Category {
        column: column.to_string(),
        kind,
        unused_values: unused,
        rows_saved,
        weighted_benefit,
    })
}
