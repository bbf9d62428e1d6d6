//! Date parsing for date-named columns.
//!
//! Dates stay string-typed in the frames; the engine parses them once per
//! column into typed vectors and carries those through the analysis. The
//! caller's tables are never coerced in place.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::DataFrame;

use crate::frame_utils::cell;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a single cell as a calendar date. Datetime values are truncated to
/// their date part.
pub fn parse_date_value(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Parse a whole column as dates, nulls preserved.
///
/// Returns `None` when the column is absent or any non-empty value fails to
/// parse: a partially parseable column is not treated as a date column.
pub fn parse_date_column(df: &DataFrame, name: &str) -> Option<Vec<Option<NaiveDate>>> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        match cell(column, idx) {
            None => values.push(None),
            Some(raw) => values.push(Some(parse_date_value(&raw)?)),
        }
    }
    Some(values)
}
