//! Applying a selected filter to the input table.

use polars::prelude::{DataFrame, NamedFrom, Series};

use tracer_model::{FilterPredicate, Result};

use crate::dates::parse_date_value;
use crate::frame_utils::cell;

/// Produce a new input table with the predicate's excluded rows removed.
///
/// The caller's table is untouched. Date filtering keeps rows with missing
/// dates (only `DropNullDates` removes them) and keeps rows whose cell does
/// not parse, so nothing provably needed is ever dropped.
pub fn apply_filter(input: &DataFrame, predicate: &FilterPredicate) -> Result<DataFrame> {
    let column = input.column(predicate.column())?;
    let mut keep = Vec::with_capacity(input.height());
    match predicate {
        FilterPredicate::KeepAfterDate { cutoff, .. } => {
            for idx in 0..column.len() {
                let keep_row = match cell(column, idx) {
                    None => true,
                    Some(raw) => match parse_date_value(&raw) {
                        Some(date) => date > *cutoff,
                        None => true,
                    },
                };
                keep.push(keep_row);
            }
        }
        FilterPredicate::DropNullDates { .. } => {
            for idx in 0..column.len() {
                keep.push(cell(column, idx).is_some());
            }
        }
        FilterPredicate::ExcludeValue { value, .. } => {
            for idx in 0..column.len() {
                keep.push(cell(column, idx).is_none_or(|cell_value| cell_value != *value));
            }
        }
    }
    let mask = Series::new("keep".into(), keep);
    Ok(input.filter(mask.bool()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polars::prelude::{Column, IntoColumn};

    fn frame(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn date_filter_keeps_nulls_and_recent_rows() {
        let input = frame(vec![(
            "order_date",
            vec![Some("2015-06-01"), Some("2019-02-01"), None, Some("2018-03-31")],
        )]);
        let predicate = FilterPredicate::KeepAfterDate {
            column: "order_date".to_string(),
            cutoff: NaiveDate::from_ymd_opt(2018, 4, 1).unwrap(),
        };
        let filtered = apply_filter(&input, &predicate).unwrap();
        assert_eq!(filtered.height(), 2);
        let column = filtered.column("order_date").unwrap();
        assert_eq!(cell(column, 0).as_deref(), Some("2019-02-01"));
        assert_eq!(cell(column, 1), None);
    }

    #[test]
    fn null_date_filter_drops_only_missing_rows() {
        let input = frame(vec![(
            "ship_date",
            vec![Some("2019-01-01"), None, Some("2019-01-02"), None],
        )]);
        let predicate = FilterPredicate::DropNullDates {
            column: "ship_date".to_string(),
        };
        let filtered = apply_filter(&input, &predicate).unwrap();
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn exclude_value_keeps_other_values_and_nulls() {
        let input = frame(vec![(
            "warehouse",
            vec![Some("W1"), Some("W9"), None, Some("W9"), Some("W2")],
        )]);
        let predicate = FilterPredicate::ExcludeValue {
            column: "warehouse".to_string(),
            value: "W9".to_string(),
        };
        let filtered = apply_filter(&input, &predicate).unwrap();
        assert_eq!(filtered.height(), 3);
    }

    #[test]
    fn zero_matching_rows_leave_the_table_unchanged() {
        let input = frame(vec![("warehouse", vec![Some("W1"), Some("W2")])]);
        let predicate = FilterPredicate::ExcludeValue {
            column: "warehouse".to_string(),
            value: "W9".to_string(),
        };
        let filtered = apply_filter(&input, &predicate).unwrap();
        assert_eq!(filtered.height(), input.height());
    }
}
