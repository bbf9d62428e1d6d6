//! Row-wise DataFrame access helpers.
//!
//! Missing data means a null cell or a blank string; both are treated the
//! same everywhere in the engine.

use std::collections::BTreeSet;

use polars::prelude::{AnyValue, Column, DataFrame};

use tracer_ingest::any_to_string_non_empty;

/// Column names as owned strings, in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Stringified cell value; `None` for nulls and blank cells.
pub fn cell(column: &Column, idx: usize) -> Option<String> {
    any_to_string_non_empty(column.get(idx).unwrap_or(AnyValue::Null))
}

/// Distinct non-null values of a column. `None` when the column is absent.
pub fn unique_values(df: &DataFrame, name: &str) -> Option<BTreeSet<String>> {
    let column = df.column(name).ok()?;
    let mut values = BTreeSet::new();
    for idx in 0..column.len() {
        if let Some(value) = cell(column, idx) {
            values.insert(value);
        }
    }
    Some(values)
}

/// Count of null or blank cells in a column.
pub fn missing_count(column: &Column) -> usize {
    (0..column.len())
        .filter(|&idx| cell(column, idx).is_none())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn blank_cells_count_as_missing() {
        let column = Series::new("c".into(), vec![Some("a"), Some("  "), None, Some("b")])
            .into_column();
        assert_eq!(missing_count(&column), 2);
        assert_eq!(cell(&column, 0).as_deref(), Some("a"));
        assert_eq!(cell(&column, 1), None);
    }

    #[test]
    fn unique_values_exclude_nulls() {
        let df = DataFrame::new(vec![
            Series::new("c".into(), vec![Some("x"), Some("x"), None, Some("y")]).into_column(),
        ])
        .unwrap();
        let unique = unique_values(&df, "c").unwrap();
        assert_eq!(unique.len(), 2);
        assert!(unique.contains("x"));
        assert!(unique_values(&df, "missing").is_none());
    }
}
