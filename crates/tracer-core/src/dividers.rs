//! Divider-column classification.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, DataType};
use tracing::debug;

use tracer_model::ColumnKind;

use crate::dates::parse_date_column;
use crate::frame_utils::{cell, column_names};
use crate::usage::is_date_named;

/// Classified divider columns plus the typed date representation for every
/// column classified as a date.
#[derive(Debug, Clone, Default)]
pub struct DividerColumns {
    pub kinds: BTreeMap<String, ColumnKind>,
    pub dates: BTreeMap<String, Vec<Option<NaiveDate>>>,
}

/// Classify every input column as a potential slicing criterion.
///
/// Date-named columns must parse in full to qualify; an unparseable
/// date-named column drops out of classification entirely. String and
/// integer columns qualify only as natural dividers; boolean columns always
/// qualify.
pub fn classify_divider_columns(input: &DataFrame, threshold: f64) -> DividerColumns {
    let mut dividers = DividerColumns::default();
    for name in column_names(input) {
        let Ok(column) = input.column(&name) else {
            continue;
        };
        if is_date_named(&name) {
            match parse_date_column(input, &name) {
                Some(values) => {
                    dividers.kinds.insert(name.clone(), ColumnKind::Date);
                    dividers.dates.insert(name, values);
                }
                None => {
                    debug!(column = %name, "date-named column does not parse as dates, excluded");
                }
            }
            continue;
        }
        let dtype = column.dtype();
        if dtype == &DataType::String && is_natural_divider(column, threshold) {
            dividers.kinds.insert(name, ColumnKind::Text);
        } else if dtype.is_integer() && is_natural_divider(column, threshold) {
            dividers.kinds.insert(name, ColumnKind::Integer);
        } else if dtype == &DataType::Boolean {
            dividers.kinds.insert(name, ColumnKind::Boolean);
        }
    }
    dividers
}

/// A column is a natural divider when each distinct value covers more than
/// `threshold` rows on average. A single-valued column has no discriminating
/// power and never qualifies.
pub fn is_natural_divider(column: &Column, threshold: f64) -> bool {
    let total = column.len();
    let mut values = BTreeSet::new();
    let mut has_missing = false;
    for idx in 0..total {
        match cell(column, idx) {
            Some(value) => {
                values.insert(value);
            }
            None => has_missing = true,
        }
    }
    let distinct = values.len() + usize::from(has_missing);
    if distinct <= 1 {
        return false;
    }
    let ratio = total as f64 / distinct as f64;
    debug!(
        column = %column.name(),
        distinct,
        rows = total,
        ratio,
        "divider candidate stats"
    );
    ratio > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};
    use tracer_model::NATURAL_DIVIDER_THRESHOLD;

    fn repeated(values: &[(&str, usize)]) -> Column {
        let mut out = Vec::new();
        for (value, count) in values {
            out.extend(std::iter::repeat_n((*value).to_string(), *count));
        }
        Series::new("c".into(), out).into_column()
    }

    #[test]
    fn ratio_above_threshold_qualifies() {
        // 124 rows over 4 values: 31 rows per value
        let column = repeated(&[("a", 31), ("b", 31), ("c", 31), ("d", 31)]);
        assert!(is_natural_divider(&column, NATURAL_DIVIDER_THRESHOLD));
    }

    #[test]
    fn ratio_at_threshold_does_not_qualify() {
        // 120 rows over 4 values: exactly 30, strict greater-than required
        let column = repeated(&[("a", 30), ("b", 30), ("c", 30), ("d", 30)]);
        assert!(!is_natural_divider(&column, NATURAL_DIVIDER_THRESHOLD));
    }

    #[test]
    fn single_valued_column_never_qualifies() {
        let column = repeated(&[("only", 500)]);
        assert!(!is_natural_divider(&column, NATURAL_DIVIDER_THRESHOLD));
    }

    #[test]
    fn classification_by_kind() {
        let mut warehouses = Vec::new();
        for idx in 0..124 {
            warehouses.push(format!("W{}", idx % 4));
        }
        let dates: Vec<String> = (0..124).map(|idx| format!("2019-01-{:02}", idx % 28 + 1)).collect();
        let flags: Vec<bool> = (0..124).map(|idx| idx % 2 == 0).collect();
        let ids: Vec<String> = (0..124).map(|idx| format!("row-{idx}")).collect();
        let df = DataFrame::new(vec![
            Series::new("warehouse".into(), warehouses).into_column(),
            Series::new("ship_date".into(), dates).into_column(),
            Series::new("express".into(), flags).into_column(),
            Series::new("rowId".into(), ids).into_column(),
        ])
        .unwrap();

        let dividers = classify_divider_columns(&df, NATURAL_DIVIDER_THRESHOLD);
        assert_eq!(dividers.kinds.get("warehouse"), Some(&ColumnKind::Text));
        assert_eq!(dividers.kinds.get("ship_date"), Some(&ColumnKind::Date));
        assert_eq!(dividers.kinds.get("express"), Some(&ColumnKind::Boolean));
        // near-unique identifier is not a divider
        assert!(!dividers.kinds.contains_key("rowId"));
        assert!(dividers.dates.contains_key("ship_date"));
    }

    #[test]
    fn unparseable_date_named_column_is_excluded() {
        let df = DataFrame::new(vec![
            Series::new("update_date".into(), vec!["soon", "later"]).into_column(),
        ])
        .unwrap();
        let dividers = classify_divider_columns(&df, NATURAL_DIVIDER_THRESHOLD);
        assert!(dividers.kinds.is_empty());
    }
}
