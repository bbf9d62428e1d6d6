//! Left join of input-only columns onto the result table.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, Expr, IntoLazy, JoinArgs, JoinType, col};
use tracing::warn;

use tracer_model::MergeSkipReason;

use crate::frame_utils::column_names;

/// Result of the merge stage. A skipped merge is a recovered condition: the
/// analysis falls back to the matching-columns surface.
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    /// The result table extended with the input-only columns.
    Extended(DataFrame),
    Skipped(MergeSkipReason),
}

/// Left-join the input table's non-shared columns onto the result table.
///
/// The join keys must exist on both sides with matching dtypes. Every result
/// row must appear exactly once in the output; a fan-out caused by duplicate
/// right-side keys downgrades the merge to `Skipped`.
pub fn merge_input_into_result(
    input: &DataFrame,
    result: &DataFrame,
    keys: &[String],
    matching: &[String],
) -> MergeOutcome {
    if keys.is_empty() {
        return MergeOutcome::Skipped(MergeSkipReason::NoKeys);
    }
    for key in keys {
        let (Ok(left), Ok(right)) = (result.column(key), input.column(key)) else {
            warn!(column = %key, "merge key missing from one side");
            return MergeOutcome::Skipped(MergeSkipReason::NoKeys);
        };
        if left.dtype() != right.dtype() {
            return MergeOutcome::Skipped(MergeSkipReason::KeyTypeMismatch {
                column: key.clone(),
            });
        }
    }

    let matching_set: BTreeSet<&String> = matching.iter().collect();
    let mut right_columns: Vec<String> = column_names(input)
        .into_iter()
        .filter(|name| !matching_set.contains(name))
        .collect();
    right_columns.extend(keys.iter().cloned());

    let right = match input.select(right_columns) {
        Ok(df) => df,
        Err(error) => {
            warn!(%error, "selecting input-only columns failed");
            return MergeOutcome::Skipped(MergeSkipReason::JoinFailed);
        }
    };

    let key_exprs: Vec<Expr> = keys.iter().map(|key| col(key.as_str())).collect();
    let joined = result
        .clone()
        .lazy()
        .join(
            right.lazy(),
            key_exprs.clone(),
            key_exprs,
            JoinArgs::new(JoinType::Left),
        )
        .collect();
    match joined {
        Ok(extended) if extended.height() == result.height() => MergeOutcome::Extended(extended),
        Ok(extended) => {
            warn!(
                result_rows = result.height(),
                joined_rows = extended.height(),
                "left join duplicated result rows, falling back to matching columns"
            );
            MergeOutcome::Skipped(MergeSkipReason::JoinFailed)
        }
        Err(error) => {
            warn!(%error, "left join failed, falling back to matching columns");
            MergeOutcome::Skipped(MergeSkipReason::JoinFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn string_frame(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| Series::new(name.into(), values).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn merge_extends_result_with_input_only_columns() {
        let input = string_frame(vec![
            ("orderId", vec!["a", "b", "c"]),
            ("warehouse", vec!["W1", "W2", "W3"]),
        ]);
        let result = string_frame(vec![
            ("orderId", vec!["b", "a"]),
            ("total", vec!["10", "20"]),
        ]);
        let keys = vec!["orderId".to_string()];
        let matching = vec!["orderId".to_string()];
        match merge_input_into_result(&input, &result, &keys, &matching) {
            MergeOutcome::Extended(extended) => {
                assert_eq!(extended.height(), result.height());
                assert!(extended.column("warehouse").is_ok());
                assert!(extended.column("total").is_ok());
                // key column appears exactly once
                let key_count = extended
                    .get_column_names()
                    .iter()
                    .filter(|name| name.as_str() == "orderId")
                    .count();
                assert_eq!(key_count, 1);
            }
            MergeOutcome::Skipped(reason) => panic!("merge skipped: {reason}"),
        }
    }

    #[test]
    fn unmatched_result_rows_survive_with_nulls() {
        let input = string_frame(vec![
            ("orderId", vec!["a"]),
            ("warehouse", vec!["W1"]),
        ]);
        let result = string_frame(vec![("orderId", vec!["a", "z"])]);
        let keys = vec!["orderId".to_string()];
        match merge_input_into_result(&input, &result, &keys, &keys.clone()) {
            MergeOutcome::Extended(extended) => {
                assert_eq!(extended.height(), 2);
                let warehouse = extended.column("warehouse").unwrap();
                assert_eq!(warehouse.null_count(), 1);
            }
            MergeOutcome::Skipped(reason) => panic!("merge skipped: {reason}"),
        }
    }

    #[test]
    fn duplicate_right_keys_downgrade_to_skipped() {
        let input = string_frame(vec![
            ("orderId", vec!["a", "a"]),
            ("warehouse", vec!["W1", "W2"]),
        ]);
        let result = string_frame(vec![("orderId", vec!["a"])]);
        let keys = vec!["orderId".to_string()];
        match merge_input_into_result(&input, &result, &keys, &keys.clone()) {
            MergeOutcome::Skipped(MergeSkipReason::JoinFailed) => {}
            other => panic!("expected JoinFailed, got {other:?}"),
        }
    }

    #[test]
    fn no_keys_skips_merge() {
        let input = string_frame(vec![("a", vec!["1"])]);
        let result = string_frame(vec![("a", vec!["1"])]);
        match merge_input_into_result(&input, &result, &[], &["a".to_string()]) {
            MergeOutcome::Skipped(MergeSkipReason::NoKeys) => {}
            other => panic!("expected NoKeys, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_key_types_are_reported() {
        let input = DataFrame::new(vec![
            Series::new("id".into(), vec![1i64, 2]).into_column(),
        ])
        .unwrap();
        let result = string_frame(vec![("id", vec!["1", "2"])]);
        let keys = vec!["id".to_string()];
        match merge_input_into_result(&input, &result, &keys, &keys.clone()) {
            MergeOutcome::Skipped(MergeSkipReason::KeyTypeMismatch { column }) => {
                assert_eq!(column, "id");
            }
            other => panic!("expected KeyTypeMismatch, got {other:?}"),
        }
    }
}
