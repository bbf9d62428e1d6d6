//! Multi-column combination search.

use std::collections::{BTreeMap, HashMap, HashSet};

use polars::prelude::{Column, DataFrame};
use tracing::{debug, info, warn};

use tracer_model::{ColumnKind, ComboFilter};

use crate::frame_utils::{cell, unique_values};

/// Find value combinations across divider columns that are frequent in the
/// input but never occur on the final surface.
///
/// The working set starts as every divider column and shrinks by dropping
/// the highest-cardinality column until the cartesian product of distinct
/// values fits under `ceiling`. Combinations are checked against a grouped
/// row-count lookup of the input, not a rescan per combination. Rows with a
/// missing value in any working-set column stay out of the lookup.
pub fn find_combo_filters(
    input: &DataFrame,
    final_df: &DataFrame,
    kinds: &BTreeMap<String, ColumnKind>,
    ceiling: u128,
    row_ratio: f64,
) -> Vec<ComboFilter> {
    if input.height() == 0 {
        return Vec::new();
    }

    let mut distinct: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in kinds.keys() {
        let Some(values) = unique_values(input, name) else {
            continue;
        };
        if values.is_empty() {
            continue;
        }
        distinct.insert(name.clone(), values.into_iter().collect());
    }

    loop {
        let product = distinct
            .values()
            .fold(1u128, |acc, values| acc.saturating_mul(values.len() as u128));
        if product <= ceiling || distinct.len() <= 1 {
            break;
        }
        let widest = distinct
            .iter()
            .max_by(|a, b| a.1.len().cmp(&b.1.len()).then(a.0.cmp(b.0)))
            .map(|(name, _)| name.clone());
        let Some(widest) = widest else {
            break;
        };
        debug!(column = %widest, "dropping high-cardinality column from combination search");
        distinct.remove(&widest);
    }
    if distinct.len() < 2 {
        debug!("fewer than two combinable divider columns, skipping combination search");
        return Vec::new();
    }

    let columns: Vec<String> = distinct.keys().cloned().collect();
    if columns
        .iter()
        .any(|name| final_df.column(name).is_err())
    {
        warn!("combination column missing from the final surface, skipping combination search");
        return Vec::new();
    }

    let input_groups = group_rows(input, &columns);
    let final_groups: HashSet<Vec<String>> = group_rows(final_df, &columns).into_keys().collect();
    let value_lists: Vec<&Vec<String>> = columns.iter().map(|name| &distinct[name]).collect();
    let total_rows = input.height() as f64;

    let mut flagged = Vec::new();
    let mut indices = vec![0usize; value_lists.len()];
    'combos: loop {
        let combo: Vec<String> = indices
            .iter()
            .zip(&value_lists)
            .map(|(&idx, values)| values[idx].clone())
            .collect();
        if let Some(&rows) = input_groups.get(&combo) {
            if !final_groups.contains(&combo) {
                let ratio = rows as f64 / total_rows;
                if ratio > row_ratio {
                    flagged.push(ComboFilter {
                        columns: columns.clone(),
                        values: combo,
                        rows,
                        ratio,
                    });
                }
            }
        }
        for position in (0..indices.len()).rev() {
            indices[position] += 1;
            if indices[position] < value_lists[position].len() {
                continue 'combos;
            }
            indices[position] = 0;
            if position == 0 {
                break 'combos;
            }
        }
    }

    info!(
        candidates = flagged.len(),
        columns = ?columns,
        "combination search finished"
    );
    flagged
}

/// Row counts per value combination over `columns`.
fn group_rows(df: &DataFrame, columns: &[String]) -> HashMap<Vec<String>, usize> {
    let mut groups = HashMap::new();
    let resolved: Vec<&Column> = match columns
        .iter()
        .map(|name| df.column(name))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(resolved) => resolved,
        Err(_) => return groups,
    };
    'rows: for idx in 0..df.height() {
        let mut key = Vec::with_capacity(resolved.len());
        for column in &resolved {
            match cell(column, idx) {
                Some(value) => key.push(value),
                None => continue 'rows,
            }
        }
        *groups.entry(key).or_insert(0) += 1;
    }
    groups
}

/// Concatenate flagged combinations into one candidate table for the report.
pub fn combo_candidate_table(combos: &[ComboFilter]) -> Option<DataFrame> {
    let first = combos.first()?;
    let mut columns: Vec<Column> = first
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<String> = combos.iter().map(|combo| combo.values[idx].clone()).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();
    columns.push(Column::new(
        "input_rows".into(),
        combos.iter().map(|combo| combo.rows as u64).collect::<Vec<_>>(),
    ));
    DataFrame::new(columns).ok()
}
