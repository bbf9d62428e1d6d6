//! Column matching between the input and result tables.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;

use crate::frame_utils::column_names;

/// Columns the two tables share, and the identifier-looking subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMatch {
    /// Name intersection of both tables, sorted.
    pub matching: Vec<String>,
    /// Matching columns whose name contains an `id`/`Id` marker; the default
    /// merge keys when the caller supplies none.
    pub id_columns: Vec<String>,
}

pub fn find_matching_columns(input: &DataFrame, result: &DataFrame) -> ColumnMatch {
    let result_names: BTreeSet<String> = column_names(result).into_iter().collect();
    let mut matching: Vec<String> = column_names(input)
        .into_iter()
        .filter(|name| result_names.contains(name))
        .collect();
    matching.sort();
    matching.dedup();
    let id_columns = matching
        .iter()
        .filter(|name| name.contains("id") || name.contains("Id"))
        .cloned()
        .collect();
    ColumnMatch {
        matching,
        id_columns,
    }
}
