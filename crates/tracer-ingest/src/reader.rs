//! CSV ingestion into Polars DataFrames.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

/// Read a delimited file into a DataFrame with dtype inference.
///
/// Empty cells become nulls; numeric and boolean columns are inferred from
/// the data so downstream classification sees typed columns.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open csv: {}", path.display()))?
        .finish()
        .with_context(|| format!("read csv: {}", path.display()))?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded table"
    );
    Ok(df)
}

/// Read a table and rename columns afterwards.
///
/// Input extracts often carry column names that differ from the result
/// table's (`revision_id` vs `revisionId`); renaming restores the overlap the
/// column matcher needs. Renames for absent columns are ignored.
pub fn read_table_with_renames(
    path: &Path,
    renames: &BTreeMap<String, String>,
) -> Result<DataFrame> {
    let mut df = read_table(path)?;
    for (from, to) in renames {
        if df.get_column_names().iter().any(|name| name.as_str() == from) {
            df.rename(from, to.as_str().into())
                .with_context(|| format!("rename column `{from}` to `{to}`"))?;
        } else {
            debug!(column = %from, "rename target not present, skipping");
        }
    }
    Ok(df)
}
