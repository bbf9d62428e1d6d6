//! Filtered-table write-back.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use tracing::info;

use crate::values::any_to_string;

/// Write a DataFrame back to a delimited file.
///
/// Cells containing the delimiter, quotes or line breaks are quoted and
/// escaped; nulls round-trip as empty fields, so a subsequent `read_table`
/// sees them as nulls again.
pub fn write_table(df: &DataFrame, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create csv: {}", path.display()))?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    writer
        .write_record(&names)
        .context("write csv header")?;

    let columns: Vec<_> = names
        .iter()
        .map(|name| df.column(name))
        .collect::<Result<Vec<_>, _>>()
        .context("resolve columns for write-back")?;
    for idx in 0..df.height() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("write csv row {idx}"))?;
    }
    writer.flush().context("flush csv")?;
    info!(path = %path.display(), rows = df.height(), "wrote filtered table");
    Ok(())
}
