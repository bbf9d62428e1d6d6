//! Round-trip tests for CSV ingestion and write-back.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, DataType};
use tempfile::tempdir;

use tracer_ingest::{read_table, read_table_with_renames, write_table};

#[test]
fn read_infers_numeric_and_boolean_dtypes() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("input.csv");
    std::fs::write(
        &path,
        "orderId,amount,express\n1,10.5,true\n2,3.0,false\n3,7.25,true\n",
    )
    .expect("write csv");

    let df = read_table(&path).expect("read table");
    assert_eq!(df.height(), 3);
    assert!(df.column("orderId").unwrap().dtype().is_integer());
    assert_eq!(df.column("express").unwrap().dtype(), &DataType::Boolean);
}

#[test]
fn renames_restore_column_overlap() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("input.csv");
    std::fs::write(&path, "revision_id,qty\nr1,2\nr2,5\n").expect("write csv");

    let mut renames = BTreeMap::new();
    renames.insert("revision_id".to_string(), "revisionId".to_string());
    renames.insert("not_there".to_string(), "ignored".to_string());

    let df = read_table_with_renames(&path, &renames).expect("read table");
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["revisionId".to_string(), "qty".to_string()]);
}

#[test]
fn write_back_round_trips_quotes_delimiters_and_nulls() {
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("source.csv");
    std::fs::write(
        &source,
        "name,note\nalpha,\"has, comma\"\nbeta,\"quoted \"\"inner\"\" text\"\ngamma,\n",
    )
    .expect("write csv");

    let df = read_table(&source).expect("read source");
    let target = dir.path().join("copy.csv");
    write_table(&df, &target).expect("write copy");
    let round = read_table(&target).expect("read copy");

    assert_eq!(round.height(), df.height());
    let notes = round.column("note").expect("note column");
    assert_eq!(
        notes.get(0).unwrap(),
        AnyValue::String("has, comma")
    );
    assert_eq!(
        notes.get(1).unwrap(),
        AnyValue::String("quoted \"inner\" text")
    );
    assert!(notes.get(2).unwrap().is_null());
}
