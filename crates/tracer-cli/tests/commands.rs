//! End-to-end subcommand tests over temp CSV files.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use tempfile::tempdir;

use tracer_cli::cli::{AnalyzeArgs, FilterArgs, TableArgs};
use tracer_cli::commands::{run_analyze, run_filter};
use tracer_cli::types::StopReason;
use tracer_ingest::read_table;

const INPUT_ROWS: usize = 248;
const OLD_ROWS: usize = 80;

fn write_fixture_csvs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let start = NaiveDate::from_ymd_opt(2018, 5, 1).unwrap();
    let mut input_csv = String::from("orderId,warehouse,order_date\n");
    for idx in 0..INPUT_ROWS {
        let date = if idx < OLD_ROWS {
            "2015-01-15".to_string()
        } else {
            (start + Duration::days((idx - OLD_ROWS) as i64))
                .format("%Y-%m-%d")
                .to_string()
        };
        writeln!(input_csv, "o{idx:03},W{},{date}", idx % 4).unwrap();
    }
    let mut result_csv = String::from("orderId,total\n");
    for idx in 120..INPUT_ROWS {
        if idx % 4 == 3 {
            continue;
        }
        writeln!(result_csv, "o{idx:03},{}.5", idx).unwrap();
    }
    let input_path = dir.join("orders.csv");
    let result_path = dir.join("totals.csv");
    std::fs::write(&input_path, input_csv).expect("write input csv");
    std::fs::write(&result_path, result_csv).expect("write result csv");
    (input_path, result_path)
}

fn table_args(
    input: &Path,
    result: &Path,
    report_dir: &Path,
    no_report: bool,
) -> TableArgs {
    TableArgs {
        input: input.to_path_buf(),
        result: result.to_path_buf(),
        merge_keys: Vec::new(),
        renames: Vec::new(),
        reference_date: NaiveDate::from_ymd_opt(2019, 4, 1),
        report_dir: Some(report_dir.to_path_buf()),
        no_report,
    }
}

#[test]
fn analyze_finds_the_stale_date_filter() {
    let dir = tempdir().expect("tempdir");
    let (input_path, result_path) = write_fixture_csvs(dir.path());
    let report_dir = dir.path().join("reports");

    let args = AnalyzeArgs {
        tables: table_args(&input_path, &result_path, &report_dir, false),
        json: false,
    };
    let outcome = run_analyze(&args).expect("analyze runs");

    let best = outcome.report.best_filter.as_ref().expect("best filter");
    assert_eq!(best.gain.column(), "order_date");
    assert_eq!(best.gain.rows_saved(), OLD_ROWS);

    let report_path = outcome.report_path.expect("report written");
    let html = std::fs::read_to_string(report_path).expect("read report");
    assert!(html.contains("order_date"));
}

#[test]
fn filter_rewrites_the_input_in_place() {
    let dir = tempdir().expect("tempdir");
    let (input_path, result_path) = write_fixture_csvs(dir.path());
    let report_dir = dir.path().join("reports");

    let args = FilterArgs {
        tables: table_args(&input_path, &result_path, &report_dir, false),
        max_runs: 3,
        min_benefit_ratio: 0.2,
        output: None,
    };
    let outcome = run_filter(&args).expect("filter runs");

    assert_eq!(outcome.stop, StopReason::BenefitBelowThreshold);
    assert_eq!(outcome.rounds.len(), 2);
    assert_eq!(outcome.output_path.as_deref(), Some(input_path.as_path()));

    // the input file now holds only the surviving rows
    let rewritten = read_table(&input_path).expect("read rewritten input");
    assert_eq!(rewritten.height(), INPUT_ROWS - OLD_ROWS);

    // one report per round
    let reports: Vec<_> = std::fs::read_dir(&report_dir)
        .expect("report dir")
        .collect();
    assert_eq!(reports.len(), 2);
}

#[test]
fn filter_leaves_input_untouched_when_nothing_gains() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("orders.csv");
    let result_path = dir.path().join("totals.csv");
    let mut input_csv = String::from("orderId,warehouse\n");
    let mut result_csv = String::from("orderId,total\n");
    for idx in 0..INPUT_ROWS {
        writeln!(input_csv, "o{idx:03},W{}", idx % 4).unwrap();
        writeln!(result_csv, "o{idx:03},{idx}").unwrap();
    }
    std::fs::write(&input_path, &input_csv).expect("write input csv");
    std::fs::write(&result_path, result_csv).expect("write result csv");

    let args = FilterArgs {
        tables: table_args(&input_path, &result_path, dir.path(), true),
        max_runs: 3,
        min_benefit_ratio: 0.2,
        output: None,
    };
    let outcome = run_filter(&args).expect("filter runs");

    assert_eq!(outcome.stop, StopReason::NoGainCandidates);
    assert!(outcome.output_path.is_none());
    let untouched = std::fs::read_to_string(&input_path).expect("read input");
    assert_eq!(untouched, input_csv);
}
