//! Subcommand implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use tracer_core::UsageAnalysis;
use tracer_ingest::{read_table, read_table_with_renames, write_table};
use tracer_model::AnalysisOptions;
use tracer_report::{ReportContext, write_report};

use crate::cli::{AnalyzeArgs, FilterArgs, TableArgs};
use crate::pipeline::{RefinementOptions, run_refinement};
use crate::types::{AnalyzeOutcome, FilterOutcome};

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeOutcome> {
    let (input, result) = load_tables(&args.tables)?;
    let mut analysis =
        UsageAnalysis::new(&input, &result).with_options(analysis_options(&args.tables));
    if !args.tables.merge_keys.is_empty() {
        analysis = analysis.with_merge_keys(args.tables.merge_keys.clone());
    }
    let report = analysis.run()?;

    let report_path = if args.tables.no_report {
        None
    } else {
        let context = report_context(&args.tables, 1);
        Some(write_report(
            &report_dir(&args.tables),
            &report,
            &context,
        )?)
    };
    Ok(AnalyzeOutcome {
        report,
        report_path,
    })
}

pub fn run_filter(args: &FilterArgs) -> Result<FilterOutcome> {
    let (input, result) = load_tables(&args.tables)?;
    let options = RefinementOptions {
        max_runs: args.max_runs,
        min_benefit_ratio: args.min_benefit_ratio,
        analysis: analysis_options(&args.tables),
        merge_keys: if args.tables.merge_keys.is_empty() {
            None
        } else {
            Some(args.tables.merge_keys.clone())
        },
    };
    let mut outcome = run_refinement(input, &result, &options)?;

    if !args.tables.no_report {
        let dir = report_dir(&args.tables);
        for round in &mut outcome.rounds {
            let context = report_context(&args.tables, round.run_number);
            round.report_path = Some(write_report(&dir, &round.report, &context)?);
        }
    }

    let applied_rounds = outcome.rounds.iter().filter(|round| round.applied).count();
    if applied_rounds == 0 {
        warn!("no filter was worth applying, input file left untouched");
        return Ok(outcome);
    }
    let target: &Path = args.output.as_deref().unwrap_or(&args.tables.input);
    write_table(&outcome.filtered, target)?;
    info!(
        path = %target.display(),
        rounds = applied_rounds,
        rows = outcome.filtered.height(),
        "filtered input written"
    );
    outcome.output_path = Some(target.to_path_buf());
    Ok(outcome)
}

fn load_tables(args: &TableArgs) -> Result<(polars::prelude::DataFrame, polars::prelude::DataFrame)> {
    let renames: BTreeMap<String, String> = args.renames.iter().cloned().collect();
    let input = if renames.is_empty() {
        read_table(&args.input)?
    } else {
        read_table_with_renames(&args.input, &renames)?
    };
    let result = read_table(&args.result)?;
    Ok((input, result))
}

fn analysis_options(args: &TableArgs) -> AnalysisOptions {
    let mut options = AnalysisOptions::new();
    if let Some(reference) = args.reference_date {
        options = options.with_reference_date(reference);
    }
    options
}

fn report_dir(args: &TableArgs) -> PathBuf {
    args.report_dir.clone().unwrap_or_else(|| {
        args.input
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    })
}

fn report_context(args: &TableArgs, run_number: usize) -> ReportContext {
    ReportContext {
        input_file: args.input.display().to_string(),
        result_file: args.result.display().to_string(),
        run_number,
    }
}
