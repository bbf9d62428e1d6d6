//! CLI argument definitions for report-tracer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "report-tracer",
    version,
    about = "Trace how much of an input table a result table actually uses",
    long_about = "Analyze an input CSV against the result CSV produced from it,\n\
                  measure per-column data usage, and recommend a filter that\n\
                  prunes wasted input rows without changing the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze one input table against the result table and report gains.
    Analyze(AnalyzeArgs),

    /// Iteratively apply the best filter and shrink the input file.
    Filter(FilterArgs),
}

/// Arguments shared by both subcommands.
#[derive(Args)]
pub struct TableArgs {
    /// Input CSV feeding the pipeline (the candidate for reduction).
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,

    /// Result CSV the pipeline produced.
    #[arg(value_name = "RESULT_CSV")]
    pub result: PathBuf,

    /// Join on these columns instead of the inferred id columns (repeatable).
    #[arg(long = "merge-key", value_name = "COLUMN")]
    pub merge_keys: Vec<String>,

    /// Rename an input column before matching (repeatable).
    #[arg(long = "rename", value_name = "OLD=NEW", value_parser = parse_rename)]
    pub renames: Vec<(String, String)>,

    /// Anchor date for the relative time windows (default: today).
    #[arg(long = "reference-date", value_name = "YYYY-MM-DD")]
    pub reference_date: Option<NaiveDate>,

    /// Directory HTML reports are written to (default: the input's directory).
    #[arg(long = "report-dir", value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Skip writing HTML reports.
    #[arg(long = "no-report")]
    pub no_report: bool,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Print the full analysis as JSON instead of the summary tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Maximum number of analyze-and-filter rounds.
    #[arg(long = "max-runs", value_name = "N", default_value_t = 3)]
    pub max_runs: usize,

    /// Stop once the best filter's benefit falls to this share of the
    /// original input rows or below.
    #[arg(long = "min-benefit-ratio", value_name = "RATIO", default_value_t = 0.2)]
    pub min_benefit_ratio: f64,

    /// Write the filtered table here instead of replacing the input file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_rename(raw: &str) -> Result<(String, String), String> {
    let Some((old, new)) = raw.split_once('=') else {
        return Err(format!("expected OLD=NEW, got `{raw}`"));
    };
    let (old, new) = (old.trim(), new.trim());
    if old.is_empty() || new.is_empty() {
        return Err(format!("expected OLD=NEW, got `{raw}`"));
    }
    Ok((old.to_string(), new.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_parses_old_new_pairs() {
        assert_eq!(
            parse_rename("revision_id=revisionId"),
            Ok(("revision_id".to_string(), "revisionId".to_string()))
        );
        assert!(parse_rename("no-separator").is_err());
        assert!(parse_rename("=empty").is_err());
    }

    #[test]
    fn cli_parses_filter_defaults() {
        let cli = Cli::try_parse_from([
            "report-tracer",
            "filter",
            "input.csv",
            "result.csv",
            "--merge-key",
            "revisionId",
        ])
        .expect("cli parses");
        match cli.command {
            Command::Filter(args) => {
                assert_eq!(args.max_runs, 3);
                assert_eq!(args.min_benefit_ratio, 0.2);
                assert_eq!(args.tables.merge_keys, vec!["revisionId".to_string()]);
            }
            Command::Analyze(_) => panic!("expected filter subcommand"),
        }
    }
}
