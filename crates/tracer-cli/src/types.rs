use std::path::PathBuf;

use polars::prelude::DataFrame;

use tracer_core::AnalysisReport;

/// Outcome of a single `analyze` invocation.
#[derive(Debug)]
pub struct AnalyzeOutcome {
    pub report: AnalysisReport,
    pub report_path: Option<PathBuf>,
}

/// One analyze-and-filter round of the refinement loop.
#[derive(Debug)]
pub struct RoundOutcome {
    pub run_number: usize,
    pub report: AnalysisReport,
    pub report_path: Option<PathBuf>,
    /// Whether the round's best filter was applied to the input.
    pub applied: bool,
    pub rows_before: usize,
    pub rows_after: usize,
}

/// Why the refinement loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Best filter's benefit share dropped to the threshold or below.
    BenefitBelowThreshold,
    /// No divider column produced a gain; nothing left to optimize.
    NoGainCandidates,
    /// The configured number of rounds ran to completion.
    MaxRunsReached,
}

/// Outcome of a full `filter` invocation.
#[derive(Debug)]
pub struct FilterOutcome {
    pub rounds: Vec<RoundOutcome>,
    pub stop: StopReason,
    pub filtered: DataFrame,
    pub output_path: Option<PathBuf>,
}
