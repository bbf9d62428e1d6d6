//! The caller-owned iterative refinement loop.
//!
//! Each round re-runs the full analysis on the progressively filtered input
//! and applies the recommended filter only while its benefit is worth it
//! relative to the original input size. One value or window is peeled off
//! per round; over-aggressive one-shot filtering is deliberately avoided.

use polars::prelude::DataFrame;
use tracing::info;

use tracer_core::{UsageAnalysis, apply_filter};
use tracer_model::{AnalysisOptions, Result};

use crate::types::{FilterOutcome, RoundOutcome, StopReason};

/// Options for [`run_refinement`].
#[derive(Debug, Clone)]
pub struct RefinementOptions {
    pub max_runs: usize,
    /// Benefit share of the original input rows below which iteration stops.
    pub min_benefit_ratio: f64,
    pub analysis: AnalysisOptions,
    pub merge_keys: Option<Vec<String>>,
}

/// Run up to `max_runs` analyze-and-filter rounds over `input`.
///
/// Errors from the analysis itself (unrelated tables, dead merge keys)
/// propagate; an exhausted candidate list ends the loop gracefully.
pub fn run_refinement(
    input: DataFrame,
    result: &DataFrame,
    options: &RefinementOptions,
) -> Result<FilterOutcome> {
    let original_rows = input.height();
    let mut current = input;
    let mut rounds = Vec::new();
    let mut stop = StopReason::MaxRunsReached;

    for run_number in 1..=options.max_runs {
        info!(run_number, rows = current.height(), "starting refinement run");
        let mut analysis =
            UsageAnalysis::new(&current, result).with_options(options.analysis.clone());
        if let Some(keys) = &options.merge_keys {
            analysis = analysis.with_merge_keys(keys.clone());
        }
        let report = analysis.run()?;
        let rows_before = current.height();

        let Some(best) = report.best_filter.clone() else {
            rounds.push(RoundOutcome {
                run_number,
                report,
                report_path: None,
                applied: false,
                rows_before,
                rows_after: rows_before,
            });
            stop = StopReason::NoGainCandidates;
            break;
        };

        let benefit_ratio = best.weighted_benefit() / original_rows as f64;
        if benefit_ratio <= options.min_benefit_ratio {
            info!(
                run_number,
                benefit_ratio,
                threshold = options.min_benefit_ratio,
                "benefit below threshold, stopping"
            );
            rounds.push(RoundOutcome {
                run_number,
                report,
                report_path: None,
                applied: false,
                rows_before,
                rows_after: rows_before,
            });
            stop = StopReason::BenefitBelowThreshold;
            break;
        }

        let filtered = apply_filter(&current, &best.predicate)?;
        let rows_after = filtered.height();
        info!(
            run_number,
            rows_before,
            rows_after,
            benefit = best.weighted_benefit(),
            "applied best filter"
        );
        rounds.push(RoundOutcome {
            run_number,
            report,
            report_path: None,
            applied: true,
            rows_before,
            rows_after,
        });
        current = filtered;
    }

    Ok(FilterOutcome {
        rounds,
        stop,
        filtered: current,
        output_path: None,
    })
}
