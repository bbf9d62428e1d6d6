//! The analysis pipeline: matching, merge, usage, classification, gain
//! estimation, combination search and best-filter selection in one pass.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, warn};

use tracer_model::{
    AnalysisError, AnalysisOptions, BestFilter, ColumnKind, ComboFilter, GainRecord,
    MergeSkipReason, Result,
};

use crate::combos::find_combo_filters;
use crate::dividers::classify_divider_columns;
use crate::frame_utils::column_names;
use crate::gains::{category_gain, date_gains};
use crate::matching::find_matching_columns;
use crate::merge::{MergeOutcome, merge_input_into_result};
use crate::select::select_best_filter;
use crate::usage::column_usage;

/// Everything one analysis run produced. Constructed empty, populated stage
/// by stage, read-only once handed to the report/filter consumers.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub input_rows: usize,
    pub result_rows: usize,
    /// Column-name intersection of both tables, sorted.
    pub matching_columns: Vec<String>,
    /// Matching columns with an identifier marker in their name.
    pub matching_id_columns: Vec<String>,
    /// Keys the merger joined on (explicit override or the id columns).
    pub merge_keys: Vec<String>,
    /// Present when the merger fell back to the unmerged surface.
    pub merge_skipped: Option<MergeSkipReason>,
    /// Columns usage was computed over: every input column after a successful
    /// merge, otherwise just the matching columns.
    pub analysis_columns: Vec<String>,
    /// Fraction of distinct input values reaching the final surface, per column.
    pub usage: BTreeMap<String, f64>,
    /// Unweighted mean of the usage values; `None` when nothing was computable.
    pub overall_usage: Option<f64>,
    pub divider_columns: BTreeMap<String, ColumnKind>,
    pub filter_candidates: Vec<GainRecord>,
    pub combo_candidates: Vec<ComboFilter>,
    /// `None` when no candidate produced a positive gain.
    pub best_filter: Option<BestFilter>,
    /// Typed representation of every parsed date column.
    #[serde(skip)]
    pub date_columns: BTreeMap<String, Vec<Option<NaiveDate>>>,
    /// The extended result table when the merge succeeded.
    #[serde(skip)]
    pub extended: Option<DataFrame>,
}

impl AnalysisReport {
    /// The selected filter, or the distinct no-candidates error callers use
    /// to stop iterating.
    pub fn require_best_filter(&self) -> Result<&BestFilter> {
        self.best_filter
            .as_ref()
            .ok_or(AnalysisError::NoGainCandidates)
    }
}

/// One input-to-result analysis run.
///
/// Borrows both tables for the duration of the run and never mutates them;
/// derived tables are owned by the produced [`AnalysisReport`].
#[derive(Debug)]
pub struct UsageAnalysis<'a> {
    input: &'a DataFrame,
    result: &'a DataFrame,
    merge_keys: Option<Vec<String>>,
    options: AnalysisOptions,
}

impl<'a> UsageAnalysis<'a> {
    pub fn new(input: &'a DataFrame, result: &'a DataFrame) -> Self {
        Self {
            input,
            result,
            merge_keys: None,
            options: AnalysisOptions::default(),
        }
    }

    /// Join on these columns instead of the inferred id columns.
    #[must_use]
    pub fn with_merge_keys(mut self, keys: Vec<String>) -> Self {
        self.merge_keys = Some(keys);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: AnalysisOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the full pipeline.
    ///
    /// Fails with [`AnalysisError::NoSharedColumns`] when the tables are
    /// unrelated and with [`AnalysisError::NoOverlapOnMergeKey`] when a merge
    /// key turns out to join nothing. A merge that cannot be performed and
    /// columns that refuse to classify are recovered, not fatal.
    pub fn run(&self) -> Result<AnalysisReport> {
        info!(
            input_rows = self.input.height(),
            result_rows = self.result.height(),
            "starting analysis"
        );
        let matched = find_matching_columns(self.input, self.result);
        if matched.matching.is_empty() {
            warn!("without shared columns this analysis is worthless, consider renaming columns");
            return Err(AnalysisError::NoSharedColumns);
        }

        let merge_keys = self
            .merge_keys
            .clone()
            .unwrap_or_else(|| matched.id_columns.clone());
        let (extended, merge_skipped) =
            match merge_input_into_result(self.input, self.result, &merge_keys, &matched.matching) {
                MergeOutcome::Extended(frame) => (Some(frame), None),
                MergeOutcome::Skipped(reason) => {
                    warn!(%reason, "input not merged into result, analysis scope is reduced");
                    (None, Some(reason))
                }
            };

        let analysis_columns = if extended.is_some() {
            let mut names = column_names(self.input);
            names.sort();
            names
        } else {
            matched.matching.clone()
        };
        let final_df: &DataFrame = extended.as_ref().unwrap_or(self.result);

        let usage = column_usage(self.input, final_df, &analysis_columns, &merge_keys)?;
        info!(overall = usage.overall, "column usage computed");

        let dividers = classify_divider_columns(self.input, self.options.divider_threshold);
        info!(dividers = dividers.kinds.len(), "divider columns classified");

        let mut filter_candidates = Vec::new();
        for (name, kind) in &dividers.kinds {
            match kind {
                ColumnKind::Date => {
                    if let Some(dates) = dividers.dates.get(name) {
                        date_gains(
                            final_df,
                            name,
                            dates,
                            self.options.reference_date,
                            &mut filter_candidates,
                        );
                    }
                }
                _ => {
                    if let Some(gain) = category_gain(
                        self.input,
                        final_df,
                        name,
                        *kind,
                        usage.per_column.get(name).copied(),
                    ) {
                        filter_candidates.push(gain);
                    }
                }
            }
        }

        let combo_candidates = find_combo_filters(
            self.input,
            final_df,
            &dividers.kinds,
            self.options.combo_product_ceiling,
            self.options.combo_row_ratio,
        );

        let best_filter = match select_best_filter(self.input, &filter_candidates) {
            Ok(best) => Some(best),
            Err(AnalysisError::NoGainCandidates) => {
                warn!("no divider column produced a usable gain");
                None
            }
            Err(error) => return Err(error),
        };

        Ok(AnalysisReport {
            input_rows: self.input.height(),
            result_rows: self.result.height(),
            matching_columns: matched.matching,
            matching_id_columns: matched.id_columns,
            merge_keys,
            merge_skipped,
            analysis_columns,
            usage: usage.per_column,
            overall_usage: usage.overall,
            divider_columns: dividers.kinds,
            filter_candidates,
            combo_candidates,
            best_filter,
            date_columns: dividers.dates,
            extended,
        })
    }
}
