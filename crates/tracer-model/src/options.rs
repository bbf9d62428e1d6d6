//! Tunables for an analysis run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ratio of rows to distinct values above which a column is a natural divider.
pub const NATURAL_DIVIDER_THRESHOLD: f64 = 30.0;

/// Upper bound on the cartesian product the multi-column combiner enumerates.
pub const COMBO_PRODUCT_CEILING: u128 = 5000;

/// Minimum share of input rows a combination must cover to be flagged.
pub const COMBO_ROW_RATIO: f64 = 0.05;

/// Options controlling an analysis run.
///
/// Every instance is explicitly initialized; nothing is shared across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// The "today" the relative date windows are anchored to. Set this for
    /// reproducible runs and tests.
    pub reference_date: NaiveDate,
    /// Rows-per-distinct-value ratio for natural dividers (strict greater-than).
    pub divider_threshold: f64,
    /// Combinatorial ceiling for the multi-column combiner.
    pub combo_product_ceiling: u128,
    /// Input-share threshold for flagging a combination.
    pub combo_row_ratio: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            reference_date: chrono::Local::now().date_naive(),
            divider_threshold: NATURAL_DIVIDER_THRESHOLD,
            combo_product_ceiling: COMBO_PRODUCT_CEILING,
            combo_row_ratio: COMBO_ROW_RATIO,
        }
    }
}

impl AnalysisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    #[must_use]
    pub fn with_divider_threshold(mut self, threshold: f64) -> Self {
        self.divider_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_combo_product_ceiling(mut self, ceiling: u128) -> Self {
        self.combo_product_ceiling = ceiling;
        self
    }

    #[must_use]
    pub fn with_combo_row_ratio(mut self, ratio: f64) -> Self {
        self.combo_row_ratio = ratio;
        self
    }
}
