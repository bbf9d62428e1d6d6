pub mod analysis;
pub mod combos;
pub mod dates;
pub mod dividers;
pub mod filter;
pub mod frame_utils;
pub mod gains;
pub mod matching;
pub mod merge;
pub mod select;
pub mod usage;

pub use analysis::{AnalysisReport, UsageAnalysis};
pub use combos::{combo_candidate_table, find_combo_filters};
pub use dates::{parse_date_column, parse_date_value};
pub use dividers::{DividerColumns, classify_divider_columns, is_natural_divider};
pub use filter::apply_filter;
pub use frame_utils::{cell, column_names, missing_count, unique_values};
pub use gains::{category_gain, date_gains};
pub use matching::{ColumnMatch, find_matching_columns};
pub use merge::{MergeOutcome, merge_input_into_result};
pub use select::select_best_filter;
pub use usage::{UsageSummary, column_usage, is_date_named};
