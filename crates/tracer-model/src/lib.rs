pub mod column;
pub mod error;
pub mod filter;
pub mod gain;
pub mod merge;
pub mod options;
pub mod window;

pub use column::ColumnKind;
pub use error::{AnalysisError, Result};
pub use filter::{BestFilter, FilterPredicate};
pub use gain::{ComboFilter, GainRecord};
pub use merge::MergeSkipReason;
pub use options::{
    AnalysisOptions, COMBO_PRODUCT_CEILING, COMBO_ROW_RATIO, NATURAL_DIVIDER_THRESHOLD,
};
pub use window::DateWindow;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder_overrides_defaults() {
        let options = AnalysisOptions::new()
            .with_reference_date(chrono::NaiveDate::from_ymd_opt(2019, 4, 1).unwrap())
            .with_divider_threshold(10.0)
            .with_combo_product_ceiling(100)
            .with_combo_row_ratio(0.2);
        assert_eq!(options.divider_threshold, 10.0);
        assert_eq!(options.combo_product_ceiling, 100);
        assert_eq!(options.combo_row_ratio, 0.2);
    }

    #[test]
    fn predicate_display_names_the_column() {
        let predicate = FilterPredicate::ExcludeValue {
            column: "warehouse".to_string(),
            value: "W9".to_string(),
        };
        assert_eq!(predicate.column(), "warehouse");
        assert!(predicate.to_string().contains("warehouse"));
    }

    #[test]
    fn merge_skip_reason_serializes() {
        let reason = MergeSkipReason::KeyTypeMismatch {
            column: "order_id".to_string(),
        };
        let json = serde_json::to_string(&reason).expect("serialize reason");
        let round: MergeSkipReason = serde_json::from_str(&json).expect("deserialize reason");
        assert_eq!(round, reason);
    }
}
