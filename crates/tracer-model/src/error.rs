use thiserror::Error;

/// Failures that invalidate an analysis run.
///
/// Per-column problems (an unparseable date column, a column missing from the
/// result surface) are not represented here: the engine skips those columns
/// and keeps going. Only conditions that make the whole run meaningless are
/// surfaced as errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("input and result tables share no columns; consider renaming input columns")]
    NoSharedColumns,
    #[error("merge key `{column}` has no value overlap between input and result tables")]
    NoOverlapOnMergeKey { column: String },
    #[error("no divider column produced a usable filter gain")]
    NoGainCandidates,
    #[error(transparent)]
    Table(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
