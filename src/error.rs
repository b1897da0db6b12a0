//! The error type returned by every fallible operation of this crate.

/// Errors from sample construction, training, and evaluation.
///
/// Degenerate training data (no attribute left to split on,
/// or a split that separates nothing) is **not** an error;
/// such nodes simply become majority-class leaves.
#[derive(Debug, thiserror::Error)]
pub enum ForestError {
    /// Returned when a sample (or a set of labels) has no rows.
    #[error("the sample has zero rows")]
    EmptySample,

    /// Returned when a sample has no feature column besides the target.
    #[error("the sample has zero feature columns")]
    ZeroFeatures,

    /// Returned when two columns (or label vectors) differ in length.
    #[error("column `{name}` has {got} rows, expected {expected}")]
    LengthMismatch {
        /// Name of the offending column.
        name: String,
        /// The expected number of rows.
        expected: usize,
        /// The actual number of rows.
        got: usize,
    },

    /// Returned when the class attribute is not categorical.
    #[error("the target column `{name}` must be categorical")]
    NonCategoricalTarget {
        /// Name of the target column.
        name: String,
    },

    /// Returned when a column name cannot be found.
    #[error("column `{name}` does not exist")]
    UnknownColumn {
        /// The requested column name.
        name: String,
    },

    /// Returned when the pruning ratio is outside of `[0, 1)`.
    #[error("prune ratio must be in [0, 1), got {ratio}")]
    InvalidPruneRatio {
        /// The invalid ratio.
        ratio: f64,
    },

    /// Returned when a forest is requested with zero trees.
    #[error("forest size must be at least 1, got {forest_size}")]
    InvalidForestSize {
        /// The invalid forest size.
        forest_size: usize,
    },

    /// Returned when the feature subsample size is out of range.
    #[error("the number of features must be in [1, {n_features}], got {features}")]
    InvalidFeatureCount {
        /// The requested number of features per member.
        features: usize,
        /// The number of features in the sample.
        n_features: usize,
    },

    /// Returned when cross-validation is requested with fewer than 2 folds.
    #[error("n_folds must be at least 2, got {n_folds}")]
    InvalidFoldCount {
        /// The invalid number of folds.
        n_folds: usize,
    },

    /// A collaborator broke its contract,
    /// e.g., a rule generator chose an attribute
    /// that is not available in the partition.
    #[error("contract violation: {reason}")]
    ContractViolation {
        /// Human-readable description of the violation.
        reason: String,
    },

    /// Returned when a value of an input file cannot be parsed.
    #[error("parse error at line {line}: {reason}")]
    Parse {
        /// 1-indexed line number.
        line: usize,
        /// Human-readable description of the failure.
        reason: String,
    },

    /// I/O failure while reading a sample or writing a rendering.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failure reported by `polars`.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),

    /// Failure reported by `serde_json`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ForestError>;


impl ForestError {
    pub(crate) fn contract<S: Into<String>>(reason: S) -> Self {
        Self::ContractViolation { reason: reason.into() }
    }
}
