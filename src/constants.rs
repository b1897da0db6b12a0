//! Default values shared by the builders of this crate.

/// Seed used for every shuffle/bootstrap unless another one is given.
pub const DEFAULT_SEED: u64 = 1234;

/// Pruning ratios below this value disable reduced-error pruning.
pub const PRUNE_EPSILON: f64 = 0.001;

/// Number of decimals used when a numeric value is read as a category.
pub const DEFAULT_PRECISION: usize = 2;

/// Number of folds used by `CrossValidation` by default.
pub const DEFAULT_N_FOLDS: usize = 5;


pub(crate) const PRINT_WIDTH: usize = 9;
