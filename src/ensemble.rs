//! The files in `ensemble/` directory defines
//! the learners that combine many classifiers by majority vote.

/// Defines bootstrap aggregation.
pub mod bagging;
/// Defines the random forest.
pub mod random_forest;


pub use bagging::Bagging;
pub use random_forest::{
    RandomForest,
    RandomForestBuilder,
    RandomForestClassifier,
};
