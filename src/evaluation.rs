//! The files in `evaluation/` directory defines
//! the tools to measure the quality of a classifier.

/// Defines the confusion matrix.
pub mod confusion_matrix;
/// Defines the k-fold cross validation.
pub mod cross_validation;


pub use confusion_matrix::ConfusionMatrix;
pub use cross_validation::CrossValidation;
