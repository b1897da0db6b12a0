//! The ID3 decision tree for categorical features.

/// Defines the builder of `DecisionTree`.
pub mod builder;
/// Defines the decision tree learner and the induction algorithm.
pub mod dtree;
/// Defines the classifier produced by `DecisionTree`.
pub mod dtree_classifier;
/// Defines the split-selection strategies.
pub mod rule_generator;

/// Defines the inner representations of `DecisionTreeClassifier`.
mod node;
mod prune;


pub use builder::DecisionTreeBuilder;
pub use dtree::{induce, DecisionTree};
pub use dtree_classifier::DecisionTreeClassifier;
pub use node::{LeafNode, Node, RuleNode, Split};
pub use rule_generator::{GainRatio, InformationGain, RuleGenerator, SplitBy};
