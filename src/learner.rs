//! The files in `learner/` directory defines
//! `Learner` trait and the decision tree learner.

/// Provides Learner trait.
pub mod core;

/// Defines the ID3 decision tree.
pub mod decision_tree;


pub use self::core::Learner;

pub use self::decision_tree::{
    induce,
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    GainRatio,
    InformationGain,
    Node,
    RuleGenerator,
    SplitBy,
};
