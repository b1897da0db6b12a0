#![warn(missing_docs)]

//! 
//! A crate that provides ID3 decision trees and random forests
//! for categorical data.
//! 
//! - `DecisionTree`
//!     Grows a multiway tree that splits on one attribute per level,
//!     choosing the attribute by information gain (or gain ratio).
//!     If a prune ratio is given, a part of the sample is held out
//!     and the tree is simplified by reduced-error pruning.
//! 
//! - `RandomForest`
//!     Grows many unpruned trees on bootstrap samples
//!     restricted to random subsets of the features,
//!     and predicts by majority vote.
//! 
//! Numeric columns are read as categories
//! through their fixed-precision decimal rendering.
//! 
//! # Example
//! ```no_run
//! use miniforest::prelude::*;
//! 
//! let sample = SampleReader::default()
//!     .file("/path/to/tennis.csv")
//!     .has_header(true)
//!     .target_feature("play")
//!     .read()
//!     .unwrap();
//! 
//! let tree = DecisionTreeBuilder::new()
//!     .prune_ratio(0.2)
//!     .build()
//!     .unwrap();
//! let f = tree.fit(&sample).unwrap();
//! println!("{f}");
//! 
//! let matrix = ConfusionMatrix::of(&f, &sample).unwrap();
//! println!("{matrix}");
//! ```

pub mod constants;
pub mod error;
pub mod sample;
pub mod hypothesis;
pub mod learner;
pub mod ensemble;
pub mod evaluation;
pub mod prelude;

mod common;


pub use error::{ForestError, Result};

/// A struct that returns [`Sample`].
/// Using this struct, one can read a CSV file to [`Sample`].
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use miniforest::SampleReader;
/// let filename = "/path/to/csv/file.csv";
/// let sample = SampleReader::default()
///     .file(filename)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
pub use sample::{
    SampleReader,
    Sample,
    Feature,
    Column,
    Attribute,
    AttributeId,
    AttributeKind,
    ClassHistogram,
    Partition,
};

pub use hypothesis::{
    Classifier,
    MajorityVote,
};

pub use learner::{
    induce,
    Learner,
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    GainRatio,
    InformationGain,
    Node,
    RuleGenerator,
    SplitBy,
};

pub use learner::decision_tree::{
    LeafNode,
    RuleNode,
    Split,
};

pub use ensemble::{
    Bagging,
    RandomForest,
    RandomForestBuilder,
    RandomForestClassifier,
};

pub use evaluation::{
    ConfusionMatrix,
    CrossValidation,
};
