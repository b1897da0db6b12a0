//! Exports the learners, the classifiers, and the traits.
//! 
pub use crate::{
    // Errors -----------------------------------
    ForestError,


    // Sample -----------------------------------
    Sample,
    SampleReader,
    Feature,
    Attribute,
    ClassHistogram,


    // Traits -----------------------------------
    Classifier,
    Learner,
    RuleGenerator,


    // Decision tree ----------------------------
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    SplitBy,
    InformationGain,
    GainRatio,


    // Ensembles --------------------------------
    Bagging,
    MajorityVote,
    RandomForest,
    RandomForestBuilder,
    RandomForestClassifier,


    // Evaluation -------------------------------
    ConfusionMatrix,
    CrossValidation,
};
