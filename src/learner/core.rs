//! Defines the `Learner` trait.
//! 
//! A learner holds the parameters of a training algorithm.
//! Given a training sample, it returns a fitted [`Classifier`].
//! Ensembles such as [`Bagging`](crate::Bagging) only rely on this trait,
//! so any learner can be combined by majority vote.
use crate::{Classifier, Result, Sample};


/// A trait that defines the training algorithms of this crate.
pub trait Learner {
    /// The classifier returned by [`Learner::fit`].
    type Hypothesis: Classifier;


    /// Returns the name of the learner.
    fn name(&self) -> &str;


    /// Returns the parameters of the learner as `(key, value)` pairs.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Trains a classifier on `sample`.
    fn fit(&self, sample: &Sample) -> Result<Self::Hypothesis>;
}
