use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    Bagging,
    Classifier,
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    ForestError,
    Learner,
    MajorityVote,
    Result,
    Sample,
};
use crate::common::checker;
use crate::constants::DEFAULT_SEED;

use std::fmt;


/// A struct that builds `RandomForest`.
///
/// # Example
/// ```no_run
/// use miniforest::prelude::*;
///
/// # let sample: Sample = unimplemented!();
/// let forest = RandomForestBuilder::new(100, 2)
///     .seed(7)
///     .build()
///     .unwrap();
/// let f = forest.fit(&sample).unwrap();
/// let matrix = ConfusionMatrix::of(&f, &sample).unwrap();
/// println!("{matrix}");
/// ```
#[derive(Debug, Clone)]
pub struct RandomForestBuilder {
    forest_size: usize,
    features: usize,
    bootstrap: bool,
    seed: u64,
}


impl RandomForestBuilder {
    /// Construct a new instance of [`RandomForestBuilder`]
    /// that grows `forest_size` trees,
    /// each of which sees `features` randomly chosen features.
    /// Rows are bootstrapped and the seed is `DEFAULT_SEED == 1234`
    /// by default.
    pub fn new(forest_size: usize, features: usize) -> Self {
        Self {
            forest_size,
            features,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }


    /// Set the master seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Turn row bootstrapping on or off.
    /// Default value is `true`.
    #[inline]
    pub fn bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }


    /// Build a `RandomForest`.
    /// This method consumes `self`.
    /// The number of features is checked against the sample
    /// at [`RandomForest::fit`].
    pub fn build(self) -> Result<RandomForest> {
        if self.forest_size == 0 {
            return Err(ForestError::InvalidForestSize { forest_size: 0 });
        }
        if self.features == 0 {
            return Err(ForestError::InvalidFeatureCount {
                features: 0,
                n_features: 0,
            });
        }

        let tree = DecisionTreeBuilder::new().build()?;
        Ok(RandomForest {
            tree,
            forest_size: self.forest_size,
            features: self.features,
            bootstrap: self.bootstrap,
            seed: self.seed,
        })
    }
}


/// A random forest of unpruned ID3 trees.
///
/// Every tree is grown on a bootstrap sample
/// restricted to a random subset of the features,
/// and the forest predicts by majority vote.
/// The statistics live in [`Bagging`] and [`MajorityVote`];
/// this struct only wires them to [`DecisionTree`].
#[derive(Debug, Clone)]
pub struct RandomForest {
    tree: DecisionTree,
    forest_size: usize,
    features: usize,
    bootstrap: bool,
    seed: u64,
}


impl Learner for RandomForest {
    type Hypothesis = RandomForestClassifier;


    fn name(&self) -> &str {
        "Random Forest"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Forest size", format!("{}", self.forest_size)),
            ("# of features", format!("{}", self.features)),
            ("Bootstrap", format!("{}", self.bootstrap)),
            ("Seed", format!("{}", self.seed)),
        ]);
        Some(info)
    }


    #[instrument(skip_all, fields(forest_size = self.forest_size))]
    fn fit(&self, sample: &Sample) -> Result<Self::Hypothesis> {
        checker::check_features(sample)?;
        checker::check_feature_count(self.features, sample.shape().1)?;

        let vote = Bagging::new(vec![self.tree.clone(); self.forest_size])
            .n_features(self.features)
            .bootstrap(self.bootstrap)
            .seed(self.seed)
            .fit(sample)?;

        let leaves = vote.hypotheses.iter()
            .map(|tree| tree.n_leaves())
            .sum::<usize>();
        info!(
            trees = vote.len(),
            features = self.features,
            leaves,
            "grew a forest"
        );

        Ok(RandomForestClassifier {
            vote,
            forest_size: self.forest_size,
            features: self.features,
        })
    }
}


/// The classifier produced by [`RandomForest`].
#[derive(Debug, Clone, Serialize)]
pub struct RandomForestClassifier {
    vote: MajorityVote<DecisionTreeClassifier>,
    forest_size: usize,
    features: usize,
}


impl RandomForestClassifier {
    /// Returns the trees of the forest.
    #[inline]
    pub fn trees(&self) -> &[DecisionTreeClassifier] {
        &self.vote.hypotheses[..]
    }


    /// Returns the number of trees.
    #[inline]
    pub fn forest_size(&self) -> usize {
        self.forest_size
    }


    /// Returns the number of features each tree was given.
    #[inline]
    pub fn features(&self) -> usize {
        self.features
    }


    /// Returns the underlying majority vote.
    #[inline]
    pub fn majority_vote(&self) -> &MajorityVote<DecisionTreeClassifier> {
        &self.vote
    }
}


impl Classifier for RandomForestClassifier {
    fn predict(&self, sample: &Sample, row: usize) -> String {
        self.vote.predict(sample, row)
    }
}


impl fmt::Display for RandomForestClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Random Forest ({} trees, {} features each)",
            self.forest_size,
            self.features,
        )?;
        for (i, tree) in self.trees().iter().enumerate() {
            write!(f, "\n# Tree {i}\n{tree}")?;
        }
        Ok(())
    }
}
