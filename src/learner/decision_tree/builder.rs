use crate::{DecisionTree, Result};
use crate::common::checker;
use crate::constants::DEFAULT_SEED;
use super::rule_generator::{RuleGenerator, SplitBy};


/// A struct that builds `DecisionTree`.
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
/// 
/// # Example
/// 
/// ```no_run
/// use miniforest::prelude::*;
/// 
/// let learner = DecisionTreeBuilder::new()
///     .prune_ratio(0.2)
///     .split_by(SplitBy::GainRatio)
///     .seed(42)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTreeBuilder<G = SplitBy> {
    prune_ratio: f64,
    generator: G,
    seed: u64,
}


impl DecisionTreeBuilder<SplitBy> {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// prune_ratio: 0.0 (no pruning),
    /// split_by: SplitBy::InformationGain,
    /// seed: DEFAULT_SEED == 1234,
    /// ```
    pub fn new() -> Self {
        Self {
            prune_ratio: 0f64,
            generator: SplitBy::default(),
            seed: DEFAULT_SEED,
        }
    }


    /// Set the split criterion.
    /// Default value is `SplitBy::InformationGain`.
    #[inline]
    pub fn split_by(mut self, split_by: SplitBy) -> Self {
        self.generator = split_by;
        self
    }
}


impl Default for DecisionTreeBuilder<SplitBy> {
    fn default() -> Self {
        Self::new()
    }
}


impl<G> DecisionTreeBuilder<G> {
    /// Set the ratio of the sample held out for pruning.
    /// The ratio must be in `[0, 1)`.
    /// Ratios below [`PRUNE_EPSILON`](crate::constants::PRUNE_EPSILON)
    /// disable pruning.
    /// Default value is `0.0`.
    #[inline]
    pub fn prune_ratio(mut self, prune_ratio: f64) -> Self {
        self.prune_ratio = prune_ratio;
        self
    }


    /// Set the seed of the train/validation shuffle.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Replace the split-selection strategy by any [`RuleGenerator`].
    pub fn rule_generator<H>(self, generator: H) -> DecisionTreeBuilder<H>
        where H: RuleGenerator
    {
        DecisionTreeBuilder {
            prune_ratio: self.prune_ratio,
            generator,
            seed: self.seed,
        }
    }


    /// Build a `DecisionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> Result<DecisionTree<G>> {
        checker::check_prune_ratio(self.prune_ratio)?;

        Ok(DecisionTree::from_components(
            self.prune_ratio, self.generator, self.seed
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ForestError, GainRatio};

    #[test]
    fn default_does_not_prune() {
        let tree = DecisionTreeBuilder::default().build().unwrap();
        assert_eq!(tree.prune_ratio(), 0f64);
        assert_eq!(*tree.generator(), SplitBy::InformationGain);
    }


    #[test]
    fn prune_ratio_must_be_below_one() {
        let result = DecisionTreeBuilder::new().prune_ratio(1f64).build();
        assert!(matches!(
            result,
            Err(ForestError::InvalidPruneRatio { .. })
        ));
    }


    #[test]
    fn custom_rule_generator() {
        let tree = DecisionTreeBuilder::new()
            .prune_ratio(0.3)
            .rule_generator(GainRatio)
            .build()
            .unwrap();
        assert_eq!(tree.prune_ratio(), 0.3);
        assert_eq!(*tree.generator(), GainRatio);
    }
}
