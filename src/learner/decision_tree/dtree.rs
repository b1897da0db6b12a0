use tracing::{info, instrument, trace};

use crate::{
    ForestError,
    Learner,
    Partition,
    Result,
    Sample,
};
use crate::common::checker;
use crate::constants::PRUNE_EPSILON;

use super::{
    node::{Node, Split},
    rule_generator::{RuleGenerator, SplitBy},
    dtree_classifier::DecisionTreeClassifier,
};

use std::fmt;


/// The ID3 decision tree algorithm with reduced-error pruning.  
/// Given a sample with categorical features,
/// [`DecisionTree`] grows a multiway tree
/// that splits on one attribute per level,
/// and outputs a [`DecisionTreeClassifier`].
///
/// If the prune ratio `p` is positive,
/// a `⌊p · n⌋`-row validation sample is held out,
/// the tree is grown on the rest,
/// and then pruned against the validation sample.
///
/// [`DecisionTree`] is constructed 
/// by [`DecisionTreeBuilder`](crate::DecisionTreeBuilder).
/// 
/// # Example
/// ```no_run
/// use miniforest::prelude::*;
/// 
/// // Read the training data from the CSV file.
/// let file = "/path/to/tennis.csv";
/// let sample = SampleReader::default()
///     .file(file)
///     .has_header(true)
///     .target_feature("play")
///     .read()
///     .unwrap();
/// 
/// let tree = DecisionTreeBuilder::new()
///     .prune_ratio(0.2)
///     .split_by(SplitBy::InformationGain)
///     .build()
///     .unwrap();
///
/// let f = tree.fit(&sample).unwrap();
/// let predictions = f.predict_all(&sample);
/// println!("{f}");
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTree<G = SplitBy> {
    prune_ratio: f64,
    generator: G,
    seed: u64,
}


impl<G> DecisionTree<G> {
    /// Initialize [`DecisionTree`].
    /// This method is called only via `DecisionTreeBuilder::build`.
    #[inline]
    pub(super) fn from_components(prune_ratio: f64, generator: G, seed: u64)
        -> Self
    {
        Self { prune_ratio, generator, seed, }
    }


    /// Returns the prune ratio.
    #[inline]
    pub fn prune_ratio(&self) -> f64 {
        self.prune_ratio
    }


    /// Returns the rule generator.
    #[inline]
    pub fn generator(&self) -> &G {
        &self.generator
    }
}


impl<G: RuleGenerator> DecisionTree<G> {
    fn grow(&self, sample: &Sample) -> Result<Node> {
        induce(&Partition::new(sample), &self.generator)
    }
}


/// Grows an ID3 tree over `partition`.
///
/// 1. An empty partition is an error.
/// 2. If every row has the same label, returns a leaf.
/// 3. If no attribute is left, returns a leaf
///    with the majority label.
/// 4. If `generator` finds nothing to split on,
///    returns a rule node without a split.
/// 5. Otherwise, splits on the returned attribute
///    and grows one child per observed value.
pub fn induce<G>(partition: &Partition<'_>, generator: &G) -> Result<Node>
    where G: RuleGenerator + ?Sized
{
    if partition.is_empty() {
        return Err(ForestError::EmptySample);
    }

    let histogram = partition.class_histogram();
    let label = histogram.majority()
        .map(str::to_string)
        .ok_or(ForestError::EmptySample)?;

    if histogram.n_labels() == 1 || partition.attributes().next().is_none() {
        trace!(rows = partition.len(), %label, "leaf");
        return Ok(Node::leaf(histogram, label));
    }

    let Some(attribute) = generator.split_attribute(partition) else {
        trace!(rows = partition.len(), %label, "no split");
        return Ok(Node::rule(histogram, label, None));
    };

    trace!(rows = partition.len(), attribute = attribute.name(), "split");
    let children = partition.decompose(&attribute)?
        .into_iter()
        .map(|(value, child)| {
            induce(&child, generator).map(|node| (value, node))
        })
        .collect::<Result<_>>()?;

    let split = Split::new(attribute, children);
    Ok(Node::rule(histogram, label, Some(split)))
}


impl<G: RuleGenerator> Learner for DecisionTree<G> {
    type Hypothesis = DecisionTreeClassifier;


    fn name(&self) -> &str {
        "Decision Tree (ID3)"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Prune ratio", format!("{}", self.prune_ratio)),
            ("Seed", format!("{}", self.seed)),
        ]);
        Some(info)
    }


    #[instrument(skip_all)]
    fn fit(&self, sample: &Sample) -> Result<Self::Hypothesis> {
        checker::check_sample(sample)?;
        checker::check_prune_ratio(self.prune_ratio)?;

        let class_attribute = sample.class_attribute().clone();

        if self.prune_ratio < PRUNE_EPSILON {
            let root = self.grow(sample)?;
            info!(
                depth = root.depth(),
                leaves = root.n_leaves(),
                "grew a tree without pruning"
            );
            return Ok(DecisionTreeClassifier::from_components(
                root, self.prune_ratio, class_attribute
            ));
        }

        let (train, validation) = sample.train_validation_split(
            self.prune_ratio, self.seed
        );
        let mut tree = DecisionTreeClassifier::from_components(
            self.grow(&train)?, self.prune_ratio, class_attribute
        );
        let (depth, leaves) = (tree.depth(), tree.n_leaves());
        tree.prune(&validation)?;
        info!(
            train = train.shape().0,
            validation = validation.shape().0,
            depth_before = depth,
            leaves_before = leaves,
            depth = tree.depth(),
            leaves = tree.n_leaves(),
            "grew and pruned a tree"
        );
        Ok(tree)
    }
}


impl<G: fmt::Display> fmt::Display for DecisionTree<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\
            ----------\n\
            # Decision Tree (ID3)\n\n\
            - Prune ratio: {}\n\
            - Split by: {}\n\
            - Seed: {}\n\
            ----------\
            ",
            self.prune_ratio,
            self.generator,
            self.seed,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, Feature, InformationGain};

    fn sample() -> Sample {
        let a = Feature::categorical("A", ["x", "x", "y", "y"]);
        let b = Feature::categorical("B", ["p", "q", "p", "q"]);
        let c = Feature::categorical("C", ["0", "0", "1", "1"]);
        Sample::new(vec![a, b], c).unwrap()
    }


    struct Foreign(Attribute);

    impl RuleGenerator for Foreign {
        fn split_attribute(&self, _: &Partition<'_>) -> Option<Attribute> {
            Some(self.0.clone())
        }
    }


    struct Never;

    impl RuleGenerator for Never {
        fn split_attribute(&self, _: &Partition<'_>) -> Option<Attribute> {
            None
        }
    }


    #[test]
    fn splits_on_the_separating_attribute() {
        let sample = sample();
        let root = induce(&Partition::new(&sample), &InformationGain).unwrap();
        let split = root.get_split().unwrap();
        assert_eq!(split.attribute().name(), "A");
        assert_eq!(root.n_leaves(), 2);
        assert_eq!(root.child("x").unwrap().label(), "0");
        assert_eq!(root.child("y").unwrap().label(), "1");
    }


    #[test]
    fn pure_partition_is_a_leaf() {
        let sample = sample();
        let partition = Partition::from_rows(&sample, vec![0, 1]);
        let root = induce(&partition, &InformationGain).unwrap();
        assert!(matches!(root, Node::Leaf(_)));
        assert_eq!(root.label(), "0");
    }


    #[test]
    fn nothing_to_split_on_is_a_childless_rule() {
        let sample = sample();
        let root = induce(&Partition::new(&sample), &Never).unwrap();
        assert!(matches!(root, Node::Rule(_)));
        assert!(root.is_terminal());
        assert_eq!(root.histogram().total(), 4);
        // "0" and "1" tie.
        assert_eq!(root.label(), "0");
    }


    #[test]
    fn foreign_attribute_is_a_contract_violation() {
        let generator = Foreign(Attribute::categorical("A"));
        let sample = sample();
        let result = induce(&Partition::new(&sample), &generator);
        assert!(matches!(result, Err(ForestError::ContractViolation { .. })));
    }


    #[test]
    fn empty_partition_is_an_error() {
        let sample = sample();
        let partition = Partition::from_rows(&sample, Vec::new());
        let result = induce(&partition, &InformationGain);
        assert!(matches!(result, Err(ForestError::EmptySample)));
    }
}
