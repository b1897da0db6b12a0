//! Reduced-error pruning.
use crate::{ConfusionMatrix, Result, Sample};

use super::node::{Node, RuleNode};


impl Node {
    /// Prunes this sub-tree against the validation rows `rows` of `sample`.
    ///
    /// The rows are routed through the same attribute values
    /// as the training rows that built the sub-tree.
    /// A rule node is collapsed into its majority label
    /// unless doing so lowers the accuracy on the rows that reach it.
    pub(crate) fn prune(&mut self, sample: &Sample, rows: &[usize])
        -> Result<()>
    {
        match self {
            Self::Rule(node) => node.prune(sample, rows),
            Self::Leaf(_) => Ok(()),
        }
    }
}


impl RuleNode {
    fn prune(&mut self, sample: &Sample, rows: &[usize]) -> Result<()> {
        if rows.is_empty() { return Ok(()); }

        let Some(split) = self.split.as_mut() else { return Ok(()); };

        // Rows of a sample without the split attribute
        // stop at this node, as they do at prediction time.
        if sample.attribute_index(&split.attribute).is_some() {
            let groups = sample.decompose(&split.attribute, rows)?;
            for (value, group) in groups {
                if let Some(child) = split.children.get_mut(&value) {
                    child.prune(sample, &group)?;
                }
            }
        }

        let baseline = self.accuracy(sample, rows)?;
        let split = self.split.take();
        let collapsed = self.accuracy(sample, rows)?;

        if collapsed < baseline {
            self.split = split;
        }
        Ok(())
    }


    fn accuracy(&self, sample: &Sample, rows: &[usize]) -> Result<f64> {
        let truth = rows.iter()
            .map(|&row| sample.label(row))
            .collect::<Vec<_>>();
        let predicted = rows.iter()
            .map(|&row| self.predict(sample, row))
            .collect::<Vec<_>>();
        let matrix = ConfusionMatrix::from_labels(&truth, &predicted)?;
        Ok(matrix.accuracy())
    }
}


#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::Feature;
    use super::*;
    use super::super::node::Split;

    fn leaf(label: &str, n: usize) -> Node {
        let histogram = std::iter::repeat(label).take(n).collect();
        Node::leaf(histogram, label.to_string())
    }


    // A stump on `A` whose `y` branch disagrees with the validation rows.
    fn stump(sample: &Sample) -> Node {
        let attribute = sample["A"].attribute().clone();
        let children = BTreeMap::from([
            ("x".to_string(), leaf("0", 3)),
            ("y".to_string(), leaf("1", 1)),
        ]);
        let histogram = ["0", "0", "0", "1"].into_iter().collect();
        Node::rule(histogram, "0".into(), Some(Split::new(attribute, children)))
    }


    #[test]
    fn useless_split_collapses() {
        let a = Feature::categorical("A", ["x", "y", "y"]);
        let c = Feature::categorical("C", ["0", "0", "0"]);
        let sample = Sample::new(vec![a], c).unwrap();

        let mut root = stump(&sample);
        root.prune(&sample, &[0, 1, 2]).unwrap();
        assert!(root.is_terminal());
        assert_eq!(root.label(), "0");
    }


    #[test]
    fn useful_split_survives() {
        let a = Feature::categorical("A", ["x", "y", "y"]);
        let c = Feature::categorical("C", ["0", "1", "1"]);
        let sample = Sample::new(vec![a], c).unwrap();

        let mut root = stump(&sample);
        let before = root.clone();
        root.prune(&sample, &[0, 1, 2]).unwrap();
        assert_eq!(root, before);
    }


    #[test]
    fn no_validation_rows_leaves_the_tree_untouched() {
        let a = Feature::categorical("A", ["x"]);
        let c = Feature::categorical("C", ["0"]);
        let sample = Sample::new(vec![a], c).unwrap();

        let mut root = stump(&sample);
        let before = root.clone();
        root.prune(&sample, &[]).unwrap();
        assert_eq!(root, before);
    }
}
