//! Defines the decision tree classifier.
use serde::Serialize;
use tracing::debug;

use crate::{Attribute, Classifier, Result, Sample};
use super::node::*;

use std::fmt;
use std::path::Path;
use std::fs::File;
use std::io::prelude::*;


/// Decision tree classifier.
/// Owns the root node and remembers
/// the prune ratio it was grown with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionTreeClassifier {
    root: Node,
    prune_ratio: f64,
    class_attribute: Attribute,
}


impl DecisionTreeClassifier {
    #[inline]
    pub(super) fn from_components(
        root: Node,
        prune_ratio: f64,
        class_attribute: Attribute,
    ) -> Self
    {
        Self { root, prune_ratio, class_attribute, }
    }


    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the prune ratio used to grow this tree.
    #[inline]
    pub fn prune_ratio(&self) -> f64 {
        self.prune_ratio
    }


    /// Returns the class attribute of the training sample.
    #[inline]
    pub fn class_attribute(&self) -> &Attribute {
        &self.class_attribute
    }


    /// Returns the depth of the tree.
    #[inline]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Returns the number of terminal nodes.
    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }


    /// Reduced-error pruning against every row of `validation`.
    /// The features of `validation` must share their attributes
    /// with the training sample, e.g., through
    /// [`Sample::split`] or [`SampleReader::schema`](crate::SampleReader::schema).
    /// Pruning never lowers the accuracy on `validation`.
    pub fn prune(&mut self, validation: &Sample) -> Result<()> {
        let rows = (0..validation.shape().0).collect::<Vec<_>>();
        let before = self.n_leaves();
        self.root.prune(validation, &rows)?;
        debug!(
            rows = rows.len(),
            leaves_before = before,
            leaves_after = self.n_leaves(),
            "pruned"
        );
        Ok(())
    }


    /// Write the current decision tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(b"graph DecisionTree {\n")?;

        let info = self.root.to_dot_info(0).0;
        for row in info {
            f.write_all(row.as_bytes())?;
        }

        f.write_all(b"}\n")?;

        Ok(())
    }


    /// Returns a JSON dump of the tree.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }
}


impl Classifier for DecisionTreeClassifier {
    fn predict(&self, sample: &Sample, row: usize) -> String {
        self.root.predict(sample, row).to_string()
    }
}


impl fmt::Display for DecisionTreeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}
