//! Defines the inner representation 
//! of the Decision Tree class.
use serde::Serialize;

use crate::{Attribute, ClassHistogram, Sample};

use std::fmt;
use std::collections::BTreeMap;


const INDENT: &str = "    ";


/// Enumeration of `RuleNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// A node that splits on an attribute.
    Rule(RuleNode),


    /// A node that has no child.
    Leaf(LeafNode),
}


/// Represents the leaf nodes of decision tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafNode {
    pub(super) histogram: ClassHistogram,
    pub(super) label: String,
}


/// Represents the rule nodes of decision tree.
///
/// A rule node without a split behaves as a leaf.
/// Such nodes are produced when the rule generator finds
/// nothing worth splitting on, and by pruning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleNode {
    pub(super) histogram: ClassHistogram,
    pub(super) label: String,
    pub(super) split: Option<Split>,
}


/// The split attribute of a rule node and
/// one child for each value observed at training time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Split {
    pub(super) attribute: Attribute,
    pub(super) children: BTreeMap<String, Node>,
}


impl Split {
    /// Construct a split from an attribute and its children.
    #[inline]
    pub(crate) fn new(
        attribute: Attribute,
        children: BTreeMap<String, Node>,
    ) -> Self
    {
        Self { attribute, children }
    }


    /// Returns the split attribute.
    #[inline]
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }


    /// Returns the children, keyed by the attribute value.
    #[inline]
    pub fn children(&self) -> &BTreeMap<String, Node> {
        &self.children
    }


    /// Returns the child that the `row`-th example of `sample` goes to.
    /// Returns `None` if `sample` does not have the split attribute
    /// or if the row takes a value that was not seen at training time.
    pub(super) fn route(&self, sample: &Sample, row: usize) -> Option<&Node> {
        let k = sample.attribute_index(&self.attribute)?;
        let value = sample.feature(k).value_string(row);
        self.children.get(value.as_ref())
    }
}


impl RuleNode {
    pub(super) fn predict(&self, sample: &Sample, row: usize) -> &str {
        self.split.as_ref()
            .and_then(|split| split.route(sample, row))
            .map(|child| child.predict(sample, row))
            .unwrap_or(self.label.as_str())
    }
}


impl Node {
    /// Construct a leaf node.
    #[inline]
    pub(crate) fn leaf(histogram: ClassHistogram, label: String) -> Self {
        Self::Leaf(LeafNode { histogram, label })
    }


    /// Construct a rule node.
    #[inline]
    pub(crate) fn rule(
        histogram: ClassHistogram,
        label: String,
        split: Option<Split>,
    ) -> Self
    {
        Self::Rule(RuleNode { histogram, label, split })
    }


    /// Returns the class histogram of the training rows
    /// that reached this node.
    #[inline]
    pub fn histogram(&self) -> &ClassHistogram {
        match self {
            Self::Rule(node) => &node.histogram,
            Self::Leaf(node) => &node.histogram,
        }
    }


    /// Returns the majority label of this node.
    #[inline]
    pub fn label(&self) -> &str {
        match self {
            Self::Rule(node) => &node.label,
            Self::Leaf(node) => &node.label,
        }
    }


    /// Returns the split of this node, if any.
    #[inline]
    pub fn get_split(&self) -> Option<&Split> {
        match self {
            Self::Rule(node) => node.split.as_ref(),
            Self::Leaf(_) => None,
        }
    }


    /// Returns `true` if this node predicts its own label
    /// for every example.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.get_split().is_none()
    }


    /// Returns the child for `value`, if any.
    pub fn child<S: AsRef<str>>(&self, value: S) -> Option<&Node> {
        self.get_split()
            .and_then(|split| split.children.get(value.as_ref()))
    }


    /// Predicts the label of the `row`-th example of `sample`.
    ///
    /// The example goes down the tree as long as
    /// the split attribute exists in `sample` and
    /// the value it takes was seen at training time.
    /// Otherwise, the label of the node it stopped at is returned.
    pub fn predict(&self, sample: &Sample, row: usize) -> &str {
        match self {
            Self::Rule(node) => node.predict(sample, row),
            Self::Leaf(node) => &node.label,
        }
    }


    /// Returns the depth of this sub-tree.
    /// A terminal node has depth `0`.
    pub fn depth(&self) -> usize {
        self.get_split()
            .map(|split| {
                split.children.values()
                    .map(|child| child.depth() + 1)
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }


    /// Returns the number of terminal nodes of this sub-tree.
    pub fn n_leaves(&self) -> usize {
        match self.get_split() {
            Some(split) => split.children.values()
                .map(|child| child.n_leaves())
                .sum(),
            None => 1,
        }
    }


    pub(super) fn fmt_with_depth(&self, f: &mut fmt::Formatter<'_>, depth: usize)
        -> fmt::Result
    {
        let indent = INDENT.repeat(depth);
        match self.get_split() {
            None => {
                write!(f, "{indent}Leaf({}) {}", self.label(), self.histogram())
            },
            Some(split) => {
                let name = split.attribute.name();
                write!(f, "{indent}Rule({name}) {}", self.histogram())?;
                for (value, child) in split.children.iter() {
                    write!(f, "\n{indent}{INDENT}{name} = {value}\n")?;
                    child.fmt_with_depth(f, depth + 2)?;
                }
                Ok(())
            },
        }
    }


    pub(super) fn to_dot_info(&self, id: usize) -> (Vec<String>, usize) {
        match self.get_split() {
            Some(split) => {
                let mut info = vec![format!(
                    "\tnode_{id} [ label = \"{attr} ?\" ];\n",
                    attr = escape(split.attribute.name()),
                )];

                let mut next_id = id + 1;
                for (value, child) in split.children.iter() {
                    let child_id = next_id;
                    let (mut child_info, return_id) = child.to_dot_info(child_id);
                    info.append(&mut child_info);

                    let edge = format!(
                        "\tnode_{id} -- node_{child_id} [ label = \"{value}\" ];\n",
                        value = escape(value),
                    );
                    info.push(edge);
                    next_id = return_id;
                }

                (info, next_id)
            },
            None => {
                let info = format!(
                    "\tnode_{id} [ label = \"{label}\", shape = box ];\n",
                    label = escape(self.label()),
                );

                (vec![info], id + 1)
            }
        }
    }
}


impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_depth(f, 0)
    }
}


fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
