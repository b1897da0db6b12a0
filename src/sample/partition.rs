//! A row/attribute subset of a [`Sample`] that trees are grown on.
use crate::{ForestError, Result};
use super::attribute::Attribute;
use super::feature::Feature;
use super::histogram::ClassHistogram;
use super::sample_struct::Sample;

use std::collections::BTreeMap;


/// A view of some rows of a [`Sample`]
/// restricted to the attributes that are still available for splitting.
///
/// Decomposing a partition on an attribute removes
/// that attribute from every child partition.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    sample: &'a Sample,
    rows: Vec<usize>,
    available: Vec<usize>,
}


impl<'a> Partition<'a> {
    /// The whole sample: every row and every feature.
    pub fn new(sample: &'a Sample) -> Self {
        let (n_sample, n_feature) = sample.shape();
        Self {
            sample,
            rows: (0..n_sample).collect(),
            available: (0..n_feature).collect(),
        }
    }


    /// The given rows of `sample` with every feature available.
    pub fn from_rows(sample: &'a Sample, rows: Vec<usize>) -> Self {
        let n_feature = sample.shape().1;
        Self { sample, rows, available: (0..n_feature).collect(), }
    }


    /// Returns the underlying sample.
    #[inline]
    pub fn sample(&self) -> &'a Sample {
        self.sample
    }


    /// Returns the row indices of this partition.
    #[inline]
    pub fn rows(&self) -> &[usize] {
        &self.rows[..]
    }


    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }


    /// Returns `true` if the partition has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }


    /// Iterates over the features that are still available.
    pub fn features(&self) -> impl Iterator<Item = &'a Feature> + '_ {
        let sample = self.sample;
        self.available.iter().map(move |&k| sample.feature(k))
    }


    /// Iterates over the attributes that are still available.
    pub fn attributes(&self) -> impl Iterator<Item = &'a Attribute> + '_ {
        self.features().map(|feat| feat.attribute())
    }


    /// Returns `true` if `attribute` can still be split on.
    pub fn has_attribute(&self, attribute: &Attribute) -> bool {
        self.attributes().any(|attr| attr == attribute)
    }


    /// Counts the class labels of this partition.
    pub fn class_histogram(&self) -> ClassHistogram {
        self.sample.class_histogram(&self.rows)
    }


    /// Splits the partition by the category each row takes on `attribute`.
    /// The children no longer offer `attribute`.
    ///
    /// Asking for an attribute that is not available here
    /// is a [`ForestError::ContractViolation`].
    pub fn decompose(&self, attribute: &Attribute)
        -> Result<BTreeMap<String, Partition<'a>>>
    {
        let position = self.available.iter()
            .position(|&k| self.sample.feature(k).attribute() == attribute)
            .ok_or_else(|| ForestError::contract(format!(
                "attribute `{}` is not available in this partition",
                attribute.name()
            )))?;

        let mut available = self.available.clone();
        available.remove(position);

        let groups = self.sample.decompose(attribute, &self.rows)?;
        let children = groups.into_iter()
            .map(|(value, rows)| {
                let child = Partition {
                    sample: self.sample,
                    rows,
                    available: available.clone(),
                };
                (value, child)
            })
            .collect();
        Ok(children)
    }
}
