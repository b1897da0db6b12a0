use crate::{ForestError, Result};
use crate::constants::DEFAULT_PRECISION;
use super::attribute::{Attribute, AttributeKind};

use std::borrow::Cow;


/// The values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Values used as they are.
    Categorical(Vec<String>),
    /// Values rendered through the attribute's precision.
    Numeric(Vec<f64>),
}


impl Column {
    fn len(&self) -> usize {
        match self {
            Self::Categorical(values) => values.len(),
            Self::Numeric(values) => values.len(),
        }
    }


    fn kind_matches(&self, kind: AttributeKind) -> bool {
        matches!(
            (self, kind),
            (Self::Categorical(_), AttributeKind::Categorical)
                | (Self::Numeric(_), AttributeKind::Numeric { .. })
        )
    }


    fn empty_like(&self, capacity: usize) -> Self {
        match self {
            Self::Categorical(_) => Self::Categorical(Vec::with_capacity(capacity)),
            Self::Numeric(_) => Self::Numeric(Vec::with_capacity(capacity)),
        }
    }
}


/// A column of a [`Sample`](crate::Sample):
/// an [`Attribute`] together with its values.
#[derive(Debug, Clone)]
pub struct Feature {
    pub(super) attribute: Attribute,
    pub(super) column: Column,
}


impl Feature {
    /// Construct a categorical feature with a fresh attribute.
    pub fn categorical<S, I, T>(name: S, values: I) -> Self
        where S: ToString,
              I: IntoIterator<Item = T>,
              T: ToString,
    {
        let values = values.into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>();
        Self {
            attribute: Attribute::categorical(name),
            column: Column::Categorical(values),
        }
    }


    /// Construct a numeric feature with a fresh attribute.
    /// Values are turned into categories with two decimals.
    pub fn numeric<S: ToString>(name: S, values: Vec<f64>) -> Self {
        Self::numeric_with_precision(name, values, DEFAULT_PRECISION)
    }


    /// Construct a numeric feature whose categories
    /// keep `precision` decimals.
    pub fn numeric_with_precision<S: ToString>(
        name: S,
        values: Vec<f64>,
        precision: usize,
    ) -> Self
    {
        Self {
            attribute: Attribute::numeric(name, precision),
            column: Column::Numeric(values),
        }
    }


    /// Construct a feature that reuses an existing attribute.
    /// The column must be stored the way the attribute says.
    pub fn with_attribute(attribute: Attribute, column: Column) -> Result<Self> {
        if !column.kind_matches(attribute.kind()) {
            return Err(ForestError::contract(format!(
                "column `{}` does not match the kind of its attribute",
                attribute.name()
            )));
        }
        Ok(Self { attribute, column })
    }


    /// Returns the attribute of this column.
    #[inline]
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }


    /// Returns the column.
    #[inline]
    pub fn column(&self) -> &Column {
        &self.column
    }


    /// Get the feature name.
    #[inline]
    pub fn name(&self) -> &str {
        self.attribute.name()
    }


    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.column.len()
    }


    /// Returns `true` if the column has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns the canonical string category of the `row`-th value.
    pub fn value_string(&self, row: usize) -> Cow<'_, str> {
        match &self.column {
            Column::Categorical(values) => Cow::Borrowed(&values[row]),
            Column::Numeric(values) => {
                Cow::Owned(self.attribute.numeric_to_string(values[row]))
            },
        }
    }


    /// Returns the distinct categories of this column in ascending order.
    pub fn distinct_values(&self) -> Vec<String> {
        let mut values = (0..self.len())
            .map(|row| self.value_string(row).into_owned())
            .collect::<Vec<_>>();
        values.sort();
        values.dedup();
        values
    }


    /// Returns a new column holding the given rows (repetition allowed).
    /// The attribute identity is kept.
    pub(crate) fn select(&self, rows: &[usize]) -> Self {
        let column = match &self.column {
            Column::Categorical(values) => Column::Categorical(
                rows.iter().map(|&i| values[i].clone()).collect()
            ),
            Column::Numeric(values) => Column::Numeric(
                rows.iter().map(|&i| values[i]).collect()
            ),
        };
        Self { attribute: self.attribute.clone(), column }
    }


    /// Returns an empty column sharing the attribute of `self`.
    pub(crate) fn empty_like(&self, capacity: usize) -> Self {
        Self {
            attribute: self.attribute.clone(),
            column: self.column.empty_like(capacity),
        }
    }


    /// Appends the `row`-th value of `other` to `self`.
    pub(crate) fn push_from(&mut self, other: &Self, row: usize) {
        match (&mut self.column, &other.column) {
            (Column::Categorical(to), Column::Categorical(from)) => {
                to.push(from[row].clone());
            },
            (Column::Numeric(to), Column::Numeric(from)) => {
                to.push(from[row]);
            },
            _ => unreachable!("columns sharing an attribute share a kind"),
        }
    }


    /// Appends a raw (textual) value read from a file.
    pub(crate) fn push_raw(&mut self, raw: &str, line: usize) -> Result<()> {
        match &mut self.column {
            Column::Categorical(values) => {
                values.push(raw.to_string());
            },
            Column::Numeric(values) => {
                let value = raw.parse::<f64>()
                    .map_err(|_| ForestError::Parse {
                        line,
                        reason: format!(
                            "`{raw}` is not a number (column `{}`)",
                            self.attribute.name()
                        ),
                    })?;
                values.push(value);
            },
        }
        Ok(())
    }


    /// Overwrites the `row`-th value of a categorical column.
    pub(crate) fn set_category(&mut self, row: usize, value: &str) -> Result<()> {
        match &mut self.column {
            Column::Categorical(values) => {
                values[row] = value.to_string();
                Ok(())
            },
            Column::Numeric(_) => Err(ForestError::NonCategoricalTarget {
                name: self.attribute.name().to_string(),
            }),
        }
    }
}
