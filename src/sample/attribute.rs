use serde::Serialize;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};


static NEXT_ATTRIBUTE_ID: AtomicU64 = AtomicU64::new(0);


/// Process-unique identity of an [`Attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct AttributeId(u64);


impl AttributeId {
    fn fresh() -> Self {
        Self(NEXT_ATTRIBUTE_ID.fetch_add(1, Ordering::Relaxed))
    }
}


/// The way the values of a column are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeKind {
    /// Values are stored as strings and used as they are.
    Categorical,
    /// Values are stored as `f64`.
    /// A value becomes a category through its decimal rendering
    /// with `precision` digits after the point.
    Numeric {
        /// Number of digits after the decimal point.
        precision: usize,
    },
}


/// Identifies one column of a [`Sample`](crate::Sample).
///
/// Two attributes are equal iff they share the same [`AttributeId`].
/// Cloning an attribute keeps its identity,
/// while constructing a new one with the same name does not.
/// Trees resolve their split attributes by identity,
/// so a tree grown on one sample can be applied to
/// any sample derived from it (subsamples, splits, folds)
/// or read with [`SampleReader::schema`](crate::SampleReader::schema).
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    #[serde(skip)]
    id: AttributeId,
    name: String,
    kind: AttributeKind,
}


impl Attribute {
    /// Construct a new categorical attribute named `name`.
    pub fn categorical<S: ToString>(name: S) -> Self {
        Self::new(name, AttributeKind::Categorical)
    }


    /// Construct a new numeric attribute named `name`.
    pub fn numeric<S: ToString>(name: S, precision: usize) -> Self {
        Self::new(name, AttributeKind::Numeric { precision })
    }


    fn new<S: ToString>(name: S, kind: AttributeKind) -> Self {
        Self { id: AttributeId::fresh(), name: name.to_string(), kind, }
    }


    /// Returns the identity of this attribute.
    #[inline]
    pub fn id(&self) -> AttributeId {
        self.id
    }


    /// Returns the column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the storage kind.
    #[inline]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }


    /// Returns `true` if the values are stored as strings.
    #[inline]
    pub fn is_categorical(&self) -> bool {
        self.kind == AttributeKind::Categorical
    }


    /// Converts a stored numeric value to its canonical category.
    /// Categorical attributes render with the default precision.
    pub fn numeric_to_string(&self, value: f64) -> String {
        let precision = match self.kind {
            AttributeKind::Numeric { precision } => precision,
            AttributeKind::Categorical => crate::constants::DEFAULT_PRECISION,
        };
        format!("{value:.precision$}")
    }
}


impl PartialEq for Attribute {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}


impl Eq for Attribute {}


impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}


impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
