//! Struct `Sample` represents a batch of categorical examples.  

// Provides the column identity.
pub(crate) mod attribute;
// Provides feature (column) struct.
pub(crate) mod feature;
// Provides the class-value counter.
pub(crate) mod histogram;
// Provides sample struct.
pub(crate) mod sample_struct;
// Provides a row-subset view used while growing trees.
pub(crate) mod partition;

// Provides a struct that reads a file.
pub(crate) mod reader;


pub use attribute::{Attribute, AttributeId, AttributeKind};
pub use feature::{Column, Feature};
pub use histogram::ClassHistogram;
pub use sample_struct::Sample;
pub use partition::Partition;
pub use reader::SampleReader;
