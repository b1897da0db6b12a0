use std::path::Path;
use std::fs::File;
use std::io::BufReader;

use crate::{ForestError, Result};
use super::sample_struct::Sample;


/// A struct that returns [`Sample`].
/// Using this struct, one can read a CSV format file to [`Sample`].
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use miniforest::SampleReader;
/// let train = SampleReader::default()
///     .file("/path/to/train.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
///
/// // Bind the columns of the test file to the training attributes.
/// let test = SampleReader::default()
///     .file("/path/to/test.csv")
///     .has_header(true)
///     .target_feature("class")
///     .schema(&train)
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<'a, P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
    schema: Option<&'a Sample>,
}


impl<P, S> Default for SampleReader<'_, P, S> {
    fn default() -> Self {
        Self { file: None, has_header: false, target: None, schema: None, }
    }
}


impl<'a, P, S> SampleReader<'a, P, S> {
    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Reuse the attributes of `schema` for the columns
    /// whose names appear in it.
    /// Use this to read a held-out file for a tree grown on `schema`.
    pub fn schema(mut self, schema: &'a Sample) -> Self {
        self.schema = Some(schema);
        self
    }
}


impl<P, S> SampleReader<'_, P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> SampleReader<'_, P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for the class label.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}


impl<P, S> SampleReader<'_, P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments
    /// and returns the resulting [`Sample`].
    /// This method consumes `self.`
    pub fn read(self) -> Result<Sample> {
        let file = self.file
            .ok_or_else(|| ForestError::contract(
                "the file name is not set. Use `SampleReader::file`."
            ))?;
        let target = self.target
            .ok_or_else(|| ForestError::contract(
                "the target column is not set. \
                 Use `SampleReader::target_feature`."
            ))?;

        let reader = BufReader::new(File::open(file.as_ref())?);
        Sample::from_reader(reader, self.has_header, target, self.schema)
    }
}
