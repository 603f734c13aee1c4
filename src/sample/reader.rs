use std::path::Path;

use crate::{Result, RuleError};
use super::sample_struct::Sample;


/// A struct that returns [`Sample`].
/// Using this struct, one can read a CSV format file to [`Sample`].
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use minirules::SampleReader;
/// 
/// let filename = "/path/to/csv/file.csv";
/// let sample = SampleReader::default()
///     .file(filename)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct SampleReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
}


impl<P, S> SampleReader<P, S> {
    /// Construct a new instance of [`SampleReader`].
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: false,
            target: None,
        }
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }
}


impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for the class labels.
    /// Each item of the column must be a non-negative integer.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments.
    /// This method consumes `self.`
    pub fn read(self) -> Result<Sample> {
        let file = self.file
            .ok_or(RuleError::InvalidSample("the file name is not set".into()))?;
        let target = self.target
            .ok_or(RuleError::InvalidSample(
                "the target column is not set. \
                Use `SampleReader::target_feature`".into()
            ))?;

        Sample::from_csv(file, self.has_header)?
            .set_target(target)
    }
}
