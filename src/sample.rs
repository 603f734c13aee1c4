//! Struct `Sample` holds a labelled, column-major data set.

// Provides sample struct.
pub(crate) mod sample_struct;

// Provides a struct that reads a file.
pub(crate) mod reader;


pub use reader::SampleReader;
pub use sample_struct::Sample;
