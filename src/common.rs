//! Defines some common functions used in this library.

/// Defines an orderable wrapper of feature values.
pub mod value;

/// Defines some useful functions such as sorted-set differences.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;

pub use value::FeatureValue;
