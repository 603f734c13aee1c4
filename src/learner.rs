//! Provides the rule learners and the engine they share.

/// Defines the `RuleLearner` trait and the shared engine.
pub mod core;

/// Defines the configuration of the learners.
pub mod config;

/// Defines the pruning metrics and reduced-error pruning.
pub mod pruning;

/// Defines the literal search and rule growing.
pub mod literal;

/// Defines the description length of rules and exceptions.
pub mod description_length;

/// Defines the confusion matrix and the accuracy.
pub mod confusion;

// Separate-and-conquer learners
mod irep;
mod competitor;

// MDL-guided learners
mod ripper;

// Baselines
mod one_r;


pub use self::core::{RuleLearner, LearnerCore};
pub use config::LearnerConfig;
pub use pruning::PruningMetric;
pub use confusion::{ConfusionMatrix, measure_accuracy};

pub use irep::Irep;
pub use ripper::Ripper;
pub use competitor::Competitor;
pub use one_r::OneR;
