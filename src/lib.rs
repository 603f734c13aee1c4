#![warn(missing_docs)]

//! 
//! A crate that provides some rule learning algorithms.
//! Every learner in this crate induces an ordered list of
//! human-readable rules for a single positive class.
//! Each rule is a conjunction of feature conditions,
//! and the first rule that covers a sample decides its prediction.
//! 
//! This crate includes the following learners.
//! 
//! - Separate-and-conquer learners
//!     `Irep` grows a rule with the FOIL information gain
//!     on a random grow split,
//!     prunes it on the remaining prune split,
//!     and removes the covered samples until no positive sample is left.
//!     `Competitor` grows two rules on each iteration and keeps
//!     the better one.
//! 
//! 
//! - MDL-guided learners
//!     `Ripper` runs `Irep` with a minimum-description-length
//!     stopping criterion,
//!     then revisits every rule in the context of the whole ruleset
//!     and removes the rules that do not pay for themselves.
//! 
//! 
//! - Baselines
//!     `OneR` picks the single feature whose discretised ranges
//!     predict the training labels best.
//! 
//! 
//! # Example
//! ```no_run
//! use minirules::prelude::*;
//! 
//! let sample = SampleReader::default()
//!     .file("path/to/data.csv")
//!     .has_header(true)
//!     .target_feature("class")
//!     .read()
//!     .unwrap();
//! 
//! let mut learner = Ripper::init()
//!     .k(2)
//!     .seed(1234);
//! 
//! let ruleset = learner.fit_sample(&sample, 1).unwrap();
//! println!("{ruleset}");
//! 
//! let predictions = learner.predict(&ruleset, sample.data(), 1).unwrap();
//! let accuracy = measure_accuracy(sample.target(), &predictions).unwrap();
//! println!("Training accuracy: {accuracy}");
//! ```

pub mod error;
pub mod common;
pub mod rule;
pub mod learner;
pub mod logging;
pub mod sample;
pub mod prelude;


pub use error::{RuleError, Result};

pub use common::FeatureValue;

pub use rule::{
    Operator,
    Condition,
    Test,
    Rule,
    Prediction,
    Ruleset,
};

pub use learner::{
    RuleLearner,
    LearnerCore,
    LearnerConfig,
    PruningMetric,
    ConfusionMatrix,

    Irep,
    Ripper,
    Competitor,
    OneR,

    measure_accuracy,
};

pub use logging::{
    Logger,
    LogEvent,
    SilentLogger,
    TerminalLogger,
    MemoryLogger,
};

pub use sample::{Sample, SampleReader};
