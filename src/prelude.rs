//! Exports the rule learners, the rule structures, and the traits.
//! 
pub use crate::learner::{
    // Rule learner trait
    RuleLearner,
    LearnerConfig,
    PruningMetric,


    // Separate-and-conquer learners
    Irep,
    Competitor,


    // MDL-guided learners
    Ripper,


    // Baselines
    OneR,


    // Evaluation
    ConfusionMatrix,
    measure_accuracy,
};


pub use crate::rule::{
    Condition,
    Operator,
    Rule,
    Ruleset,
};


pub use crate::logging::{
    Logger,
    SilentLogger,
    TerminalLogger,
    MemoryLogger,
};


pub use crate::sample::{
    Sample,
    SampleReader,
};


pub use crate::error::{RuleError, Result};
