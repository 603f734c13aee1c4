use std::fmt;

use crate::Condition;


/// An event reported by a rule learner.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent<'a> {
    /// The number of positive/negative samples left to cover.
    Remaining {
        /// Remaining positive samples.
        pos: usize,
        /// Remaining negative samples.
        neg: usize,
    },
    /// A rule starts growing.
    Growing,
    /// The best literal of this growing step.
    LiteralFound(&'a Condition),
    /// No literal improves the rule.
    NoLiteral,
    /// The literal did not change the rule, so growing stops.
    SameRule {
        /// The number of conditions of the rule.
        size: usize,
    },
    /// A tentative removal of the last condition.
    PruneStep {
        /// The metric value before the removal.
        old: f64,
        /// The metric value after the removal.
        new: f64,
    },
    /// A rule has been pruned.
    Pruned {
        /// The number of conditions before pruning.
        before: usize,
        /// The number of conditions after pruning.
        after: usize,
    },
    /// The pruned rule is wrong on most of the prune split.
    AccuracyFloor {
        /// The accuracy of the rule on the prune split.
        accuracy: f64,
    },
    /// The description length after adding a rule.
    DescriptionLength {
        /// The description length with the rule.
        dl: f64,
        /// The minimum description length so far.
        mdl: f64,
    },
    /// The description length exceeds the minimum by too much.
    MdlExceeded,
    /// The metric values of the two candidate rules.
    Candidates {
        /// The rule grown on the grow split.
        grow: f64,
        /// The rule grown on the prune split.
        prune: f64,
    },
    /// An optimisation round starts.
    Optimisation {
        /// The round, counted from `1`.
        round: usize,
    },
    /// The description lengths of the candidates of a rule.
    TdlScores {
        /// With the freshly grown replacement.
        replacement: f64,
        /// With the revised rule.
        revision: f64,
        /// With the current rule.
        original: f64,
    },
    /// The rule at `index` was replaced.
    RuleChanged {
        /// The index of the rule.
        index: usize,
    },
    /// The rule at `index` was removed.
    Generalised {
        /// The index of the removed rule.
        index: usize,
    },
    /// The training accuracy of a single-feature ruleset.
    FeatureScore {
        /// The feature name.
        feature: &'a str,
        /// The accuracy of the ruleset of this feature.
        accuracy: f64,
        /// The best accuracy so far.
        best: f64,
        /// The number of rules.
        rules: usize,
    },
    /// The learner has finished.
    Fitted {
        /// The learner name.
        learner: &'a str,
        /// The number of rules.
        rules: usize,
    },
}


impl LogEvent<'_> {
    /// Returns a short tag that groups the events.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Remaining { .. } | Self::Fitted { .. } => "FIT",
            Self::Growing
                | Self::LiteralFound(_)
                | Self::NoLiteral
                | Self::SameRule { .. } => "GROW",
            Self::PruneStep { .. }
                | Self::Pruned { .. }
                | Self::AccuracyFloor { .. }
                | Self::Candidates { .. } => "PRUNE",
            Self::DescriptionLength { .. } | Self::MdlExceeded => "MDL",
            Self::Optimisation { .. }
                | Self::TdlScores { .. }
                | Self::RuleChanged { .. }
                | Self::Generalised { .. } => "OPT",
            Self::FeatureScore { .. } => "ONER",
        }
    }
}


impl fmt::Display for LogEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remaining { pos, neg } => {
                write!(f, "Pos: {pos}, Neg: {neg} remaining.")
            },
            Self::Growing => write!(f, "Growing"),
            Self::LiteralFound(cond) => write!(f, "Found condition: {cond}"),
            Self::NoLiteral => {
                write!(f, "No better condition could have been found.")
            },
            Self::SameRule { size } => {
                write!(f, "Generated the same rule with length: {size}")
            },
            Self::PruneStep { old, new } => {
                write!(f, "Old value: {old:.5}, new value: {new:.5}")
            },
            Self::Pruned { before, after } => {
                write!(f, "Pruned rule from {before} to {after} conditions")
            },
            Self::AccuracyFloor { accuracy } => {
                write!(f, "Rule accuracy {accuracy:.5} < 0.5, stopping")
            },
            Self::DescriptionLength { dl, mdl } => {
                write!(f, "DL: {dl:.5}, MDL: {mdl:.5}")
            },
            Self::MdlExceeded => {
                write!(f, "Description length exceeds MDL, stopping")
            },
            Self::Candidates { grow, prune } => {
                write!(f, "Grow rule: {grow:.5}, prune rule: {prune:.5}")
            },
            Self::Optimisation { round } => write!(f, "Optimisation #{round}"),
            Self::TdlScores { replacement, revision, original } => {
                write!(
                    f,
                    "TDL Replacement: {replacement:.5}, \
                    Revision: {revision:.5}, \
                    Original: {original:.5}"
                )
            },
            Self::RuleChanged { index } => {
                write!(f, "Changed rule #{index} in ruleset")
            },
            Self::Generalised { index } => {
                write!(f, "Removed rule #{index}")
            },
            Self::FeatureScore { feature, accuracy, best, rules } => {
                write!(
                    f,
                    "Feature {feature}: acc {accuracy:.5} \
                    (best {best:.5}) with {rules} rules"
                )
            },
            Self::Fitted { learner, rules } => {
                write!(f, "{learner} finished with {rules} rules")
            },
        }
    }
}
