//! Provides [`Irep`] by Fürnkranz & Widmer, 1994.
use crate::{
    Result,
    Ruleset,
    RuleLearner,

    common::checker,
    logging::LogEvent,
};
use super::core::LearnerCore;
use super::config::LearnerConfig;
use super::pruning::PruningMetric;


const ACCURACY_FLOOR: f64 = 0.5;


/// Defines `Irep`, Incremental Reduced Error Pruning.
/// This struct is based on the paper:
/// [Incremental Reduced Error Pruning](https://doi.org/10.1016/B978-1-55860-335-6.50017-9)
/// by Johannes Fürnkranz and Gerhard Widmer.
/// 
/// While a positive sample is left,
/// `Irep` splits the remaining samples into a grow and a prune split,
/// grows a rule on the grow split,
/// prunes it on the prune split,
/// and removes the samples the rule covers.
/// Learning stops when a pruned rule is wrong
/// on most of the prune split.
/// 
/// # Example
/// ```
/// use minirules::prelude::*;
/// 
/// let x = vec![
///     vec![0.0, 0.0, 1.0, 1.0],
///     vec![0.0, 1.0, 0.0, 1.0],
/// ];
/// let y = vec![0, 0, 1, 1];
/// let names = vec!["a".to_string(), "b".to_string()];
/// 
/// let mut learner = Irep::init()
///     .seed(1234);
/// let ruleset = learner.fit(&x, &y, &names, 1).unwrap();
/// 
/// assert_eq!(ruleset.len(), 1);
/// assert_eq!(ruleset.to_string(), "[\n  a[0] >= 1 -> is 1\n]");
/// ```
#[derive(Debug)]
pub struct Irep {
    core: LearnerCore,
}


impl Irep {
    /// Initialize `Irep` with the default configuration.
    /// The default pruning metric is [`PruningMetric::IrepDefault`].
    pub fn init() -> Self {
        Self::with_config(LearnerConfig::default())
    }


    /// Construct `Irep` from `config`.
    /// Fails if the configuration is invalid.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }


    fn with_config(config: LearnerConfig) -> Self {
        let core = LearnerCore::new(config, PruningMetric::IrepDefault);
        Self { core }
    }
}


impl Default for Irep {
    fn default() -> Self {
        Self::init()
    }
}


impl RuleLearner for Irep {
    fn name(&self) -> &str {
        "IREP"
    }


    fn core(&self) -> &LearnerCore {
        &self.core
    }


    fn core_mut(&mut self) -> &mut LearnerCore {
        &mut self.core
    }


    fn fit(
        &mut self,
        x: &[Vec<f64>],
        y: &[usize],
        feature_names: &[String],
        positive_class: usize,
    ) -> Result<Ruleset>
    {
        self.core.config().validate()?;
        checker::check_fit_input(x, y, feature_names)?;

        let core = &mut self.core;
        let (mut pos, mut neg) = LearnerCore::pos_neg_split(y, positive_class);
        let mut ruleset = Ruleset::new();

        while !pos.is_empty() {
            core.log(&LogEvent::Remaining { pos: pos.len(), neg: neg.len() });

            let (pos_grow, pos_prune) = core.data_split(&pos)?;
            let (neg_grow, neg_prune) = core.split_or_empty(&neg)?;

            let mut rule = core.grow_rule(x, feature_names, &pos_grow, &neg_grow)?;
            if core.config().prune_rules {
                rule = core.prune_rule(&rule, x, &pos_prune, &neg_prune);
            }

            // An empty prune split falls back to the grow split.
            let accuracy = if pos_prune.is_empty() && neg_prune.is_empty() {
                LearnerCore::rule_accuracy(x, &rule, &pos_grow, &neg_grow)
            } else {
                LearnerCore::rule_accuracy(x, &rule, &pos_prune, &neg_prune)
            };
            if accuracy < ACCURACY_FLOOR {
                core.log(&LogEvent::AccuracyFloor { accuracy });
                break;
            }

            pos = rule.not_covered_indices(x, &pos);
            neg = rule.not_covered_indices(x, &neg);

            rule.set_prediction(positive_class, true);
            ruleset.add_rule(rule);
        }

        core.log(&LogEvent::Fitted { learner: "IREP", rules: ruleset.len() });
        Ok(ruleset)
    }
}
