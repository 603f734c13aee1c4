//! Provides [`Competitor`], a two-candidate variant of IREP.
use crate::{
    Result,
    Ruleset,
    RuleLearner,

    common::checker,
    logging::LogEvent,
};
use super::core::LearnerCore;
use super::config::LearnerConfig;
use super::confusion::ConfusionMatrix;
use super::pruning::PruningMetric;
use super::description_length::{
    exception_bits,
    rule_bits,
    unique_conditions,
};


/// Defines `Competitor`.
/// 
/// On each iteration, `Competitor` grows two rules:
/// one on the grow split (pruned on the prune split)
/// and one on the prune split (pruned on the grow split).
/// The rule with the higher pruning metric on its opposite split
/// is kept.
/// Learning stops like [`Ripper::irep_star`](crate::Ripper::irep_star),
/// when the description length exceeds its minimum
/// by more than `difference` bits.
/// 
/// # Example
/// ```
/// use minirules::prelude::*;
/// 
/// let x = vec![vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]];
/// let y = vec![0, 0, 0, 1, 1, 1];
/// let names = vec!["x".to_string()];
/// 
/// let mut learner = Competitor::init()
///     .seed(11);
/// let ruleset = learner.fit(&x, &y, &names, 1).unwrap();
/// assert!(!ruleset.is_empty());
/// ```
#[derive(Debug)]
pub struct Competitor {
    core: LearnerCore,
}


impl Competitor {
    /// Initialize `Competitor` with the default configuration.
    /// The default pruning metric is [`PruningMetric::RipperDefault`].
    pub fn init() -> Self {
        Self::with_config(LearnerConfig::default())
    }


    /// Construct `Competitor` from `config`.
    /// Fails if the configuration is invalid.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }


    fn with_config(config: LearnerConfig) -> Self {
        let core = LearnerCore::new(config, PruningMetric::RipperDefault);
        Self { core }
    }
}


impl Default for Competitor {
    fn default() -> Self {
        Self::init()
    }
}


impl RuleLearner for Competitor {
    fn name(&self) -> &str {
        "Competitor"
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
        let metric = core.metric();
        let prune_rules = core.config().prune_rules;
        let difference = core.config().difference;
        let conditions_count = unique_conditions(x);

        let (all_pos, all_neg) = LearnerCore::pos_neg_split(y, positive_class);
        let mut pos = all_pos.clone();
        let mut neg = all_neg.clone();

        let mut ruleset = Ruleset::new();
        let mut rule_dl = 0.0;
        let mut mdl = f64::MAX;

        while !pos.is_empty() {
            core.log(&LogEvent::Remaining { pos: pos.len(), neg: neg.len() });

            let (pos_grow, pos_prune) = core.data_split(&pos)?;
            let (neg_grow, neg_prune) = core.split_or_empty(&neg)?;

            let mut rule_grow = core.grow_rule(
                x, feature_names, &pos_grow, &neg_grow,
            )?;
            // A prune split without positives cannot grow a rule.
            let mut rule_prune = if pos_prune.is_empty() {
                None
            } else {
                let rule = core.grow_rule(
                    x, feature_names, &pos_prune, &neg_prune,
                )?;
                Some(rule)
            };

            if prune_rules {
                rule_grow = core.prune_rule(&rule_grow, x, &pos_prune, &neg_prune);
                rule_prune = rule_prune.map(|rule| {
                    core.prune_rule(&rule, x, &pos_grow, &neg_grow)
                });
            }

            let grow_val = metric.evaluate(x, &rule_grow, &pos_prune, &neg_prune);
            let mut rule = match rule_prune {
                Some(rule_prune) => {
                    let prune_val = metric.evaluate(
                        x, &rule_prune, &pos_grow, &neg_grow,
                    );
                    core.log(&LogEvent::Candidates {
                        grow: grow_val,
                        prune: prune_val,
                    });
                    if grow_val > prune_val { rule_grow } else { rule_prune }
                },
                None => rule_grow,
            };
            rule.set_prediction(positive_class, true);

            rule_dl += rule_bits(rule.len(), conditions_count);
            let mut review = ruleset.clone();
            review.add_rule(rule.clone());
            let matrix = ConfusionMatrix::from_ruleset(
                &review, 0, x, &all_pos, &all_neg,
            )?;
            let dl = rule_dl + exception_bits(&matrix);
            core.log(&LogEvent::DescriptionLength { dl, mdl });

            if dl - mdl > difference {
                core.log(&LogEvent::MdlExceeded);
                break;
            }
            if dl < mdl {
                mdl = dl;
            }

            pos = rule.not_covered_indices(x, &pos);
            neg = rule.not_covered_indices(x, &neg);
            ruleset = review;
        }

        core.log(&LogEvent::Fitted { learner: "Competitor", rules: ruleset.len() });
        Ok(ruleset)
    }
}
