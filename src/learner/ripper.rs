//! Provides [`Ripper`] by Cohen, 1995.
use crate::{
    Result,
    Rule,
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
    DescriptionState,
    exception_bits,
    rule_bits,
    unique_conditions,
};


/// Defines `Ripper`,
/// Repeated Incremental Pruning to Produce Error Reduction.
/// This struct is based on the paper:
/// [Fast Effective Rule Induction](https://doi.org/10.1016/B978-1-55860-377-6.50023-2)
/// by William W. Cohen.
/// 
/// `Ripper` runs three phases.
/// 
/// 1. [`Ripper::irep_star`] learns rules like [`Irep`](crate::Irep),
///    but stops when the description length of the ruleset
///    exceeds its minimum by more than `difference` bits.
/// 2. `k` times,
///    [`Ripper::optimise_ruleset`] competes every rule against
///    a freshly grown replacement and a revision of itself,
///    `irep_star` covers the positives left over,
///    and [`Ripper::generalise_ruleset`] removes the rules
///    whose removal shortens the description length.
/// 
/// # Example
/// ```
/// use minirules::prelude::*;
/// 
/// let x = vec![
///     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
/// ];
/// let y = vec![0, 0, 0, 0, 1, 1, 1, 1];
/// let names = vec!["x".to_string()];
/// 
/// let mut learner = Ripper::init()
///     .k(2)
///     .seed(0);
/// let ruleset = learner.fit(&x, &y, &names, 1).unwrap();
/// let predictions = learner.predict(&ruleset, &x, 1).unwrap();
/// 
/// println!("{ruleset}");
/// println!("{:?}", measure_accuracy(&y, &predictions));
/// ```
#[derive(Debug)]
pub struct Ripper {
    core: LearnerCore,
}


impl Ripper {
    /// Initialize `Ripper` with the default configuration.
    /// The default pruning metric is [`PruningMetric::RipperDefault`].
    pub fn init() -> Self {
        Self::with_config(LearnerConfig::default())
    }


    /// Construct `Ripper` from `config`.
    /// Fails if the configuration is invalid.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }


    fn with_config(config: LearnerConfig) -> Self {
        let core = LearnerCore::new(config, PruningMetric::RipperDefault);
        Self { core }
    }


    /// Set the number of optimisation rounds.
    /// Default is `2`.
    pub fn k(mut self, k: usize) -> Self {
        self.core.config_mut().k = k;
        self
    }


    /// Learns rules for the positives `pos` and appends them to `ruleset`.
    /// 
    /// `pos` and `neg` must be the samples `ruleset` does not cover.
    /// After each rule, the description length of the whole ruleset
    /// on `y` is updated incrementally.
    /// Learning stops when it exceeds the minimum so far
    /// by more than `difference` bits.
    #[allow(clippy::too_many_arguments)]
    pub fn irep_star(
        &mut self,
        x: &[Vec<f64>],
        y: &[usize],
        pos: &[usize],
        neg: &[usize],
        feature_names: &[String],
        positive_class: usize,
        mut ruleset: Ruleset,
    ) -> Result<Ruleset>
    {
        if pos.is_empty() {
            return Ok(ruleset);
        }

        let core = &mut self.core;
        let difference = core.config().difference;
        let conditions_count = unique_conditions(x);

        let (all_pos, all_neg) = LearnerCore::pos_neg_split(y, positive_class);
        let mut matrix = ConfusionMatrix::from_ruleset(
            &ruleset, 0, x, &all_pos, &all_neg,
        )?;
        let mut rule_dl = ruleset.iter()
            .map(|rule| rule_bits(rule.len(), conditions_count))
            .sum::<f64>();
        let mut mdl = f64::MAX;

        let mut pos = pos.to_vec();
        let mut neg = neg.to_vec();

        while !pos.is_empty() {
            core.log(&LogEvent::Remaining { pos: pos.len(), neg: neg.len() });

            let (pos_grow, pos_prune) = core.data_split(&pos)?;
            let (neg_grow, neg_prune) = core.split_or_empty(&neg)?;

            let mut rule = core.grow_rule(x, feature_names, &pos_grow, &neg_grow)?;
            if core.config().prune_rules {
                rule = core.prune_rule(&rule, x, &pos_prune, &neg_prune);
            }

            rule_dl += rule_bits(rule.len(), conditions_count);

            let pos_left = rule.not_covered_indices(x, &pos);
            let neg_left = rule.not_covered_indices(x, &neg);
            let tp_diff = pos.len() - pos_left.len();
            let fp_diff = neg.len() - neg_left.len();
            // `pos` and `neg` are uncovered, so they are counted as fn and tn.
            debug_assert!(matrix.false_negative >= tp_diff, "fn underflow");
            debug_assert!(matrix.true_negative >= fp_diff, "tn underflow");
            matrix.true_positive += tp_diff;
            matrix.false_negative -= tp_diff;
            matrix.false_positive += fp_diff;
            matrix.true_negative -= fp_diff;

            let dl = rule_dl + exception_bits(&matrix);
            core.log(&LogEvent::DescriptionLength { dl, mdl });

            if dl - mdl > difference {
                core.log(&LogEvent::MdlExceeded);
                break;
            }
            if dl < mdl {
                mdl = dl;
            }

            pos = pos_left;
            neg = neg_left;

            rule.set_prediction(positive_class, true);
            ruleset.add_rule(rule);
        }

        Ok(ruleset)
    }


    /// Competes every rule of `ruleset` against two candidates:
    /// a replacement grown from scratch
    /// and a revision grown from the rule itself.
    /// Both are pruned by [`Ripper::optimise_prune`],
    /// and the candidate with the smallest description length
    /// replaces the rule if it beats the current ruleset.
    /// 
    /// `pos` and `neg` are all positive and negative samples.
    pub fn optimise_ruleset(
        &mut self,
        ruleset: &Ruleset,
        x: &[Vec<f64>],
        feature_names: &[String],
        pos: &[usize],
        neg: &[usize],
        positive_class: usize,
    ) -> Result<Ruleset>
    {
        let conditions_count = unique_conditions(x);
        let mut ruleset = ruleset.clone();
        let mut state = DescriptionState {
            matrix: ConfusionMatrix::from_ruleset(&ruleset, 0, x, pos, neg)?,
            rule_bits: ruleset.iter()
                .map(|rule| rule_bits(rule.len(), conditions_count))
                .sum(),
        };

        // The samples that reach the `i`-th rule.
        let mut pos_left = pos.to_vec();
        let mut neg_left = neg.to_vec();

        for i in 0..ruleset.len() {
            let original = state.total();

            let (pos_grow, pos_prune) = self.core.split_or_empty(&pos_left)?;
            let (neg_grow, neg_prune) = self.core.split_or_empty(&neg_left)?;

            let mut replacement = self.core
                .grow_rule(x, feature_names, &pos_grow, &neg_grow)?;
            replacement.set_prediction(positive_class, true);
            let replacement_ruleset = self.pruned_candidate(
                &ruleset, i, replacement, x, &pos_prune, &neg_prune,
            )?;
            let replacement_state = state.replaced(
                x, &replacement_ruleset, &ruleset, i,
                &pos_left, &neg_left, conditions_count,
            );

            let revision = self.core.grow_rule_from(
                ruleset[i].clone(), x, feature_names, &pos_grow, &neg_grow,
            )?;
            let revision_ruleset = self.pruned_candidate(
                &ruleset, i, revision, x, &pos_prune, &neg_prune,
            )?;
            let revision_state = state.replaced(
                x, &revision_ruleset, &ruleset, i,
                &pos_left, &neg_left, conditions_count,
            );

            let replacement_dl = replacement_state.total();
            let revision_dl = revision_state.total();
            self.core.log(&LogEvent::TdlScores {
                replacement: replacement_dl,
                revision: revision_dl,
                original,
            });

            let (best_ruleset, best_state, best_dl) = if revision_dl < replacement_dl {
                (revision_ruleset, revision_state, revision_dl)
            } else {
                (replacement_ruleset, replacement_state, replacement_dl)
            };
            if best_dl < original {
                self.core.log(&LogEvent::RuleChanged { index: i });
                ruleset = best_ruleset;
                state = best_state;
            }

            pos_left = ruleset[i].not_covered_indices(x, &pos_left);
            neg_left = ruleset[i].not_covered_indices(x, &neg_left);
        }

        Ok(ruleset)
    }


    // Puts `rule` at `index` and prunes it within the ruleset.
    fn pruned_candidate(
        &self,
        ruleset: &Ruleset,
        index: usize,
        rule: Rule,
        x: &[Vec<f64>],
        pos_prune: &[usize],
        neg_prune: &[usize],
    ) -> Result<Ruleset>
    {
        let mut candidate = ruleset.clone();
        candidate.replace(index, rule)?;
        if self.core.config().prune_rules {
            let pruned = self.optimise_prune(
                &candidate, index, x, pos_prune, neg_prune,
            )?;
            candidate.replace(index, pruned)?;
        }
        Ok(candidate)
    }


    /// Prunes the `index`-th rule of `ruleset` in reverse learned order.
    /// A removal is scored by the accuracy of the rules
    /// `ruleset[index..]` on the prune split,
    /// and kept only if it strictly improves and
    /// the rule keeps at least one condition.
    pub fn optimise_prune(
        &self,
        ruleset: &Ruleset,
        index: usize,
        x: &[Vec<f64>],
        pos_prune: &[usize],
        neg_prune: &[usize],
    ) -> Result<Rule>
    {
        let accuracy = |ruleset: &Ruleset| -> Result<f64> {
            let matrix = ConfusionMatrix::from_ruleset(
                ruleset, index, x, pos_prune, neg_prune,
            )?;
            Ok(matrix.accuracy())
        };

        let mut best_val = accuracy(ruleset)?;
        let mut best = ruleset.get(index)
            .cloned()
            .unwrap_or_default();
        let mut candidates = ruleset.clone();

        while best.len() > 1 {
            let mut rule = best.clone();
            rule.pop_back();
            candidates.replace(index, rule.clone())?;

            let new_val = accuracy(&candidates)?;
            self.core.log(&LogEvent::PruneStep { old: best_val, new: new_val });

            if new_val > best_val {
                best_val = new_val;
                best = rule;
            } else {
                break;
            }
        }
        Ok(best)
    }


    /// Removes every rule, from the last to the first,
    /// whose removal lowers the total description length on `y`.
    pub fn generalise_ruleset(
        &self,
        ruleset: &Ruleset,
        x: &[Vec<f64>],
        y: &[usize],
        positive_class: usize,
    ) -> Result<Ruleset>
    {
        let conditions_count = unique_conditions(x);
        let mut best = ruleset.clone();
        let mut best_dl = LearnerCore::total_description_length(
            x, &best, y, positive_class, conditions_count,
        )?;

        for i in (0..ruleset.len()).rev() {
            let mut candidate = best.clone();
            candidate.pop(i)?;
            let dl = LearnerCore::total_description_length(
                x, &candidate, y, positive_class, conditions_count,
            )?;
            if dl < best_dl {
                self.core.log(&LogEvent::Generalised { index: i });
                best = candidate;
                best_dl = dl;
            }
        }
        Ok(best)
    }
}


impl Default for Ripper {
    fn default() -> Self {
        Self::init()
    }
}


impl RuleLearner for Ripper {
    fn name(&self) -> &str {
        "RIPPER"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let mut info = self.core.info();
        info.push(("Optimisation rounds", self.core.config().k.to_string()));
        Some(info)
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

        let (pos, neg) = LearnerCore::pos_neg_split(y, positive_class);
        let mut ruleset = self.irep_star(
            x, y, &pos, &neg, feature_names, positive_class, Ruleset::new(),
        )?;

        for round in 1..=self.core.config().k {
            self.core.log(&LogEvent::Optimisation { round });

            ruleset = self.optimise_ruleset(
                &ruleset, x, feature_names, &pos, &neg, positive_class,
            )?;

            let pos_left = ruleset.not_covered_indices(x, &pos);
            let neg_left = ruleset.not_covered_indices(x, &neg);
            ruleset = self.irep_star(
                x, y, &pos_left, &neg_left, feature_names, positive_class, ruleset,
            )?;

            ruleset = self.generalise_ruleset(&ruleset, x, y, positive_class)?;
        }

        self.core.log(&LogEvent::Fitted { learner: "RIPPER", rules: ruleset.len() });
        Ok(ruleset)
    }
}
