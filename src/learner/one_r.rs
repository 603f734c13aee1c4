//! Provides [`OneR`] by Holte, 1993.
use std::collections::BTreeMap;

use crate::{
    Condition,
    Result,
    RuleError,
    Rule,
    Ruleset,
    RuleLearner,
    Test,

    common::{checker, utils, FeatureValue},
    logging::LogEvent,
};
use super::core::{LearnerCore, negative_class};
use super::config::LearnerConfig;
use super::confusion::measure_accuracy;
use super::pruning::PruningMetric;


/// Defines `OneR`.
/// This struct is based on the paper:
/// [Very Simple Classification Rules Perform Well on Most Commonly Used Datasets](https://doi.org/10.1023/A:1022631118932)
/// by Robert C. Holte.
/// 
/// For every feature, `OneR` builds a ruleset of `range` rules
/// over the sorted feature values
/// (or `in` rules for a categorical feature),
/// and keeps the ruleset with the best training accuracy.
/// Each rule carries its own polarity,
/// so [`OneR::predict`](RuleLearner::predict)
/// ignores the positive class it is given.
/// 
/// # Example
/// ```
/// use minirules::prelude::*;
/// 
/// let x = vec![vec![1.0, 2.0, 3.0, 6.0, 7.0, 8.0]];
/// let y = vec![0, 0, 0, 1, 1, 1];
/// let names = vec!["x".to_string()];
/// 
/// let mut learner = OneR::init();
/// let ruleset = learner.fit(&x, &y, &names, 1).unwrap();
/// assert_eq!(ruleset.len(), 2);
/// 
/// let predictions = learner.predict(&ruleset, &x, 1).unwrap();
/// assert_eq!(predictions, y);
/// ```
#[derive(Debug)]
pub struct OneR {
    core: LearnerCore,
}


impl OneR {
    /// Initialize `OneR` with the default configuration.
    pub fn init() -> Self {
        Self::with_config(LearnerConfig::default())
    }


    /// Construct `OneR` from `config`.
    /// Fails if the configuration is invalid.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }


    fn with_config(config: LearnerConfig) -> Self {
        let core = LearnerCore::new(config, PruningMetric::IrepDefault);
        Self { core }
    }


    /// Set the minimum number of samples of one class
    /// before a bucket is closed.
    /// Default is `3`.
    pub fn min_class(mut self, min_class: usize) -> Self {
        self.core.config_mut().min_class = min_class;
        self
    }


    /// Splits the sorted values of the `index`-th feature into buckets
    /// and returns one `range` rule per bucket.
    /// 
    /// A bucket is closed when the next distinct value starts
    /// and it holds at least `min_class` samples of one class.
    /// A rule predicts `positive_class` if the positive samples are
    /// at least as many as the others, and "not `positive_class`" otherwise.
    pub fn discretise(
        &self,
        index: usize,
        x: &[Vec<f64>],
        y: &[usize],
        feature_names: &[String],
        positive_class: usize,
    ) -> Result<Ruleset>
    {
        let column = x.get(index)
            .ok_or(RuleError::IndexOutOfRange { index, len: x.len() })?;
        if column.len() != y.len() {
            return Err(RuleError::SampleCountMismatch {
                features: column.len(),
                labels: y.len(),
            });
        }
        let feature = feature_names.get(index)
            .ok_or(RuleError::IndexOutOfRange {
                index,
                len: feature_names.len(),
            })?;
        let min_class = self.core.config().min_class;

        let order = utils::sort_by_indices(column);
        let Some(&first) = order.first() else {
            return Ok(Ruleset::new());
        };

        let mut ruleset = Ruleset::new();
        // `a` counts the positive samples, `b` the others.
        let (mut a, mut b) = (0_usize, 0_usize);
        let mut curr_val = column[first];
        let mut last_val = curr_val;

        for &i in &order {
            let value = column[i];
            if FeatureValue(value) != FeatureValue(curr_val) {
                if a >= min_class || b >= min_class {
                    let rule = bucket_rule(
                        feature, index, last_val, curr_val,
                        positive_class, a >= b,
                    )?;
                    ruleset.add_rule(rule);
                    last_val = value;
                    a = 0;
                    b = 0;
                }
                curr_val = value;
            }

            if y[i] == positive_class {
                a += 1;
            } else {
                b += 1;
            }
        }

        if a > 0 || b > 0 {
            let rule = bucket_rule(
                feature, index, last_val, curr_val, positive_class, a >= b,
            )?;
            ruleset.add_rule(rule);
        }

        self.simplify_ruleset(&ruleset, index)
    }


    /// Merges the adjacent `range` rules on `column`
    /// that predict the same class.
    pub fn simplify_ruleset(&self, ruleset: &Ruleset, column: usize)
        -> Result<Ruleset>
    {
        let mut merged: Vec<Rule> = Vec::with_capacity(ruleset.len());

        for rule in ruleset {
            if let Some(last) = merged.last_mut() {
                if last.predicts_the_same(rule)? {
                    let (lower, _) = range_of(last, column)?;
                    let (_, upper) = range_of(rule, column)?;
                    let feature = rule.get(column)
                        .map(|cond| cond.feature().to_string())
                        .unwrap_or_default();
                    let prediction = last.prediction()
                        .ok_or(RuleError::UndefinedPrediction)?;

                    let mut joined = Rule::with_prediction(
                        prediction.class, prediction.predict,
                    );
                    joined.add_cond(
                        Condition::range(feature, column, lower, upper)?
                    )?;
                    *last = joined;
                    continue;
                }
            }
            merged.push(rule.clone());
        }

        Ok(Ruleset::from(merged))
    }


    /// Returns one `in` rule for the values where the positive samples
    /// are at least as many as the others,
    /// and one `in` rule for the remaining values.
    pub fn categorical_rules(
        &self,
        index: usize,
        x: &[Vec<f64>],
        y: &[usize],
        feature_names: &[String],
        positive_class: usize,
    ) -> Result<Ruleset>
    {
        let column = x.get(index)
            .ok_or(RuleError::IndexOutOfRange { index, len: x.len() })?;
        let feature = feature_names.get(index)
            .ok_or(RuleError::IndexOutOfRange {
                index,
                len: feature_names.len(),
            })?;

        let mut counts: BTreeMap<FeatureValue, (usize, usize)> = BTreeMap::new();
        for (&value, &label) in column.iter().zip(y) {
            let entry = counts.entry(FeatureValue(value)).or_default();
            if label == positive_class {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }

        let (positive, negative): (Vec<_>, Vec<_>) = counts.into_iter()
            .partition(|(_, (a, b))| a >= b);

        let mut ruleset = Ruleset::new();
        for (values, predict) in [(positive, true), (negative, false)] {
            if values.is_empty() {
                continue;
            }
            let values = values.into_iter().map(|(value, _)| value.get());
            let mut rule = Rule::with_prediction(positive_class, predict);
            rule.add_cond(Condition::one_of(feature.as_str(), index, values)?)?;
            ruleset.add_rule(rule);
        }
        Ok(ruleset)
    }
}


impl Default for OneR {
    fn default() -> Self {
        Self::init()
    }
}


fn bucket_rule(
    feature: &str,
    index: usize,
    lower: f64,
    upper: f64,
    positive_class: usize,
    predict: bool,
) -> Result<Rule>
{
    let mut rule = Rule::with_prediction(positive_class, predict);
    rule.add_cond(Condition::range(feature, index, lower, upper)?)?;
    Ok(rule)
}


fn range_of(rule: &Rule, column: usize) -> Result<(f64, f64)> {
    match rule.get(column).map(Condition::test) {
        Some(Test::Range(lower, upper)) => Ok((*lower, *upper)),
        _ => Err(RuleError::CorruptRule(
            format!("expected a range condition on column {column}")
        )),
    }
}


impl RuleLearner for OneR {
    fn name(&self) -> &str {
        "OneR"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let config = self.core.config();
        let info = vec![
            ("Categorical max", config.categorical_max.to_string()),
            ("Min class", config.min_class.to_string()),
        ];
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
        checker::check_fit_input(x, y, feature_names)?;
        let categorical_max = self.core.config().categorical_max;

        let mut best: Option<(f64, Ruleset)> = None;
        for (index, feature) in feature_names.iter().enumerate() {
            let categorical = categorical_max > 0
                && utils::n_unique(&x[index]) <= categorical_max;
            let ruleset = if categorical {
                self.categorical_rules(index, x, y, feature_names, positive_class)?
            } else {
                self.discretise(index, x, y, feature_names, positive_class)?
            };

            let predictions = self.predict(&ruleset, x, positive_class)?;
            let accuracy = measure_accuracy(y, &predictions)?;
            let best_acc = best.as_ref().map_or(f64::NEG_INFINITY, |(acc, _)| *acc);
            self.core.log(&LogEvent::FeatureScore {
                feature: feature.as_str(),
                accuracy,
                best: best_acc,
                rules: ruleset.len(),
            });

            if accuracy > best_acc {
                best = Some((accuracy, ruleset));
            }
        }

        let ruleset = best.map(|(_, ruleset)| ruleset)
            .unwrap_or_default();
        self.core.log(&LogEvent::Fitted { learner: "OneR", rules: ruleset.len() });
        Ok(ruleset)
    }


    /// Each covered sample gets the label of the first rule covering it.
    /// An uncovered sample gets the complement of the class of the rules.
    /// Fails on an empty ruleset.
    fn predict(
        &self,
        ruleset: &Ruleset,
        x: &[Vec<f64>],
        _positive_class: usize,
    ) -> Result<Vec<usize>>
    {
        let n_sample = checker::check_predict_input(ruleset, x)?;
        let first = ruleset.get(0).ok_or(RuleError::EmptyRuleset)?;
        let class = first.prediction()
            .ok_or(RuleError::UndefinedPrediction)?
            .class;

        let mut predictions = vec![negative_class(class); n_sample];
        let mut remaining = (0..n_sample).collect::<Vec<_>>();
        for rule in ruleset {
            if remaining.is_empty() {
                break;
            }
            let label = rule.predicted_class()?;
            let covered = rule.covered_indices(x, &remaining);
            for &i in &covered {
                predictions[i] = label;
            }
            remaining = utils::difference(&remaining, &covered);
        }
        Ok(predictions)
    }
}
