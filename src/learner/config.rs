use serde::{Serialize, Deserialize};

use crate::{RuleError, Result};
use super::pruning::PruningMetric;


const DEFAULT_SPLIT_RATIO: f64 = 2.0 / 3.0;
const DEFAULT_DIFFERENCE: f64 = 64.0;
const DEFAULT_K: usize = 2;
const DEFAULT_MIN_CLASS: usize = 3;


/// The configuration of a rule learner.
/// 
/// | Field | Default | Meaning |
/// |-------|---------|---------|
/// | `split_ratio` | `2/3` | Fraction of the samples in the grow split |
/// | `seed` | `None` | Seed of the generator. `None` draws one from the OS |
/// | `categorical_max` | `0` | Features with at most this many distinct values are categorical. `0` disables it |
/// | `difference` | `64` | Allowed excess of the description length over the minimum |
/// | `prune_rules` | `true` | Whether the grown rules are pruned |
/// | `n_threads` | `1` | Reported only. The learners run on a single thread |
/// | `pruning_metric` | `None` | `None` uses the learner's default metric |
/// | `k` | `2` | Number of optimisation rounds of `Ripper` |
/// | `min_class` | `3` | Minimum bucket size of `OneR` |
/// 
/// ```
/// use minirules::{LearnerConfig, PruningMetric};
/// 
/// let config = LearnerConfig::default()
///     .split_ratio(0.5)
///     .seed(1234)
///     .pruning_metric(PruningMetric::RipperDefault);
/// assert_eq!(config.get_seed(), Some(1234));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    pub(crate) split_ratio: f64,
    pub(crate) seed: Option<u64>,
    pub(crate) categorical_max: usize,
    pub(crate) difference: f64,
    pub(crate) prune_rules: bool,
    pub(crate) n_threads: usize,
    pub(crate) pruning_metric: Option<PruningMetric>,
    pub(crate) k: usize,
    pub(crate) min_class: usize,
}


impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            split_ratio: DEFAULT_SPLIT_RATIO,
            seed: None,
            categorical_max: 0,
            difference: DEFAULT_DIFFERENCE,
            prune_rules: true,
            n_threads: 1,
            pruning_metric: None,
            k: DEFAULT_K,
            min_class: DEFAULT_MIN_CLASS,
        }
    }
}


impl LearnerConfig {
    /// Set the fraction of samples that goes to the grow split.
    pub fn split_ratio(mut self, ratio: f64) -> Self {
        self.split_ratio = ratio;
        self
    }


    /// Set the seed of the generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }


    /// Set the maximal number of distinct values of a categorical feature.
    pub fn categorical_max(mut self, max: usize) -> Self {
        self.categorical_max = max;
        self
    }


    /// Set the allowed excess of the description length.
    pub fn difference(mut self, difference: f64) -> Self {
        self.difference = difference;
        self
    }


    /// Set whether the grown rules are pruned.
    pub fn prune_rules(mut self, flag: bool) -> Self {
        self.prune_rules = flag;
        self
    }


    /// Set the number of threads.
    /// The learners are single-threaded, so the value is only reported.
    pub fn n_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads;
        self
    }


    /// Set the pruning metric.
    pub fn pruning_metric(mut self, metric: PruningMetric) -> Self {
        self.pruning_metric = Some(metric);
        self
    }


    /// Set the number of optimisation rounds of `Ripper`.
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }


    /// Set the minimum bucket size of `OneR`.
    pub fn min_class(mut self, min_class: usize) -> Self {
        self.min_class = min_class;
        self
    }


    /// Returns the split ratio.
    pub fn get_split_ratio(&self) -> f64 {
        self.split_ratio
    }


    /// Returns the seed, if set.
    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }


    /// Returns the categorical threshold.
    pub fn get_categorical_max(&self) -> usize {
        self.categorical_max
    }


    /// Returns the allowed excess of the description length.
    pub fn get_difference(&self) -> f64 {
        self.difference
    }


    /// Returns `true` if the grown rules are pruned.
    pub fn get_prune_rules(&self) -> bool {
        self.prune_rules
    }


    /// Returns the number of threads.
    pub fn get_n_threads(&self) -> usize {
        self.n_threads
    }


    /// Returns the configured pruning metric.
    pub fn get_pruning_metric(&self) -> Option<PruningMetric> {
        self.pruning_metric
    }


    /// Returns the number of optimisation rounds.
    pub fn get_k(&self) -> usize {
        self.k
    }


    /// Returns the minimum bucket size.
    pub fn get_min_class(&self) -> usize {
        self.min_class
    }


    /// Check whether the configuration is valid or not.
    pub fn validate(&self) -> Result<()> {
        if !self.split_ratio.is_finite()
            || self.split_ratio <= 0.0
            || self.split_ratio > 1.0
        {
            return Err(RuleError::InvalidSplitRatio(self.split_ratio));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LearnerConfig::default();
        assert!((config.get_split_ratio() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(config.get_categorical_max(), 0);
        assert_eq!(config.get_difference(), 64.0);
        assert!(config.get_prune_rules());
        assert_eq!(config.get_n_threads(), 1);
        assert_eq!(config.get_k(), 2);
        assert_eq!(config.get_min_class(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_split_ratio() {
        for ratio in [0.0, -1.0, 1.5, f64::NAN, f64::INFINITY] {
            let config = LearnerConfig::default().split_ratio(ratio);
            assert!(matches!(
                config.validate(),
                Err(RuleError::InvalidSplitRatio(_))
            ));
        }
    }

    #[test]
    fn accepts_full_grow_split() {
        let config = LearnerConfig::default().split_ratio(1.0);
        assert!(config.validate().is_ok());
    }
}
