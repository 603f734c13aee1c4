//! Defines the `RuleLearner` trait and the engine shared by the learners.
use rand::prelude::*;
use rand::rngs::StdRng;

use std::fmt;

use crate::{Result, RuleError, Ruleset, Sample};
use crate::common::{checker, utils};
use crate::logging::{Logger, LogEvent, SilentLogger};
use super::config::LearnerConfig;
use super::pruning::PruningMetric;


/// The interface of every rule learner.
/// 
/// A learner induces a [`Ruleset`] for a single positive class.
/// The setters consume `self` so that they can be chained
/// right after the constructor:
/// 
/// ```
/// use minirules::prelude::*;
/// 
/// let mut learner = Irep::init()
///     .seed(7)
///     .split_ratio(0.75)
///     .prune_rules(false);
/// 
/// let x = vec![vec![0.0, 1.0, 2.0, 3.0]];
/// let names = vec!["x".to_string()];
/// let ruleset = learner.fit(&x, &[0, 0, 1, 1], &names, 1).unwrap();
/// 
/// let predictions = learner.predict(&ruleset, &x, 1).unwrap();
/// assert_eq!(predictions, vec![0, 0, 1, 1]);
/// ```
pub trait RuleLearner {
    /// Returns the name of the learner.
    fn name(&self) -> &str;


    /// Returns the configuration as `(key, value)` pairs.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        Some(self.core().info())
    }


    /// Returns the shared engine.
    fn core(&self) -> &LearnerCore;


    /// Returns the shared engine mutably.
    fn core_mut(&mut self) -> &mut LearnerCore;


    /// Learns a ruleset that predicts `positive_class`.
    /// 
    /// `x` is column-major: `x[feature][sample]`.
    /// Fails if `x` or `y` is empty, if the number of samples differs,
    /// or if `feature_names` does not name every column.
    fn fit(
        &mut self,
        x: &[Vec<f64>],
        y: &[usize],
        feature_names: &[String],
        positive_class: usize,
    ) -> Result<Ruleset>;


    /// Predicts the labels of the samples in `x`.
    /// Samples covered by a rule get `positive_class`,
    /// the others get the negative class.
    fn predict(
        &self,
        ruleset: &Ruleset,
        x: &[Vec<f64>],
        positive_class: usize,
    ) -> Result<Vec<usize>>
    {
        LearnerCore::predict(ruleset, x, positive_class)
    }


    /// Learns a ruleset from a [`Sample`].
    fn fit_sample(&mut self, sample: &Sample, positive_class: usize)
        -> Result<Ruleset>
    {
        self.fit(
            sample.data(),
            sample.target(),
            sample.feature_names(),
            positive_class,
        )
    }


    /// Set the fraction of samples that goes to the grow split.
    /// The ratio is checked when fitting.
    fn split_ratio(mut self, ratio: f64) -> Self
        where Self: Sized,
    {
        self.core_mut().config.split_ratio = ratio;
        self
    }


    /// Set the seed of the generator and reseed it.
    fn seed(mut self, seed: u64) -> Self
        where Self: Sized,
    {
        self.core_mut().reseed(seed);
        self
    }


    /// Set the maximal number of distinct values of a categorical feature.
    /// `0` disables categorical features.
    fn categorical_max(mut self, max: usize) -> Self
        where Self: Sized,
    {
        self.core_mut().config.categorical_max = max;
        self
    }


    /// Set the allowed excess of the description length over its minimum.
    fn difference(mut self, difference: f64) -> Self
        where Self: Sized,
    {
        self.core_mut().config.difference = difference;
        self
    }


    /// Set whether the grown rules are pruned.
    fn prune_rules(mut self, flag: bool) -> Self
        where Self: Sized,
    {
        self.core_mut().config.prune_rules = flag;
        self
    }


    /// Set the number of threads. The value is only reported.
    fn n_threads(mut self, n_threads: usize) -> Self
        where Self: Sized,
    {
        self.core_mut().config.n_threads = n_threads;
        self
    }


    /// Set the pruning metric.
    fn pruning_metric(mut self, metric: PruningMetric) -> Self
        where Self: Sized,
    {
        let core = self.core_mut();
        core.config.pruning_metric = Some(metric);
        core.metric = metric;
        self
    }


    /// Set the logger that receives the progress of the learner.
    fn logger<L>(mut self, logger: L) -> Self
        where Self: Sized,
              L: Logger + 'static,
    {
        self.core_mut().logger = Box::new(logger);
        self
    }
}


/// The engine shared by every learner.
/// It owns the configuration, the generator, and the logger,
/// and provides the steps of separate-and-conquer learning.
pub struct LearnerCore {
    config: LearnerConfig,
    metric: PruningMetric,
    random_state: u64,
    rng: StdRng,
    logger: Box<dyn Logger>,
}


impl LearnerCore {
    /// Construct a new engine.
    /// `default_metric` is used unless `config` sets a pruning metric.
    /// If `config` has no seed, a seed is drawn from the OS
    /// and reported by [`LearnerCore::random_state`].
    pub fn new(config: LearnerConfig, default_metric: PruningMetric) -> Self {
        let random_state = config.seed.unwrap_or_else(rand::random);
        let metric = config.pruning_metric.unwrap_or(default_metric);
        Self {
            config,
            metric,
            random_state,
            rng: StdRng::seed_from_u64(random_state),
            logger: Box::new(SilentLogger),
        }
    }


    /// Returns the configuration.
    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }


    /// Returns the configuration mutably.
    /// The seed and the pruning metric have their own setters.
    pub(crate) fn config_mut(&mut self) -> &mut LearnerConfig {
        &mut self.config
    }


    /// Returns the pruning metric in use.
    pub fn metric(&self) -> PruningMetric {
        self.metric
    }


    /// Returns the seed of the generator.
    pub fn random_state(&self) -> u64 {
        self.random_state
    }


    /// Reseeds the generator.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.random_state = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }


    /// Sends `event` to the logger.
    #[inline(always)]
    pub fn log(&self, event: &LogEvent<'_>) {
        self.logger.log(event);
    }


    /// Returns the configuration as `(key, value)` pairs.
    pub fn info(&self) -> Vec<(&str, String)> {
        vec![
            ("Split ratio", format!("{:.3}", self.config.split_ratio)),
            ("Random state", self.random_state.to_string()),
            ("Categorical max", self.config.categorical_max.to_string()),
            ("MDL difference", self.config.difference.to_string()),
            ("Prune rules", self.config.prune_rules.to_string()),
            ("Threads", self.config.n_threads.to_string()),
            ("Pruning metric", self.metric.to_string()),
        ]
    }


    /// Splits the sample indices by their label.
    /// Returns `(pos, neg)`, both in ascending order.
    pub fn pos_neg_split(y: &[usize], positive_class: usize)
        -> (Vec<usize>, Vec<usize>)
    {
        (0..y.len()).partition(|&i| y[i] == positive_class)
    }


    /// Shuffles `indices` and splits them into a grow and a prune split.
    /// The grow split gets `ceil(split_ratio * n)` indices.
    /// Both splits are sorted in ascending order.
    pub fn data_split(&mut self, indices: &[usize])
        -> Result<(Vec<usize>, Vec<usize>)>
    {
        if indices.is_empty() {
            return Err(RuleError::EmptySplit);
        }

        let n = indices.len();
        let ratio = self.config.split_ratio;
        let split = (ratio * n as f64).ceil();
        if !(split >= 1.0 && split <= n as f64) {
            return Err(RuleError::InvalidSplit {
                ratio,
                split: split.max(0.0) as usize,
                len: n,
            });
        }
        let split = split as usize;

        let mut shuffled = indices.to_vec();
        shuffled.shuffle(&mut self.rng);

        let mut prune = shuffled.split_off(split);
        let mut grow = shuffled;
        grow.sort_unstable();
        prune.sort_unstable();
        Ok((grow, prune))
    }


    /// Same as [`LearnerCore::data_split`],
    /// but an empty index set gives two empty splits.
    pub(crate) fn split_or_empty(&mut self, indices: &[usize])
        -> Result<(Vec<usize>, Vec<usize>)>
    {
        if indices.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }
        self.data_split(indices)
    }


    /// Predicts the labels of the samples in `x`.
    /// The rules are applied in order.
    /// A covered sample gets `positive_class`,
    /// a sample that no rule covers gets the negative class.
    pub fn predict(
        ruleset: &Ruleset,
        x: &[Vec<f64>],
        positive_class: usize,
    ) -> Result<Vec<usize>>
    {
        let n_sample = checker::check_predict_input(ruleset, x)?;
        let mut predictions = vec![negative_class(positive_class); n_sample];
        let mut remaining = (0..n_sample).collect::<Vec<_>>();

        for rule in ruleset {
            if remaining.is_empty() {
                break;
            }
            let covered = rule.covered_indices(x, &remaining);
            for &i in &covered {
                predictions[i] = positive_class;
            }
            remaining = utils::difference(&remaining, &covered);
        }
        Ok(predictions)
    }
}


/// Returns the label of the samples that are not `positive_class`.
#[inline(always)]
pub(crate) fn negative_class(positive_class: usize) -> usize {
    (positive_class == 0) as usize
}


impl fmt::Debug for LearnerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LearnerCore")
            .field("config", &self.config)
            .field("metric", &self.metric)
            .field("random_state", &self.random_state)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn core(seed: u64) -> LearnerCore {
        let config = LearnerConfig::default().seed(seed);
        LearnerCore::new(config, PruningMetric::IrepDefault)
    }

    #[test]
    fn split_by_label() {
        let (pos, neg) = LearnerCore::pos_neg_split(&[0, 1, 0, 1, 1], 1);
        assert_eq!(pos, vec![1, 3, 4]);
        assert_eq!(neg, vec![0, 2]);
    }

    #[test]
    fn data_split_is_sorted_partition() {
        let mut core = core(42);
        let indices = (10..40).collect::<Vec<_>>();
        let (grow, prune) = core.data_split(&indices).unwrap();

        assert_eq!(grow.len(), 20);
        assert_eq!(prune.len(), 10);
        assert!(utils::is_sorted_set(&grow));
        assert!(utils::is_sorted_set(&prune));

        let mut all = grow.iter().chain(&prune).copied().collect::<Vec<_>>();
        all.sort_unstable();
        assert_eq!(all, indices);
    }

    #[test]
    fn data_split_is_reproducible() {
        let indices = (0..50).collect::<Vec<_>>();
        let a = core(3).data_split(&indices).unwrap();
        let b = core(3).data_split(&indices).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn data_split_errors() {
        let mut core = core(0);
        assert!(matches!(core.data_split(&[]), Err(RuleError::EmptySplit)));

        core.config.split_ratio = 1.5;
        assert!(matches!(
            core.data_split(&[0, 1]),
            Err(RuleError::InvalidSplit { split: 3, len: 2, .. })
        ));
    }

    #[test]
    fn uncovered_samples_are_negative() {
        let x = vec![vec![0.0, 1.0]];
        let predictions = LearnerCore::predict(&Ruleset::new(), &x, 0)
            .unwrap();
        assert_eq!(predictions, vec![1, 1]);
    }
}
