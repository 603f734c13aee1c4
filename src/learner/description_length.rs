//! The minimum-description-length accounting of rulesets.
//! 
//! The description length of a ruleset is the number of bits
//! needed to encode its rules plus the number of bits
//! needed to encode the samples it misclassifies.
use std::f64::consts::PI;

use crate::{Result, Ruleset};
use crate::common::utils;
use super::confusion::ConfusionMatrix;
use super::core::LearnerCore;


/// Returns `log2(n!)`.
pub fn log_factorial(n: usize) -> f64 {
    (2..=n).map(|i| (i as f64).log2()).sum()
}


/// Returns `log2(C(n, k))`.
/// Returns `0` if `k > n` and `1` if `k == 0` or `k == n`.
pub fn log_binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 || k == n {
        return 1.0;
    }
    log_factorial(n) - log_factorial(k) - log_factorial(n - k)
}


/// Returns the Stirling approximation of `log2(C(n, k))`.
/// Returns `0` if `k > n` and `1` if `k == 0` or `k == n`.
pub fn stirling_log_binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 || k == n {
        return 1.0;
    }
    let (n, k) = (n as f64, k as f64);
    (n + 0.5) * n.log2()
        - (k + 0.5) * k.log2()
        - (n - k + 0.5) * (n - k).log2()
        - 0.5 * (2.0 * PI).log2()
}


/// Returns the bits of a rule with `k` conditions
/// out of `n` possible conditions.
/// 
/// `0.5 * (k log2(n/k) + (n-k) log2(n/(n-k)) + log2(k))`
/// 
/// The terms vanish in the limit, so `k == 0` (or `n == 0`) gives `0`
/// and `k >= n` gives `0.5 * log2(k)`.
pub fn rule_bits(k: usize, n: usize) -> f64 {
    if k == 0 || n == 0 {
        return 0.0;
    }
    let kf = k as f64;
    if k >= n {
        return 0.5 * kf.log2();
    }
    let nf = n as f64;
    0.5 * (
        kf * (nf / kf).log2()
        + (nf - kf) * (nf / (nf - kf)).log2()
        + kf.log2()
    )
}


/// Returns the bits of the misclassified samples.
/// `Slog_C(tp + fp, fp) + Slog_C(tn + fn, fn)`.
pub fn exception_bits(matrix: &ConfusionMatrix) -> f64 {
    let ConfusionMatrix {
        true_negative: tn,
        false_positive: fp,
        false_negative: fn_,
        true_positive: tp,
    } = *matrix;
    stirling_log_binomial(tp + fp, fp) + stirling_log_binomial(tn + fn_, fn_)
}


/// Returns the number of possible conditions,
/// the sum over the features of their distinct values.
pub fn unique_conditions(x: &[Vec<f64>]) -> usize {
    x.iter()
        .map(|column| utils::n_unique(column))
        .sum()
}


/// The running description length of a ruleset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DescriptionState {
    /// The coverage of the ruleset.
    pub(crate) matrix: ConfusionMatrix,
    /// The sum of the rule bits.
    pub(crate) rule_bits: f64,
}


impl DescriptionState {
    /// Returns the total description length.
    pub(crate) fn total(&self) -> f64 {
        self.rule_bits + exception_bits(&self.matrix)
    }


    /// Returns the state after the `index`-th rule of `old_ruleset`
    /// was replaced, giving `new_ruleset`.
    /// 
    /// `pos` and `neg` are the samples that reach the `index`-th rule.
    /// Only the samples whose coverage by that rule changes
    /// are evaluated again.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn replaced(
        &self,
        x: &[Vec<f64>],
        new_ruleset: &Ruleset,
        old_ruleset: &Ruleset,
        index: usize,
        pos: &[usize],
        neg: &[usize],
        conditions_count: usize,
    ) -> Self
    {
        let new_rule = &new_ruleset[index];
        let old_rule = &old_ruleset[index];

        let pos_old = old_rule.covered_indices(x, pos);
        let neg_old = old_rule.covered_indices(x, neg);
        let pos_new = new_rule.covered_indices(x, pos);
        let neg_new = new_rule.covered_indices(x, neg);

        let mut matrix = self.matrix;

        // positives the new ruleset loses.
        let lost = LearnerCore::ruleset_coverage_diff(
            x, new_ruleset, &pos_old, &pos_new,
        );
        debug_assert!(matrix.true_positive >= lost, "tp underflow");
        matrix.true_positive -= lost;
        matrix.false_negative += lost;

        // positives the new ruleset gains.
        let gained = LearnerCore::ruleset_coverage_diff(
            x, old_ruleset, &pos_new, &pos_old,
        );
        debug_assert!(matrix.false_negative >= gained, "fn underflow");
        matrix.true_positive += gained;
        matrix.false_negative -= gained;

        let lost = LearnerCore::ruleset_coverage_diff(
            x, new_ruleset, &neg_old, &neg_new,
        );
        debug_assert!(matrix.false_positive >= lost, "fp underflow");
        matrix.false_positive -= lost;
        matrix.true_negative += lost;

        let gained = LearnerCore::ruleset_coverage_diff(
            x, old_ruleset, &neg_new, &neg_old,
        );
        debug_assert!(matrix.true_negative >= gained, "tn underflow");
        matrix.false_positive += gained;
        matrix.true_negative -= gained;

        let rule_bits = self.rule_bits
            - rule_bits(old_rule.len(), conditions_count)
            + rule_bits(new_rule.len(), conditions_count);

        Self { matrix, rule_bits }
    }
}


impl LearnerCore {
    /// Returns the number of samples in `covered_a \ covered_b`
    /// that no rule of `ruleset` covers.
    /// Both sets must be sorted in ascending order.
    pub fn ruleset_coverage_diff(
        x: &[Vec<f64>],
        ruleset: &Ruleset,
        covered_a: &[usize],
        covered_b: &[usize],
    ) -> usize
    {
        let diff = utils::difference(covered_a, covered_b);
        if diff.is_empty() {
            return 0;
        }
        ruleset.not_covered_indices(x, &diff).len()
    }


    /// Returns the total description length of `ruleset`:
    /// the bits of its rules plus the bits of its misclassified samples.
    pub fn total_description_length(
        x: &[Vec<f64>],
        ruleset: &Ruleset,
        y: &[usize],
        positive_class: usize,
        conditions_count: usize,
    ) -> Result<f64>
    {
        let rule_dl = ruleset.iter()
            .map(|rule| rule_bits(rule.len(), conditions_count))
            .sum::<f64>();

        let predictions = Self::predict(ruleset, x, positive_class)?;
        let matrix = ConfusionMatrix::from_labels(y, &predictions, positive_class)?;
        Ok(rule_dl + exception_bits(&matrix))
    }
}
