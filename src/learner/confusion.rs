//! The confusion matrix of a binary prediction and the accuracy.
use serde::{Serialize, Deserialize};

use crate::{RuleError, Result, Ruleset};
use crate::common::checker;
use crate::rule::ruleset::not_covered_by;


/// The counts of a binary prediction relative to a positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Negative samples predicted as negative.
    pub true_negative: usize,
    /// Negative samples predicted as positive.
    pub false_positive: usize,
    /// Positive samples predicted as negative.
    pub false_negative: usize,
    /// Positive samples predicted as positive.
    pub true_positive: usize,
}


impl ConfusionMatrix {
    /// Construct a new matrix from `(tn, fp, fn, tp)`.
    pub fn new(
        true_negative: usize,
        false_positive: usize,
        false_negative: usize,
        true_positive: usize,
    ) -> Self
    {
        Self { true_negative, false_positive, false_negative, true_positive, }
    }


    /// Counts the true and predicted labels relative to `positive_class`.
    pub fn from_labels(y_true: &[usize], y_pred: &[usize], positive_class: usize)
        -> Result<Self>
    {
        checker::check_labels(y_true, y_pred)?;

        let mut matrix = Self::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t == positive_class, p == positive_class) {
                (true, true) => matrix.true_positive += 1,
                (true, false) => matrix.false_negative += 1,
                (false, true) => matrix.false_positive += 1,
                (false, false) => matrix.true_negative += 1,
            }
        }
        Ok(matrix)
    }


    /// Counts the coverage of the rules `ruleset[start..]`
    /// on the positive samples `pos` and the negative samples `neg`.
    /// Covered samples are predicted positive.
    /// 
    /// An empty ruleset with `start == 0` covers nothing.
    /// Otherwise `start` must be a valid rule index.
    pub fn from_ruleset(
        ruleset: &Ruleset,
        start: usize,
        x: &[Vec<f64>],
        pos: &[usize],
        neg: &[usize],
    ) -> Result<Self>
    {
        if ruleset.is_empty() && start == 0 {
            return Ok(Self::new(neg.len(), 0, pos.len(), 0));
        }
        if start >= ruleset.len() {
            return Err(RuleError::IndexOutOfRange {
                index: start,
                len: ruleset.len(),
            });
        }

        let rules = &ruleset.rules()[start..];
        let false_negative = not_covered_by(rules, x, pos).len();
        let true_negative = not_covered_by(rules, x, neg).len();
        Ok(Self {
            true_negative,
            false_positive: neg.len() - true_negative,
            false_negative,
            true_positive: pos.len() - false_negative,
        })
    }


    /// Returns the number of counted samples.
    pub fn total(&self) -> usize {
        self.true_negative
            + self.false_positive
            + self.false_negative
            + self.true_positive
    }


    /// Returns `(tp + tn) / total`, or `0` if nothing was counted.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_positive + self.true_negative) as f64 / total as f64
    }
}


/// Returns the fraction of equal labels.
/// Fails if the label vectors are empty or differ in length.
pub fn measure_accuracy(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    checker::check_labels(y_true, y_pred)?;
    if y_true.is_empty() {
        return Err(RuleError::EmptyInput);
    }

    let correct = y_true.iter()
        .zip(y_pred)
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_relative_to_positive_class() {
        let y_true = vec![0, 0, 1, 1, 2];
        let y_pred = vec![0, 2, 1, 0, 2];
        let matrix = ConfusionMatrix::from_labels(&y_true, &y_pred, 2)
            .unwrap();
        assert_eq!(matrix, ConfusionMatrix::new(3, 1, 0, 1));
    }

    #[test]
    fn accuracy_of_empty_matrix() {
        assert_eq!(ConfusionMatrix::default().accuracy(), 0.0);
    }

    #[test]
    fn accuracy_errors() {
        assert!(matches!(
            measure_accuracy(&[0, 1], &[0]),
            Err(RuleError::LabelCountMismatch { y_true: 2, y_pred: 1 })
        ));
        assert!(matches!(
            measure_accuracy(&[], &[]),
            Err(RuleError::EmptyInput)
        ));
        assert_eq!(measure_accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap(), 0.75);
    }
}
