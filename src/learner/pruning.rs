//! Reduced-error pruning of a grown rule.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::{RuleError, Rule};
use crate::logging::LogEvent;
use super::core::LearnerCore;


/// The metric that scores a rule on the prune split.
/// `p`/`n` are the covered positive/negative samples,
/// `P`/`N` are all positive/negative samples of the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PruningMetric {
    /// `(p + (N - n)) / (P + N)`, the accuracy of the rule.
    /// `0` if the split is empty.
    #[serde(rename = "IREP_default")]
    IrepDefault,
    /// `(p - n) / (p + n)`.
    /// `0` if the rule covers nothing.
    #[serde(rename = "RIPPER_default")]
    RipperDefault,
}


impl PruningMetric {
    /// Returns the metric value from the coverage counts.
    pub fn score(&self, p: usize, n: usize, total_pos: usize, total_neg: usize)
        -> f64
    {
        match self {
            Self::IrepDefault => {
                let total = total_pos + total_neg;
                if total == 0 {
                    return 0.0;
                }
                let correct = p + total_neg.saturating_sub(n);
                correct as f64 / total as f64
            },
            Self::RipperDefault => {
                if p + n == 0 {
                    return 0.0;
                }
                (p as f64 - n as f64) / (p + n) as f64
            },
        }
    }


    /// Returns the metric value of `rule` on the given split.
    pub fn evaluate(
        &self,
        x: &[Vec<f64>],
        rule: &Rule,
        pos: &[usize],
        neg: &[usize],
    ) -> f64
    {
        let p = rule.covered_indices(x, pos).len();
        let n = rule.covered_indices(x, neg).len();
        self.score(p, n, pos.len(), neg.len())
    }


    /// Returns the name used by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IrepDefault => "IREP_default",
            Self::RipperDefault => "RIPPER_default",
        }
    }
}


impl fmt::Display for PruningMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


impl FromStr for PruningMetric {
    type Err = RuleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IREP_default" => Ok(Self::IrepDefault),
            "RIPPER_default" => Ok(Self::RipperDefault),
            _ => Err(RuleError::UnknownPruningMetric(s.to_string())),
        }
    }
}


impl LearnerCore {
    /// Prunes `rule` on the prune split.
    /// 
    /// The conditions are removed in reverse learned order.
    /// A removal is kept only if the pruning metric strictly improves
    /// and the rule keeps at least one condition.
    /// The first removal that is not kept stops pruning.
    pub fn prune_rule(
        &self,
        rule: &Rule,
        x: &[Vec<f64>],
        pos_prune: &[usize],
        neg_prune: &[usize],
    ) -> Rule
    {
        let metric = self.metric();
        let mut best_val = metric.evaluate(x, rule, pos_prune, neg_prune);
        let mut best = rule.clone();

        while best.len() > 1 {
            let mut candidate = best.clone();
            candidate.pop_back();

            let new_val = metric.evaluate(x, &candidate, pos_prune, neg_prune);
            self.log(&LogEvent::PruneStep { old: best_val, new: new_val });

            if new_val > best_val {
                best_val = new_val;
                best = candidate;
            } else {
                break;
            }
        }

        self.log(&LogEvent::Pruned { before: rule.len(), after: best.len() });
        best
    }


    /// Returns `p / (p + n)` of `rule` on the given split,
    /// or `0` if the rule covers nothing.
    pub fn rule_accuracy(
        x: &[Vec<f64>],
        rule: &Rule,
        pos: &[usize],
        neg: &[usize],
    ) -> f64
    {
        let p = rule.covered_indices(x, pos).len();
        let n = rule.covered_indices(x, neg).len();
        if p + n == 0 {
            return 0.0;
        }
        p as f64 / (p + n) as f64
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irep_metric() {
        let metric = PruningMetric::IrepDefault;
        assert_eq!(metric.score(0, 0, 0, 0), 0.0);
        // 3 covered positives and 2 uncovered negatives out of 6.
        assert!((metric.score(3, 1, 3, 3) - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn ripper_metric() {
        let metric = PruningMetric::RipperDefault;
        assert_eq!(metric.score(0, 0, 5, 5), 0.0);
        assert!((metric.score(3, 1, 5, 5) - 0.5).abs() < 1e-12);
        assert!((metric.score(0, 2, 5, 5) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn parse_metric() {
        assert_eq!(
            "RIPPER_default".parse::<PruningMetric>().unwrap(),
            PruningMetric::RipperDefault
        );
        assert!(matches!(
            "ripper".parse::<PruningMetric>(),
            Err(RuleError::UnknownPruningMetric(_))
        ));
    }
}
