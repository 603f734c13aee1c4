//! Growing a rule with the FOIL information gain.
use crate::{Result, Condition, Operator, Rule};
use crate::common::utils;
use crate::logging::LogEvent;
use super::core::LearnerCore;


/// Returns the FOIL information gain of a literal that keeps
/// `p` of `total_pos` positive and `n` of `total_neg` negative samples.
/// 
/// `gain = p * (log2(p / (p + n)) - log2(P / (P + N)))`
#[inline(always)]
pub fn foil_gain(p: usize, n: usize, total_pos: usize, total_neg: usize)
    -> f64
{
    let old = (total_pos as f64 / (total_pos + total_neg) as f64).log2();
    let new = (p as f64 / (p + n) as f64).log2();
    p as f64 * (new - old)
}


impl LearnerCore {
    /// Returns the literal with the maximal FOIL gain
    /// on the currently covered samples `pos` and `neg`.
    /// 
    /// The thresholds are the distinct feature values of `pos`.
    /// A categorical feature (at most `categorical_max` distinct values)
    /// is tested with `in`, the other features with `<=` and `>=`.
    /// Features are scanned in column order, `<=` before `>=`,
    /// thresholds in ascending order,
    /// and only a strictly larger gain replaces the best literal.
    /// 
    /// Returns `None` if no positive sample is given.
    pub fn find_literal(
        &self,
        x: &[Vec<f64>],
        feature_names: &[String],
        pos: &[usize],
        neg: &[usize],
    ) -> Option<Condition>
    {
        let total_pos = pos.len();
        let total_neg = neg.len();
        let categorical_max = self.config().categorical_max;

        let mut best: Option<(usize, Operator, f64)> = None;
        let mut best_gain = f64::NEG_INFINITY;

        for (index, column) in x.iter().enumerate().take(feature_names.len()) {
            let pos_counts = utils::unique_counts(column, pos);
            if pos_counts.is_empty() {
                continue;
            }
            let neg_counts = utils::unique_counts(column, neg);

            let categorical = categorical_max > 0
                && utils::n_unique(column) <= categorical_max;

            let mut candidates = Vec::new();
            if categorical {
                for (value, &p) in &pos_counts {
                    let n = neg_counts.get(value).copied().unwrap_or(0);
                    candidates.push((Operator::In, *value, p, n));
                }
            } else {
                let mut pos_le = pos_counts.clone();
                let mut neg_le = neg_counts.clone();
                utils::cumulative_sum(&mut pos_le);
                utils::cumulative_sum(&mut neg_le);
                for (value, &p) in &pos_le {
                    let n = neg_le.range(..=*value)
                        .next_back()
                        .map_or(0, |(_, &n)| n);
                    candidates.push((Operator::Le, *value, p, n));
                }

                let mut pos_ge = pos_counts;
                let mut neg_ge = neg_counts;
                utils::reverse_cumulative_sum(&mut pos_ge);
                utils::reverse_cumulative_sum(&mut neg_ge);
                for (value, &p) in &pos_ge {
                    let n = neg_ge.range(*value..)
                        .next()
                        .map_or(0, |(_, &n)| n);
                    candidates.push((Operator::Ge, *value, p, n));
                }
            }

            for (operator, value, p, n) in candidates {
                let gain = foil_gain(p, n, total_pos, total_neg);
                if gain > best_gain {
                    best_gain = gain;
                    best = Some((index, operator, value.get()));
                }
            }
        }

        let (index, operator, value) = best?;
        let feature = feature_names[index].as_str();
        let cond = match operator {
            Operator::Le => Condition::le(feature, index, value),
            Operator::Ge => Condition::ge(feature, index, value),
            _ => Condition::equals(feature, index, value),
        };
        Some(cond)
    }


    /// Grows a rule from scratch on the grow split.
    /// See [`LearnerCore::grow_rule_from`].
    pub fn grow_rule(
        &self,
        x: &[Vec<f64>],
        feature_names: &[String],
        pos_grow: &[usize],
        neg_grow: &[usize],
    ) -> Result<Rule>
    {
        self.grow_rule_from(Rule::new(), x, feature_names, pos_grow, neg_grow)
    }


    /// Grows `rule` on the grow split.
    /// 
    /// While the rule covers a negative sample,
    /// the best literal is added to the rule.
    /// Growing stops when no literal is found
    /// or the literal does not change the rule.
    pub fn grow_rule_from(
        &self,
        mut rule: Rule,
        x: &[Vec<f64>],
        feature_names: &[String],
        pos_grow: &[usize],
        neg_grow: &[usize],
    ) -> Result<Rule>
    {
        self.log(&LogEvent::Growing);
        let mut pos = rule.covered_indices(x, pos_grow);
        let mut neg = rule.covered_indices(x, neg_grow);

        while !neg.is_empty() {
            let Some(cond) = self.find_literal(x, feature_names, &pos, &neg)
            else {
                self.log(&LogEvent::NoLiteral);
                break;
            };
            self.log(&LogEvent::LiteralFound(&cond));

            let old_rule = rule.clone();
            rule.add_cond(cond)?;
            if rule == old_rule {
                self.log(&LogEvent::SameRule { size: rule.len() });
                break;
            }

            pos = rule.covered_indices(x, &pos);
            neg = rule.covered_indices(x, &neg);
        }
        Ok(rule)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LearnerConfig, PruningMetric};

    #[test]
    fn gain_of_pure_literal() {
        // Keeps 2 of 2 positives and none of 2 negatives.
        assert!((foil_gain(2, 0, 2, 2) - 2.0).abs() < 1e-12);
        // Keeps everything.
        assert!(foil_gain(2, 2, 2, 2).abs() < 1e-12);
    }

    #[test]
    fn categorical_features_use_in() {
        let core = LearnerCore::new(
            LearnerConfig::default().seed(0).categorical_max(2),
            PruningMetric::IrepDefault,
        );
        let x = vec![vec![0.0, 1.0, 1.0, 0.0]];
        let names = vec!["c".to_string()];
        let cond = core.find_literal(&x, &names, &[1, 2], &[0, 3]).unwrap();
        assert_eq!(cond.operator(), Operator::In);
        assert_eq!(cond.values(), vec![1.0]);
    }
}
