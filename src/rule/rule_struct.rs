use serde::{Serialize, Deserialize};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::{RuleError, Result};
use crate::common::utils;
use super::condition::Condition;


/// The class that a [`Rule`] predicts for the samples it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prediction {
    /// The class label.
    pub class: usize,
    /// `true` predicts `class`,
    /// `false` predicts "not `class`".
    pub predict: bool,
}


impl Prediction {
    /// Returns the predicted label.
    /// A negative polarity predicts the binary complement of the class:
    /// `0` for a non-zero class and `1` for class `0`.
    #[inline(always)]
    pub fn label(&self) -> usize {
        if self.predict {
            self.class
        } else {
            (self.class == 0) as usize
        }
    }
}


/// A conjunction of conditions with at most one condition per column.
/// 
/// The conditions are stored in column order,
/// which is the order used for coverage and display.
/// The order in which the columns were added is kept separately,
/// since pruning removes the most recently learned condition first.
/// 
/// ```
/// use minirules::{Condition, Rule};
/// 
/// let x = vec![
///     vec![0.0, 0.0, 1.0, 1.0],
///     vec![0.0, 1.0, 0.0, 1.0],
/// ];
/// let mut rule = Rule::with_prediction(1, true);
/// rule.add_cond(Condition::ge("a", 0, 1.0)).unwrap();
/// rule.add_cond(Condition::le("b", 1, 0.0)).unwrap();
/// 
/// assert_eq!(rule.covered_indices(&x, &[0, 1, 2, 3]), vec![2]);
/// assert_eq!(rule.to_string(), "a[0] >= 1 && b[1] <= 0 -> is 1");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "RawRule", try_from = "RawRule")]
pub struct Rule {
    conditions: BTreeMap<usize, Condition>,
    order: Vec<usize>,
    prediction: Option<Prediction>,
}


impl Rule {
    /// Construct an empty rule without prediction.
    pub fn new() -> Self {
        Self::default()
    }


    /// Construct an empty rule that predicts `class`
    /// (or "not `class`" if `predict` is `false`).
    pub fn with_prediction(class: usize, predict: bool) -> Self {
        Self {
            prediction: Some(Prediction { class, predict }),
            ..Self::default()
        }
    }


    /// Set the prediction of this rule.
    pub fn set_prediction(&mut self, class: usize, predict: bool) {
        self.prediction = Some(Prediction { class, predict });
    }


    /// Returns the prediction, if defined.
    pub fn prediction(&self) -> Option<Prediction> {
        self.prediction
    }


    /// Adds `cond` to this rule.
    /// If the rule already has a condition on the same column,
    /// `cond` is merged into it by [`Condition::modify_with`].
    /// 
    /// Returns `true` if a new column was added, `false` if merged.
    pub fn add_cond(&mut self, cond: Condition) -> Result<bool> {
        let column = cond.index();
        match self.conditions.get_mut(&column) {
            Some(current) => {
                current.modify_with(&cond)?;
                Ok(false)
            },
            None => {
                self.conditions.insert(column, cond);
                self.order.push(column);
                Ok(true)
            },
        }
    }


    /// Removes the most recently added condition.
    pub fn pop_back(&mut self) -> Option<Condition> {
        let column = self.order.pop()?;
        self.conditions.remove(&column)
    }


    /// Removes the condition on `column`.
    pub fn pop(&mut self, column: usize) -> Option<Condition> {
        let cond = self.conditions.remove(&column)?;
        self.order.retain(|&c| c != column);
        Some(cond)
    }


    /// Returns the number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }


    /// Returns `true` if the rule has no condition.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }


    /// Returns the condition on `column`, if any.
    pub fn get(&self, column: usize) -> Option<&Condition> {
        self.conditions.get(&column)
    }


    /// Returns the conditions in column order.
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> + '_ {
        self.conditions.values()
    }


    /// Returns the columns in the order they were added.
    pub fn learned_order(&self) -> &[usize] {
        &self.order
    }


    /// Returns the largest column index used by this rule.
    pub fn max_column(&self) -> Option<usize> {
        self.conditions.keys().next_back().copied()
    }


    /// Returns `true` if the `sample`-th row passes every condition.
    pub fn covers(&self, data: &[Vec<f64>], sample: usize) -> bool {
        self.conditions.values()
            .all(|cond| cond.covers(data, sample))
    }


    /// Returns the indices that pass every condition.
    /// An empty rule covers every index.
    /// The relative order of `indices` is preserved.
    pub fn covered_indices(&self, data: &[Vec<f64>], indices: &[usize])
        -> Vec<usize>
    {
        let mut covered = indices.to_vec();
        for cond in self.conditions.values() {
            if covered.is_empty() {
                break;
            }
            covered = cond.covered_indices(data, &covered);
        }
        covered
    }


    /// Returns the indices that fail at least one condition.
    /// `indices` must be sorted in ascending order.
    pub fn not_covered_indices(&self, data: &[Vec<f64>], indices: &[usize])
        -> Vec<usize>
    {
        let covered = self.covered_indices(data, indices);
        utils::difference(indices, &covered)
    }


    /// Returns the predicted label of this rule.
    /// See [`Prediction::label`].
    pub fn predicted_class(&self) -> Result<usize> {
        self.prediction
            .map(|p| p.label())
            .ok_or(RuleError::UndefinedPrediction)
    }


    /// Returns `true` if this rule predicts `class` with positive polarity.
    pub fn predicts_class(&self, class: usize) -> Result<bool> {
        let prediction = self.prediction
            .ok_or(RuleError::UndefinedPrediction)?;
        Ok(prediction.predict && prediction.class == class)
    }


    /// Returns `true` if both rules have the same class and polarity.
    pub fn predicts_the_same(&self, other: &Rule) -> Result<bool> {
        match (self.prediction, other.prediction) {
            (Some(a), Some(b)) => Ok(a == b),
            _ => Err(RuleError::UndefinedPrediction),
        }
    }
}


impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.conditions == other.conditions
            && self.prediction == other.prediction
    }
}


impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions = self.conditions.values()
            .map(|cond| cond.to_string())
            .collect::<Vec<_>>()
            .join(" && ");
        write!(f, "{conditions}")?;

        if let Some(Prediction { class, predict }) = self.prediction {
            let not = if predict { "" } else { "not " };
            write!(f, " -> is {not}{class}")?;
        }
        Ok(())
    }
}


/// The serialized form of a [`Rule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRule {
    conditions: BTreeMap<usize, Condition>,
    order: Vec<usize>,
    class: usize,
    predict: bool,
    class_defined: bool,
}


impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        let (class, predict, class_defined) = match rule.prediction {
            Some(Prediction { class, predict }) => (class, predict, true),
            None => (0, false, false),
        };
        Self {
            conditions: rule.conditions,
            order: rule.order,
            class,
            predict,
            class_defined,
        }
    }
}


impl TryFrom<RawRule> for Rule {
    type Error = RuleError;
    fn try_from(raw: RawRule) -> Result<Self> {
        let ordered = raw.order.iter()
            .copied()
            .collect::<BTreeSet<_>>();

        if ordered.len() != raw.order.len() {
            return Err(RuleError::CorruptRule(
                "the learned order has duplicated columns".into()
            ));
        }

        if !ordered.iter().eq(raw.conditions.keys()) {
            return Err(RuleError::CorruptRule(
                "the learned order does not match the conditions".into()
            ));
        }

        let misplaced = raw.conditions.iter()
            .find(|(column, cond)| cond.index() != **column);
        if let Some((column, cond)) = misplaced {
            return Err(RuleError::CorruptRule(format!(
                "condition on column {} is stored under column {column}",
                cond.index(),
            )));
        }

        let prediction = raw.class_defined.then_some(Prediction {
            class: raw.class,
            predict: raw.predict,
        });

        Ok(Self {
            conditions: raw.conditions,
            order: raw.order,
            prediction,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_keeps_order_in_sync() {
        let mut rule = Rule::new();
        rule.add_cond(Condition::le("c", 2, 1.0)).unwrap();
        rule.add_cond(Condition::le("a", 0, 1.0)).unwrap();
        rule.add_cond(Condition::le("b", 1, 1.0)).unwrap();

        assert_eq!(rule.pop(0).map(|c| c.index()), Some(0));
        assert_eq!(rule.learned_order(), &[2, 1]);
        assert_eq!(rule.pop_back().map(|c| c.index()), Some(1));
        assert_eq!(rule.learned_order(), &[2]);
        assert!(rule.pop(5).is_none());
    }

    #[test]
    fn negative_polarity_complements_the_class() {
        assert_eq!(Prediction { class: 0, predict: false }.label(), 1);
        assert_eq!(Prediction { class: 1, predict: false }.label(), 0);
        assert_eq!(Prediction { class: 7, predict: false }.label(), 0);
        assert_eq!(Prediction { class: 7, predict: true }.label(), 7);
    }
}
