use serde::{Serialize, Deserialize};

use std::collections::BTreeSet;
use std::fmt;

use crate::{RuleError, Result};
use crate::common::FeatureValue;
use super::operator::Operator;


/// The test performed by a [`Condition`].
/// The variants carry the bounds or the accepted values.
#[derive(Debug, Clone, PartialEq)]
pub enum Test {
    /// Accepts `x <= upper`.
    Le(f64),
    /// Accepts `x >= lower`.
    Ge(f64),
    /// Accepts `lower <= x <= upper`. Invariant: `lower <= upper`.
    Range(f64, f64),
    /// Accepts `x` contained in the set.
    In(BTreeSet<FeatureValue>),
}


impl Test {
    /// Returns the operator of this test.
    pub fn operator(&self) -> Operator {
        match self {
            Self::Le(_) => Operator::Le,
            Self::Ge(_) => Operator::Ge,
            Self::Range(..) => Operator::Range,
            Self::In(_) => Operator::In,
        }
    }


    /// Returns the stored values.
    /// `range` returns `[lower, upper]`,
    /// `in` returns the accepted values in ascending order.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Self::Le(v) | Self::Ge(v) => vec![*v],
            Self::Range(lower, upper) => vec![*lower, *upper],
            Self::In(values) => values.iter().map(FeatureValue::get).collect(),
        }
    }


    /// Returns `true` if `x` passes this test.
    #[inline(always)]
    pub fn accepts(&self, x: f64) -> bool {
        match self {
            Self::Le(upper) => x <= *upper,
            Self::Ge(lower) => x >= *lower,
            Self::Range(lower, upper) => *lower <= x && x <= *upper,
            Self::In(values) => values.contains(&FeatureValue(x)),
        }
    }
}


fn checked_range(lower: f64, upper: f64) -> Result<Test> {
    // `!(a <= b)` also rejects `NaN` bounds.
    if !(lower <= upper) {
        return Err(RuleError::InvalidRange { lower, upper });
    }
    Ok(Test::Range(lower, upper))
}


/// A single test on one feature column.
/// 
/// ```
/// use minirules::{Condition, Operator};
/// 
/// let x = vec![vec![0.0, 1.0, 2.0, 3.0, 4.0]];
/// let cond = Condition::with_values("x", 0, Operator::Range, &[1.0, 3.0])
///     .unwrap();
/// 
/// assert_eq!(cond.covered_indices(&x, &[0, 1, 2, 3, 4]), vec![1, 2, 3]);
/// assert_eq!(cond.to_string(), "x[0] range [1, 3]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawCondition", try_from = "RawCondition")]
pub struct Condition {
    feature: String,
    index: usize,
    test: Test,
}


impl Condition {
    /// Construct a new condition from a single value.
    /// `range` needs two values, so it is rejected here.
    /// Use [`Condition::with_values`] for ranges.
    pub fn new<S>(feature: S, index: usize, operator: Operator, value: f64)
        -> Result<Self>
        where S: Into<String>,
    {
        let test = match operator {
            Operator::Le => Test::Le(value),
            Operator::Ge => Test::Ge(value),
            Operator::In => Test::In(BTreeSet::from([FeatureValue(value)])),
            Operator::Range => {
                return Err(RuleError::InvalidArity {
                    operator, expected: "2", got: 1,
                });
            },
        };
        Ok(Self { feature: feature.into(), index, test, })
    }


    /// Construct a new condition from a list of values.
    /// `<=` and `>=` take exactly one value,
    /// `range` takes `[lower, upper]` with `lower <= upper`,
    /// `in` takes at least one value (duplicates are collapsed).
    pub fn with_values<S>(
        feature: S,
        index: usize,
        operator: Operator,
        values: &[f64],
    ) -> Result<Self>
        where S: Into<String>,
    {
        let arity = |expected| RuleError::InvalidArity {
            operator, expected, got: values.len(),
        };
        let test = match operator {
            Operator::Le | Operator::Ge => {
                let [value] = values else { return Err(arity("1")); };
                if operator == Operator::Le {
                    Test::Le(*value)
                } else {
                    Test::Ge(*value)
                }
            },
            Operator::Range => {
                let [lower, upper] = values else { return Err(arity("2")); };
                checked_range(*lower, *upper)?
            },
            Operator::In => {
                if values.is_empty() {
                    return Err(arity("at least 1"));
                }
                Test::In(values.iter().copied().map(FeatureValue).collect())
            },
        };
        Ok(Self { feature: feature.into(), index, test, })
    }


    /// Construct a new `<=` condition.
    pub fn le<S: Into<String>>(feature: S, index: usize, value: f64) -> Self {
        Self { feature: feature.into(), index, test: Test::Le(value), }
    }


    /// Construct a new `>=` condition.
    pub fn ge<S: Into<String>>(feature: S, index: usize, value: f64) -> Self {
        Self { feature: feature.into(), index, test: Test::Ge(value), }
    }


    /// Construct a new `in` condition with a single value.
    pub fn equals<S: Into<String>>(feature: S, index: usize, value: f64) -> Self {
        let test = Test::In(BTreeSet::from([FeatureValue(value)]));
        Self { feature: feature.into(), index, test, }
    }


    /// Construct a new `range` condition.
    pub fn range<S>(feature: S, index: usize, lower: f64, upper: f64)
        -> Result<Self>
        where S: Into<String>,
    {
        let test = checked_range(lower, upper)?;
        Ok(Self { feature: feature.into(), index, test, })
    }


    /// Construct a new `in` condition.
    pub fn one_of<S, I>(feature: S, index: usize, values: I) -> Result<Self>
        where S: Into<String>,
              I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter()
            .map(FeatureValue)
            .collect::<BTreeSet<_>>();
        if values.is_empty() {
            return Err(RuleError::InvalidArity {
                operator: Operator::In, expected: "at least 1", got: 0,
            });
        }
        Ok(Self { feature: feature.into(), index, test: Test::In(values), })
    }


    /// Returns the feature name.
    pub fn feature(&self) -> &str {
        &self.feature
    }


    /// Returns the column index of the feature.
    pub fn index(&self) -> usize {
        self.index
    }


    /// Returns the operator.
    pub fn operator(&self) -> Operator {
        self.test.operator()
    }


    /// Returns the test.
    pub fn test(&self) -> &Test {
        &self.test
    }


    /// Returns the stored values. See [`Test::values`].
    pub fn values(&self) -> Vec<f64> {
        self.test.values()
    }


    /// Returns the interval `[lower, upper]` this condition accepts.
    /// An open side is infinite.
    /// An `in` condition has no interval.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self.test {
            Test::Le(upper) => Some((f64::NEG_INFINITY, upper)),
            Test::Ge(lower) => Some((lower, f64::INFINITY)),
            Test::Range(lower, upper) => Some((lower, upper)),
            Test::In(_) => None,
        }
    }


    /// Returns `true` if the `sample`-th row of `data` passes the test.
    #[inline(always)]
    pub fn covers(&self, data: &[Vec<f64>], sample: usize) -> bool {
        self.test.accepts(data[self.index][sample])
    }


    /// Returns the indices in `indices` whose value passes the test.
    /// The relative order of `indices` is preserved.
    /// 
    /// # Panics
    /// Panics if `data` has no column `self.index()`
    /// or an index is out of the column.
    pub fn covered_indices(&self, data: &[Vec<f64>], indices: &[usize])
        -> Vec<usize>
    {
        let column = &data[self.index];
        indices.iter()
            .copied()
            .filter(|&i| self.test.accepts(column[i]))
            .collect()
    }


    /// Returns the indices in `indices` whose value fails the test.
    /// The relative order of `indices` is preserved.
    /// 
    /// # Panics
    /// Same as [`Condition::covered_indices`].
    pub fn not_covered_indices(&self, data: &[Vec<f64>], indices: &[usize])
        -> Vec<usize>
    {
        let column = &data[self.index];
        indices.iter()
            .copied()
            .filter(|&i| !self.test.accepts(column[i]))
            .collect()
    }


    /// Tightens this condition with `operator value`.
    /// Returns `true` if the condition changed.
    /// 
    /// - `<=` lowers the upper bound, `>=` raises the lower bound.
    ///   A bound that would not tighten is left as is.
    /// - `<=` on a `>=` condition (and vice versa)
    ///   promotes it to a `range`.
    /// - `in` adds the value to an `in` condition.
    /// 
    /// Mixing `in` with the numeric operators,
    /// passing `range`, or ending up with `lower > upper` is an error.
    pub fn modify(&mut self, operator: Operator, value: f64) -> Result<bool> {
        if let (Test::In(values), Operator::In) = (&mut self.test, operator) {
            return Ok(values.insert(FeatureValue(value)));
        }

        let next = match (&self.test, operator) {
            (Test::Le(upper), Operator::Le) => {
                (value < *upper).then_some(Test::Le(value))
            },
            (Test::Ge(lower), Operator::Ge) => {
                (value > *lower).then_some(Test::Ge(value))
            },
            (Test::Le(upper), Operator::Ge) => {
                Some(checked_range(value, *upper)?)
            },
            (Test::Ge(lower), Operator::Le) => {
                Some(checked_range(*lower, value)?)
            },
            (Test::Range(lower, upper), Operator::Le) if value < *upper => {
                Some(checked_range(*lower, value)?)
            },
            (Test::Range(lower, upper), Operator::Ge) if value > *lower => {
                Some(checked_range(value, *upper)?)
            },
            (Test::Range(..), Operator::Le | Operator::Ge) => None,
            (current, requested) => {
                return Err(RuleError::BadOperatorCombination {
                    current: current.operator(),
                    requested,
                });
            },
        };

        match next {
            Some(test) => {
                self.test = test;
                Ok(true)
            },
            None => Ok(false),
        }
    }


    /// Merges `other` into this condition.
    /// Returns `true` if the condition changed.
    /// 
    /// `range` applies both of its bounds,
    /// `in` takes the union of the value sets,
    /// `<=` and `>=` behave as [`Condition::modify`].
    /// If an error occurs, `self` is left unchanged.
    pub fn modify_with(&mut self, other: &Condition) -> Result<bool> {
        if other.index != self.index {
            return Err(RuleError::ColumnMismatch {
                expected: self.index,
                got: other.index,
            });
        }

        let current = self.operator();
        match &other.test {
            Test::Le(value) => self.modify(Operator::Le, *value),
            Test::Ge(value) => self.modify(Operator::Ge, *value),
            Test::Range(lower, upper) => {
                if current == Operator::In {
                    return Err(RuleError::BadOperatorCombination {
                        current, requested: Operator::Range,
                    });
                }
                let mut merged = self.clone();
                let raised = merged.modify(Operator::Ge, *lower)?;
                let lowered = merged.modify(Operator::Le, *upper)?;
                *self = merged;
                Ok(raised || lowered)
            },
            Test::In(values) => match &mut self.test {
                Test::In(accepted) => {
                    let before = accepted.len();
                    accepted.extend(values.iter().copied());
                    Ok(accepted.len() > before)
                },
                _ => Err(RuleError::BadOperatorCombination {
                    current, requested: Operator::In,
                }),
            },
        }
    }
}


impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {} ", self.feature, self.index, self.operator())?;
        match &self.test {
            Test::Le(v) | Test::Ge(v) => write!(f, "{v}"),
            Test::Range(lower, upper) => write!(f, "[{lower}, {upper}]"),
            Test::In(values) => {
                let values = values.iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{ {values} }}")
            },
        }
    }
}


/// The serialized form of a [`Condition`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCondition {
    feature: String,
    index: usize,
    operator: String,
    values: Vec<f64>,
}


impl From<Condition> for RawCondition {
    fn from(cond: Condition) -> Self {
        Self {
            operator: cond.operator().to_string(),
            values: cond.values(),
            feature: cond.feature,
            index: cond.index,
        }
    }
}


impl TryFrom<RawCondition> for Condition {
    type Error = RuleError;
    fn try_from(raw: RawCondition) -> Result<Self> {
        let operator = raw.operator.parse::<Operator>()?;
        Condition::with_values(raw.feature, raw.index, operator, &raw.values)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(Condition::le("x", 0, 2.0).bounds(), Some((f64::NEG_INFINITY, 2.0)));
        assert_eq!(Condition::ge("x", 0, 2.0).bounds(), Some((2.0, f64::INFINITY)));
        assert_eq!(Condition::equals("x", 0, 2.0).bounds(), None);
    }

    #[test]
    fn le_tightens_only() {
        let mut cond = Condition::le("x", 0, 5.0);
        assert!(!cond.modify(Operator::Le, 7.0).unwrap());
        assert!(cond.modify(Operator::Le, 3.0).unwrap());
        assert_eq!(cond.test(), &Test::Le(3.0));
    }

    #[test]
    fn opposite_bound_promotes_to_range() {
        let mut cond = Condition::ge("x", 0, 1.0);
        assert!(cond.modify(Operator::Le, 4.0).unwrap());
        assert_eq!(cond.test(), &Test::Range(1.0, 4.0));

        let mut cond = Condition::le("x", 0, 1.0);
        let err = cond.modify(Operator::Ge, 2.0).unwrap_err();
        assert!(matches!(err, RuleError::InvalidRange { .. }));
        assert_eq!(cond.test(), &Test::Le(1.0));
    }

    #[test]
    fn range_is_not_a_modifier() {
        let mut cond = Condition::le("x", 0, 1.0);
        let err = cond.modify(Operator::Range, 0.0).unwrap_err();
        assert!(matches!(
            err,
            RuleError::BadOperatorCombination {
                current: Operator::Le,
                requested: Operator::Range,
            }
        ));
    }

    #[test]
    fn merge_keeps_state_on_error() {
        let mut cond = Condition::range("x", 0, 0.0, 2.0).unwrap();
        let other = Condition::range("x", 0, 3.0, 4.0).unwrap();
        assert!(cond.modify_with(&other).is_err());
        assert_eq!(cond.test(), &Test::Range(0.0, 2.0));
    }
}
