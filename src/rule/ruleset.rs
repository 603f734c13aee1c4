use serde::{Serialize, Deserialize};

use std::fmt;
use std::ops::Index;
use std::path::Path;

use crate::{RuleError, Result};
use crate::common::utils;
use super::rule_struct::Rule;


/// An ordered list of rules.
/// The rules are evaluated in order,
/// and the first rule that covers a sample decides its prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    rules: Vec<Rule>,
}


impl Ruleset {
    /// Construct an empty ruleset.
    pub fn new() -> Self {
        Self::default()
    }


    /// Appends `rule` unless it equals the last rule.
    /// Returns `true` if the rule was appended.
    pub fn add_rule(&mut self, rule: Rule) -> bool {
        if self.rules.last() == Some(&rule) {
            return false;
        }
        self.rules.push(rule);
        true
    }


    /// Removes and returns the `index`-th rule.
    pub fn pop(&mut self, index: usize) -> Result<Rule> {
        self.check_index(index)?;
        Ok(self.rules.remove(index))
    }


    /// Replaces the `index`-th rule by `rule`
    /// and returns the replaced one.
    pub fn replace(&mut self, index: usize, rule: Rule) -> Result<Rule> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.rules[index], rule))
    }


    /// Returns the `index`-th rule, if any.
    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }


    /// Returns the rules as a slice.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }


    /// Returns an iterator over the rules.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }


    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }


    /// Returns `true` if the ruleset has no rule.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }


    /// Returns the largest column index used by the rules.
    pub fn max_column(&self) -> Option<usize> {
        self.rules.iter()
            .filter_map(Rule::max_column)
            .max()
    }


    /// Returns the indices covered by at least one rule.
    /// `indices` must be sorted in ascending order.
    pub fn covered_indices(&self, data: &[Vec<f64>], indices: &[usize])
        -> Vec<usize>
    {
        let not_covered = self.not_covered_indices(data, indices);
        utils::difference(indices, &not_covered)
    }


    /// Returns the indices that no rule covers.
    /// Each rule only sees the samples the previous rules left over.
    /// `indices` must be sorted in ascending order.
    pub fn not_covered_indices(&self, data: &[Vec<f64>], indices: &[usize])
        -> Vec<usize>
    {
        not_covered_by(&self.rules, data, indices)
    }


    /// Serializes this ruleset into a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }


    /// Deserializes a ruleset from a JSON string.
    /// Every rule and condition is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }


    /// Writes this ruleset to `path` as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .map_err(|source| RuleError::Io {
                path: path.to_path_buf(),
                source,
            })
    }


    /// Reads a ruleset written by [`Ruleset::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| RuleError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&json)
    }


    #[inline(always)]
    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.rules.len() {
            return Err(RuleError::IndexOutOfRange {
                index,
                len: self.rules.len(),
            });
        }
        Ok(())
    }
}


/// Returns the indices that no rule of `rules` covers,
/// applying the rules in order.
pub(crate) fn not_covered_by(
    rules: &[Rule],
    data: &[Vec<f64>],
    indices: &[usize],
) -> Vec<usize>
{
    let mut remaining = indices.to_vec();
    for rule in rules {
        if remaining.is_empty() {
            break;
        }
        remaining = rule.not_covered_indices(data, &remaining);
    }
    remaining
}


impl From<Vec<Rule>> for Ruleset {
    fn from(rules: Vec<Rule>) -> Self {
        let mut ruleset = Self::new();
        for rule in rules {
            ruleset.add_rule(rule);
        }
        ruleset
    }
}


impl Index<usize> for Ruleset {
    type Output = Rule;
    fn index(&self, index: usize) -> &Self::Output {
        &self.rules[index]
    }
}


impl<'a> IntoIterator for &'a Ruleset {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;
    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}


impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rules.is_empty() {
            return write!(f, "[ empty ]");
        }
        let rules = self.rules.iter()
            .map(|rule| format!("  {rule}"))
            .collect::<Vec<_>>()
            .join(",\n");
        write!(f, "[\n{rules}\n]")
    }
}
