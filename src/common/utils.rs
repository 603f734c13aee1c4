//! This file provides some common functions
//! such as sorted-set differences and value counting.
use std::collections::{BTreeMap, BTreeSet};

use super::value::FeatureValue;


/// Returns the sorted-set difference `a \ b`.
/// Both `a` and `b` must be sorted in ascending order,
/// and the returned vector is sorted as well.
pub fn difference(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut diff = Vec::with_capacity(a.len());
    let mut j = 0;
    for &x in a {
        while j < b.len() && b[j] < x {
            j += 1;
        }
        if j < b.len() && b[j] == x {
            continue;
        }
        diff.push(x);
    }
    diff
}


/// Returns `true` if `indices` is sorted in strictly ascending order.
#[inline(always)]
pub fn is_sorted_set(indices: &[usize]) -> bool {
    indices.windows(2).all(|w| w[0] < w[1])
}


/// Counts the values of `column` at the given `indices`.
/// The keys are ordered in ascending order.
pub fn unique_counts(column: &[f64], indices: &[usize])
    -> BTreeMap<FeatureValue, usize>
{
    let mut counts = BTreeMap::new();
    for &i in indices {
        *counts.entry(FeatureValue(column[i])).or_insert(0) += 1;
    }
    counts
}


/// Returns the distinct values of `column` in ascending order.
pub fn unique(column: &[f64]) -> BTreeSet<FeatureValue> {
    column.iter()
        .copied()
        .map(FeatureValue)
        .collect()
}


/// Returns the number of distinct values in `column`.
#[inline(always)]
pub fn n_unique(column: &[f64]) -> usize {
    unique(column).len()
}


/// Replaces the counts of `counts` by their running sums
/// in ascending key order.
/// After this call, `counts[v]` is the number of values `<= v`.
pub fn cumulative_sum(counts: &mut BTreeMap<FeatureValue, usize>) {
    let mut acc = 0;
    for count in counts.values_mut() {
        acc += *count;
        *count = acc;
    }
}


/// Replaces the counts of `counts` by their running sums
/// in descending key order.
/// After this call, `counts[v]` is the number of values `>= v`.
pub fn reverse_cumulative_sum(counts: &mut BTreeMap<FeatureValue, usize>) {
    let mut acc = 0;
    for count in counts.values_mut().rev() {
        acc += *count;
        *count = acc;
    }
}


/// Returns the indices `0..column.len()` sorted by `column`.
/// Ties keep their original order.
pub fn sort_by_indices(column: &[f64]) -> Vec<usize> {
    let mut indices = (0..column.len()).collect::<Vec<_>>();
    indices.sort_by_key(|&i| FeatureValue(column[i]));
    indices
}
