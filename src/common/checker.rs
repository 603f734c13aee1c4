//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data
use crate::{RuleError, Result, Ruleset};


/// Check whether the training inputs are valid or not.
/// Returns the number of samples.
pub(crate) fn check_fit_input(
    x: &[Vec<f64>],
    y: &[usize],
    feature_names: &[String],
) -> Result<usize>
{
    if x.is_empty() || y.is_empty() {
        return Err(RuleError::EmptyInput);
    }

    let n_sample = x[0].len();
    if n_sample != y.len() {
        return Err(RuleError::SampleCountMismatch {
            features: n_sample,
            labels: y.len(),
        });
    }

    check_columns(x, n_sample)?;

    if x.len() != feature_names.len() {
        return Err(RuleError::FeatureNamesMismatch {
            columns: x.len(),
            names: feature_names.len(),
        });
    }
    Ok(n_sample)
}


/// Check whether `ruleset` can be evaluated on `x`.
/// Returns the number of samples.
pub(crate) fn check_predict_input(ruleset: &Ruleset, x: &[Vec<f64>])
    -> Result<usize>
{
    let n_sample = x.first().map_or(0, Vec::len);
    check_columns(x, n_sample)?;

    if let Some(column) = ruleset.max_column() {
        if column >= x.len() {
            return Err(RuleError::IndexOutOfRange {
                index: column,
                len: x.len(),
            });
        }
    }
    Ok(n_sample)
}


/// Check whether two label vectors have the same length.
pub(crate) fn check_labels(y_true: &[usize], y_pred: &[usize])
    -> Result<()>
{
    if y_true.len() != y_pred.len() {
        return Err(RuleError::LabelCountMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    Ok(())
}


// Every column must hold `n_sample` values.
fn check_columns(x: &[Vec<f64>], n_sample: usize) -> Result<()> {
    let ragged = x.iter()
        .enumerate()
        .find(|(_, column)| column.len() != n_sample);
    match ragged {
        Some((column, values)) => Err(RuleError::RaggedFeature {
            column,
            expected: n_sample,
            got: values.len(),
        }),
        None => Ok(()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    #[test]
    fn valid_input() {
        let x = vec![vec![0.0, 1.0], vec![1.0, 2.0]];
        let n = check_fit_input(&x, &[0, 1], &names(2)).unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn empty_input() {
        let err = check_fit_input(&[], &[0], &names(0)).unwrap_err();
        assert!(matches!(err, RuleError::EmptyInput));
    }

    #[test]
    fn label_count_differs() {
        let x = vec![vec![0.0, 1.0]];
        let err = check_fit_input(&x, &[0, 1, 1], &names(1)).unwrap_err();
        assert!(matches!(
            err,
            RuleError::SampleCountMismatch { features: 2, labels: 3 }
        ));
    }

    #[test]
    fn ragged_column() {
        let x = vec![vec![0.0, 1.0], vec![1.0]];
        let err = check_fit_input(&x, &[0, 1], &names(2)).unwrap_err();
        assert!(matches!(err, RuleError::RaggedFeature { column: 1, .. }));
    }

    #[test]
    fn name_count_differs() {
        let x = vec![vec![0.0, 1.0]];
        let err = check_fit_input(&x, &[0, 1], &names(2)).unwrap_err();
        assert!(matches!(err, RuleError::FeatureNamesMismatch { .. }));
    }
}
