//! Defines the error type shared by every learner and rule structure.
use std::path::PathBuf;

use crate::rule::Operator;


/// Errors from rule construction, rule learning, and persistence.
/// 
/// # Errors
/// 
/// | Variant | Condition |
/// |---------|-----------|
/// | [`RuleError::EmptyInput`] | The feature matrix or the labels are empty |
/// | [`RuleError::SampleCountMismatch`] | `X[0].len() != Y.len()` |
/// | [`RuleError::RaggedFeature`] | A feature column has a different length |
/// | [`RuleError::FeatureNamesMismatch`] | `X.len() != feature_names.len()` |
/// | [`RuleError::LabelCountMismatch`] | Label vectors of different lengths |
/// | [`RuleError::IndexOutOfRange`] | A rule or column index does not exist |
/// | [`RuleError::UnknownOperator`] | The operator string is not recognized |
/// | [`RuleError::UnknownPruningMetric`] | The metric string is not recognized |
/// | [`RuleError::InvalidArity`] | Wrong number of values for an operator |
/// | [`RuleError::BadOperatorCombination`] | A condition cannot be merged |
/// | [`RuleError::InvalidRange`] | A range would have `lower > upper` |
/// | [`RuleError::ColumnMismatch`] | Merging conditions of different columns |
/// | [`RuleError::EmptySplit`] | Splitting an empty index set |
/// | [`RuleError::InvalidSplit`] | The split ratio gives an empty half |
/// | [`RuleError::InvalidSplitRatio`] | The split ratio is outside `(0, 1]` |
/// | [`RuleError::EmptyRuleset`] | Predicting with a ruleset that needs rules |
/// | [`RuleError::UndefinedPrediction`] | A rule has no class or polarity |
/// | [`RuleError::CorruptRule`] | A deserialized rule is inconsistent |
/// | [`RuleError::InvalidSample`] | A CSV file cannot be turned into a sample |
/// | [`RuleError::Io`] | A file cannot be read or written |
/// | [`RuleError::Read`] | A reader fails in the middle of a sample |
/// | [`RuleError::Json`] | A ruleset cannot be (de)serialized |
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Returned when the feature matrix or the label vector is empty.
    #[error("input vectors are empty")]
    EmptyInput,

    /// Returned when the feature columns and the labels disagree on
    /// the number of samples.
    #[error("feature columns have {features} samples, but {labels} labels were given")]
    SampleCountMismatch {
        /// The number of samples in the first feature column.
        features: usize,
        /// The number of labels.
        labels: usize,
    },

    /// Returned when a feature column is shorter or longer than the first one.
    #[error("feature column {column} has {got} samples, expected {expected}")]
    RaggedFeature {
        /// The index of the offending column.
        column: usize,
        /// The number of samples in the first column.
        expected: usize,
        /// The number of samples in the offending column.
        got: usize,
    },

    /// Returned when the number of feature names differs from
    /// the number of feature columns.
    #[error("{columns} feature columns were given with {names} feature names")]
    FeatureNamesMismatch {
        /// The number of feature columns.
        columns: usize,
        /// The number of feature names.
        names: usize,
    },

    /// Returned when the true and predicted labels have different lengths.
    #[error("y_true has {y_true} labels, but y_pred has {y_pred}")]
    LabelCountMismatch {
        /// The length of the true labels.
        y_true: usize,
        /// The length of the predicted labels.
        y_pred: usize,
    },

    /// Returned when an index is not smaller than the length it refers to.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the indexed collection.
        len: usize,
    },

    /// Returned when an operator string is none of `<=`, `>=`, `range`, `in`.
    #[error("unknown operator `{0}`, expected one of `<=`, `>=`, `range`, `in`")]
    UnknownOperator(String),

    /// Returned when a pruning metric string is not recognized.
    #[error("unknown pruning metric `{0}`, expected `IREP_default` or `RIPPER_default`")]
    UnknownPruningMetric(String),

    /// Returned when an operator receives the wrong number of values.
    #[error("operator `{operator}` takes {expected} value(s), got {got}")]
    InvalidArity {
        /// The operator of the condition.
        operator: Operator,
        /// The accepted number of values.
        expected: &'static str,
        /// The number of values given.
        got: usize,
    },

    /// Returned when a condition is modified with an incompatible operator.
    #[error("cannot modify a `{current}` condition with `{requested}`")]
    BadOperatorCombination {
        /// The operator of the existing condition.
        current: Operator,
        /// The operator of the modification.
        requested: Operator,
    },

    /// Returned when a range would end up with `lower > upper`.
    #[error("range lower bound {lower} exceeds upper bound {upper}")]
    InvalidRange {
        /// The lower bound.
        lower: f64,
        /// The upper bound.
        upper: f64,
    },

    /// Returned when two conditions on different columns are merged.
    #[error("cannot merge a condition on column {got} into column {expected}")]
    ColumnMismatch {
        /// The column of the existing condition.
        expected: usize,
        /// The column of the merged condition.
        got: usize,
    },

    /// Returned when an empty index set is split.
    #[error("cannot split an empty index set")]
    EmptySplit,

    /// Returned when the split point is `0` or exceeds the set size.
    #[error("split ratio {ratio} puts {split} of {len} samples in the grow set")]
    InvalidSplit {
        /// The configured split ratio.
        ratio: f64,
        /// The computed split point.
        split: usize,
        /// The size of the split set.
        len: usize,
    },

    /// Returned when the split ratio is not a finite number in `(0, 1]`.
    #[error("split ratio must be finite and in (0, 1], got {0}")]
    InvalidSplitRatio(f64),

    /// Returned when a learner needs at least one rule to predict.
    #[error("the ruleset is empty")]
    EmptyRuleset,

    /// Returned when a rule without class or polarity is asked
    /// for its prediction.
    #[error("the rule has no prediction")]
    UndefinedPrediction,

    /// Returned when a deserialized rule violates its invariants.
    #[error("corrupt rule state: {0}")]
    CorruptRule(String),

    /// Returned when a CSV source cannot be turned into a sample.
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    /// Returned when a file cannot be accessed.
    #[error("failed to access {path}")]
    Io {
        /// The path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a reader fails while a sample is parsed.
    #[error("failed to read the sample")]
    Read(#[from] std::io::Error),

    /// Returned when JSON (de)serialization fails.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}


/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, RuleError>;
