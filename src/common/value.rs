use serde::{Serialize, Deserialize};

use std::cmp::Ordering;
use std::fmt;


/// A feature value with a total order.
/// `f64` is only partially ordered,
/// so this wrapper falls back to `f64::total_cmp`
/// when the usual comparison fails (i.e., for `NaN`).
/// This makes the values usable as keys of `BTreeMap`/`BTreeSet`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureValue(pub f64);


impl FeatureValue {
    /// Returns the wrapped value.
    #[inline(always)]
    pub fn get(&self) -> f64 {
        self.0
    }
}


impl From<f64> for FeatureValue {
    #[inline(always)]
    fn from(value: f64) -> Self {
        Self(value)
    }
}


impl From<FeatureValue> for f64 {
    #[inline(always)]
    fn from(value: FeatureValue) -> Self {
        value.0
    }
}


impl PartialEq for FeatureValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}


impl Eq for FeatureValue {}


impl PartialOrd for FeatureValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}


impl Ord for FeatureValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0)
            .unwrap_or_else(|| self.0.total_cmp(&other.0))
    }
}


impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
