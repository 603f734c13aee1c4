use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::RuleError;


/// The test that a [`Condition`](crate::Condition) performs on a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `x <= v`
    #[serde(rename = "<=")]
    Le,
    /// `x >= v`
    #[serde(rename = ">=")]
    Ge,
    /// `lower <= x <= upper`
    #[serde(rename = "range")]
    Range,
    /// `x` is one of the listed values.
    #[serde(rename = "in")]
    In,
}


impl Operator {
    /// Returns the textual form of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Range => "range",
            Self::In => "in",
        }
    }
}


impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}


impl FromStr for Operator {
    type Err = RuleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<=" => Ok(Self::Le),
            ">=" => Ok(Self::Ge),
            "range" => Ok(Self::Range),
            "in" => Ok(Self::In),
            _ => Err(RuleError::UnknownOperator(s.to_string())),
        }
    }
}
