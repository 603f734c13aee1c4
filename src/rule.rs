//! Struct `Rule` represents a conjunction of feature conditions,
//! and `Ruleset` represents an ordered list of rules.

// Provides the comparison operators.
pub(crate) mod operator;
// Provides the condition struct.
pub(crate) mod condition;
// Provides the rule struct.
pub(crate) mod rule_struct;
// Provides the ruleset struct.
pub(crate) mod ruleset;


pub use operator::Operator;
pub use condition::{Condition, Test};
pub use rule_struct::{Rule, Prediction};
pub use ruleset::Ruleset;
