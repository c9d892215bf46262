//! Visibility conditions: pure predicates over a settings tree.

pub mod evaluator;
pub mod model;

pub use evaluator::evaluate;
pub use model::{Clause, Condition, ConditionError, Operator};
