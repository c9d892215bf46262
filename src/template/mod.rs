//! Placeholder templates: `{{WRAPPER}} .title` and `color: {{VALUE}};`.

pub mod parsed;
pub mod tokenizer;

pub use parsed::{Segment, Template};
pub use tokenizer::{tokenize, Token};

/// Placeholder resolved to the instance-scoping selector.
pub const WRAPPER: &str = "WRAPPER";
/// Placeholder for a field's scalar value.
pub const VALUE: &str = "VALUE";
/// Placeholder for a field's unit.
pub const UNIT: &str = "UNIT";
