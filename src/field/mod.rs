//! Field definitions: the typed, immutable descriptors widgets declare.

pub mod definition;
pub mod kind;
pub mod selector;

pub use definition::{ChoiceOption, FieldBuilder, FieldDefinition, FieldError};
pub use kind::{AlignmentAxis, FieldType};
pub use selector::SelectorRule;
