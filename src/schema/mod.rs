//! Control schemas: Tabs and Groups of FieldDefinitions, one per widget per category.

pub mod builder;
pub mod model;

pub use builder::{GroupBuilder, GroupParent, SchemaBuilder, SchemaError, TabBuilder};
pub use model::{Category, ControlSchema, FieldEntry, Group, SchemaNode, Tab};
