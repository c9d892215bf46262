//! Schema construction.
//!
//! Builders are typestates, so the nesting rule is enforced by the compiler: a
//! [`TabBuilder`] can open groups, a [`GroupBuilder`] can only register fields
//! and close itself, and nothing can open a tab inside a tab or a group.
//!
//! ```ignore
//! let schema = SchemaBuilder::new(Category::Style)
//!     .add_tab("normal", "Normal")?
//!         .add_group("colors", "Colors")?
//!             .field(FieldBuilder::field(FieldType::Color, "text", "Text"))?
//!         .end_group()
//!     .end_tab()
//!     .add_group("spacing", "Spacing")?
//!         .register_field(padding)?
//!     .end_group()
//!     .get_fields();
//! ```
//!
//! Every fallible step consumes the builder, so a failed chain leaves nothing
//! half-registered behind.

use crate::field::definition::is_valid_key;
use crate::field::{FieldBuilder, FieldDefinition, FieldError};
use crate::schema::model::{Category, ControlSchema, Group, SchemaNode, Tab};

/// Errors from schema construction. These are programmer errors in a widget's
/// declarations, not data errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("duplicate field key `{key}` in group `{scope}`")]
    DuplicateFieldKey { key: String, scope: String },
    #[error("duplicate group key `{key}` in `{scope}`")]
    DuplicateGroupKey { key: String, scope: String },
    #[error("duplicate tab key `{key}`")]
    DuplicateTabKey { key: String },
    #[error("invalid key `{key}`: keys are single non-empty segments without `.` or whitespace")]
    InvalidKey { key: String },
    #[error("`{scope}` is missing required attribute `{attribute}`")]
    MissingRequiredAttribute { attribute: &'static str, scope: String },
    #[error(transparent)]
    Field(#[from] FieldError),
}

fn check_entry(key: &str, label: &str) -> Result<(), SchemaError> {
    if !is_valid_key(key) {
        return Err(SchemaError::InvalidKey { key: key.to_owned() });
    }
    if label.is_empty() {
        return Err(SchemaError::MissingRequiredAttribute {
            attribute: "label",
            scope: key.to_owned(),
        });
    }
    Ok(())
}

/// Root scope of a schema under construction.
#[derive(Debug)]
pub struct SchemaBuilder {
    category: Category,
    nodes: Vec<SchemaNode>,
}

impl SchemaBuilder {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            nodes: Vec::new(),
        }
    }

    /// Returns `true` if a root tab or group already uses `key`.
    fn has_key(&self, key: &str) -> bool {
        self.nodes.iter().any(|node| match node {
            SchemaNode::Tab(tab) => tab.key == key,
            SchemaNode::Group(group) => group.key == key,
        })
    }

    /// Open a top-level group.
    pub fn add_group(
        self,
        key: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<GroupBuilder<SchemaBuilder>, SchemaError> {
        let (key, label) = (key.into(), label.into());
        check_entry(&key, &label)?;
        if self.has_key(&key) {
            return Err(SchemaError::DuplicateGroupKey {
                key,
                scope: "<root>".into(),
            });
        }
        Ok(GroupBuilder::new(self, key, label))
    }

    /// Open a tab.
    pub fn add_tab(
        self,
        key: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<TabBuilder, SchemaError> {
        let (key, label) = (key.into(), label.into());
        check_entry(&key, &label)?;
        if self.has_key(&key) {
            return Err(SchemaError::DuplicateTabKey { key });
        }
        Ok(TabBuilder {
            parent: self,
            tab: Tab {
                key,
                label,
                groups: Vec::new(),
            },
        })
    }

    /// Finish construction.
    pub fn get_fields(self) -> ControlSchema {
        ControlSchema::new(self.category, self.nodes)
    }
}

/// A tab under construction.
#[derive(Debug)]
pub struct TabBuilder {
    parent: SchemaBuilder,
    tab: Tab,
}

impl TabBuilder {
    /// Open a group inside this tab.
    pub fn add_group(
        self,
        key: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<GroupBuilder<TabBuilder>, SchemaError> {
        let (key, label) = (key.into(), label.into());
        check_entry(&key, &label)?;
        if self.tab.groups.iter().any(|g| g.key == key) {
            return Err(SchemaError::DuplicateGroupKey {
                key,
                scope: self.tab.key.clone(),
            });
        }
        Ok(GroupBuilder::new(self, key, label))
    }

    /// Close the tab and return to the schema root.
    pub fn end_tab(mut self) -> SchemaBuilder {
        self.parent.nodes.push(SchemaNode::Tab(self.tab));
        self.parent
    }
}

/// A scope that can hold groups: the schema root or an open tab.
pub trait GroupParent: sealed::Sealed {
    #[doc(hidden)]
    fn attach(self, group: Group) -> Self;
    #[doc(hidden)]
    fn scope_of(&self, group_key: &str) -> String;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::SchemaBuilder {}
    impl Sealed for super::TabBuilder {}
}

impl GroupParent for SchemaBuilder {
    fn attach(mut self, group: Group) -> Self {
        self.nodes.push(SchemaNode::Group(group));
        self
    }

    fn scope_of(&self, group_key: &str) -> String {
        group_key.to_owned()
    }
}

impl GroupParent for TabBuilder {
    fn attach(mut self, group: Group) -> Self {
        self.tab.groups.push(group);
        self
    }

    fn scope_of(&self, group_key: &str) -> String {
        format!("{}.{group_key}", self.tab.key)
    }
}

/// A group under construction, returning to `P` when closed.
#[derive(Debug)]
pub struct GroupBuilder<P> {
    parent: P,
    group: Group,
}

impl<P: GroupParent> GroupBuilder<P> {
    fn new(parent: P, key: String, label: String) -> Self {
        Self {
            parent,
            group: Group {
                key,
                label,
                fields: Vec::new(),
            },
        }
    }

    /// Append a built field. Fails on a key already used in this group.
    pub fn register_field(mut self, field: FieldDefinition) -> Result<Self, SchemaError> {
        if self.group.field(field.key()).is_some() {
            return Err(SchemaError::DuplicateFieldKey {
                key: field.key().to_owned(),
                scope: self.parent.scope_of(&self.group.key),
            });
        }
        self.group.fields.push(field);
        Ok(self)
    }

    /// Build `builder` and register the result.
    pub fn field(self, builder: FieldBuilder) -> Result<Self, SchemaError> {
        let field = builder.build()?;
        self.register_field(field)
    }

    /// Close the group and return to the enclosing scope.
    pub fn end_group(self) -> P {
        self.parent.attach(self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use crate::schema::SchemaNode;

    fn text(key: &str) -> FieldDefinition {
        FieldBuilder::field(FieldType::Text, key, "Label").build().unwrap()
    }

    #[test]
    fn test_root_groups_and_tabs_keep_order() {
        let schema = SchemaBuilder::new(Category::General)
            .add_group("content", "Content")
            .unwrap()
            .register_field(text("title"))
            .unwrap()
            .end_group()
            .add_tab("normal", "Normal")
            .unwrap()
            .end_tab()
            .get_fields();
        assert!(matches!(&schema.nodes()[0], SchemaNode::Group(g) if g.key == "content"));
        assert!(matches!(&schema.nodes()[1], SchemaNode::Tab(t) if t.key == "normal"));
    }

    #[test]
    fn test_duplicate_field_key_is_rejected() {
        let err = SchemaBuilder::new(Category::General)
            .add_group("content", "Content")
            .unwrap()
            .register_field(text("title"))
            .unwrap()
            .register_field(text("title"))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateFieldKey {
                key: "title".into(),
                scope: "content".into()
            }
        );
    }

    #[test]
    fn test_duplicate_field_scope_inside_tab() {
        let err = SchemaBuilder::new(Category::Style)
            .add_tab("hover", "Hover")
            .unwrap()
            .add_group("colors", "Colors")
            .unwrap()
            .register_field(text("a"))
            .unwrap()
            .register_field(text("a"))
            .unwrap_err();
        assert_eq!(err.to_string(), "duplicate field key `a` in group `hover.colors`");
    }

    #[test]
    fn test_same_field_key_in_different_groups_is_fine() {
        let schema = SchemaBuilder::new(Category::General)
            .add_group("a", "A")
            .unwrap()
            .register_field(text("title"))
            .unwrap()
            .end_group()
            .add_group("b", "B")
            .unwrap()
            .register_field(text("title"))
            .unwrap()
            .end_group()
            .get_fields();
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_duplicate_group_key() {
        let err = SchemaBuilder::new(Category::General)
            .add_group("content", "Content")
            .unwrap()
            .end_group()
            .add_group("content", "Again")
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateGroupKey { .. }));
    }

    #[test]
    fn test_duplicate_group_key_inside_tab() {
        let err = SchemaBuilder::new(Category::Style)
            .add_tab("normal", "Normal")
            .unwrap()
            .add_group("colors", "Colors")
            .unwrap()
            .end_group()
            .add_group("colors", "Colors")
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateGroupKey {
                key: "colors".into(),
                scope: "normal".into()
            }
        );
    }

    #[test]
    fn test_same_group_key_in_two_tabs_is_fine() {
        let schema = SchemaBuilder::new(Category::Style)
            .add_tab("normal", "Normal")
            .unwrap()
            .add_group("colors", "Colors")
            .unwrap()
            .end_group()
            .end_tab()
            .add_tab("hover", "Hover")
            .unwrap()
            .add_group("colors", "Colors")
            .unwrap()
            .end_group()
            .end_tab()
            .get_fields();
        assert_eq!(schema.nodes().len(), 2);
    }

    #[test]
    fn test_tab_and_group_share_root_namespace() {
        let err = SchemaBuilder::new(Category::Style)
            .add_group("normal", "Normal")
            .unwrap()
            .end_group()
            .add_tab("normal", "Normal")
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateTabKey { key: "normal".into() });
    }

    #[test]
    fn test_invalid_and_unlabeled_entries() {
        assert!(matches!(
            SchemaBuilder::new(Category::General).add_group("a.b", "A").unwrap_err(),
            SchemaError::InvalidKey { .. }
        ));
        assert!(matches!(
            SchemaBuilder::new(Category::General).add_tab("t", "").unwrap_err(),
            SchemaError::MissingRequiredAttribute { attribute: "label", .. }
        ));
    }

    #[test]
    fn test_field_builder_errors_propagate() {
        let err = SchemaBuilder::new(Category::General)
            .add_group("content", "Content")
            .unwrap()
            .field(FieldBuilder::new(FieldType::Text).with_key("title"))
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Field(FieldError::MissingRequiredAttribute { attribute: "label", .. })
        ));
    }
}
