//! Schema tree: ControlSchema → (Tab →) Group → FieldDefinition.

use serde::Serialize;
use serde_json::Value;

use crate::field::FieldDefinition;
use crate::settings::KeyPath;

/// The settings category a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Content and behaviour settings.
    General,
    /// Visual settings.
    Style,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Style => "style",
        }
    }
}

/// A named, ordered set of fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: String,
    pub label: String,
    pub fields: Vec<FieldDefinition>,
}

impl Group {
    /// Look up a field by key.
    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key() == key)
    }
}

/// A named, ordered set of groups, e.g. "Normal" and "Hover" states.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub key: String,
    pub label: String,
    pub groups: Vec<Group>,
}

/// A top-level schema entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaNode {
    Tab(Tab),
    Group(Group),
}

/// One field together with where it lives in the schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldEntry<'a> {
    /// The enclosing tab, if any.
    pub tab: Option<&'a Tab>,
    pub group: &'a Group,
    pub field: &'a FieldDefinition,
}

impl FieldEntry<'_> {
    /// Key path of the enclosing group (`tab.group` or `group`).
    pub fn group_path(&self) -> KeyPath {
        match self.tab {
            Some(tab) => KeyPath::from_segments([tab.key.as_str(), self.group.key.as_str()]),
            None => KeyPath::from_segments([self.group.key.as_str()]),
        }
    }

    /// Full key path of the field.
    pub fn path(&self) -> KeyPath {
        self.group_path().child(self.field.key())
    }
}

/// The finished, immutable schema of one widget for one category.
///
/// Built once per widget type and shared read-only by every instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSchema {
    category: Category,
    nodes: Vec<SchemaNode>,
}

impl ControlSchema {
    pub(crate) fn new(category: Category, nodes: Vec<SchemaNode>) -> Self {
        Self { category, nodes }
    }

    /// An empty schema (widgets without settings in a category).
    pub fn empty(category: Category) -> Self {
        Self::new(category, Vec::new())
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Top-level tabs and groups in declaration order.
    pub fn nodes(&self) -> &[SchemaNode] {
        &self.nodes
    }

    /// Every field, depth-first in declaration order.
    pub fn fields(&self) -> Vec<FieldEntry<'_>> {
        let mut out = Vec::new();
        for node in &self.nodes {
            match node {
                SchemaNode::Tab(tab) => {
                    for group in &tab.groups {
                        out.extend(group.fields.iter().map(|field| FieldEntry {
                            tab: Some(tab),
                            group,
                            field,
                        }));
                    }
                }
                SchemaNode::Group(group) => {
                    out.extend(group.fields.iter().map(|field| FieldEntry {
                        tab: None,
                        group,
                        field,
                    }));
                }
            }
        }
        out
    }

    /// Look up a field by its full key path.
    pub fn field(&self, path: &KeyPath) -> Option<&FieldDefinition> {
        let segments = path.segments();
        let (group_path, field_key) = match segments.split_last() {
            Some((last, rest)) => (rest, last.as_str()),
            None => return None,
        };
        self.nodes.iter().find_map(|node| match (node, group_path) {
            (SchemaNode::Tab(tab), [tab_key, group_key]) if &tab.key == tab_key => tab
                .groups
                .iter()
                .find(|g| &g.key == group_key)
                .and_then(|g| g.field(field_key)),
            (SchemaNode::Group(group), [group_key]) if &group.key == group_key => {
                group.field(field_key)
            }
            _ => None,
        })
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The JSON manifest the editor renders controls from.
    pub fn to_manifest(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldBuilder, FieldType};
    use crate::schema::SchemaBuilder;
    use serde_json::json;

    fn schema() -> ControlSchema {
        SchemaBuilder::new(Category::Style)
            .add_tab("normal", "Normal")
            .unwrap()
            .add_group("colors", "Colors")
            .unwrap()
            .field(FieldBuilder::field(FieldType::Color, "text", "Text"))
            .unwrap()
            .end_group()
            .end_tab()
            .add_group("spacing", "Spacing")
            .unwrap()
            .field(FieldBuilder::field(FieldType::Dimension, "padding", "Padding"))
            .unwrap()
            .end_group()
            .get_fields()
    }

    #[test]
    fn test_fields_in_declaration_order_with_paths() {
        let schema = schema();
        let paths: Vec<String> = schema.fields().iter().map(|e| e.path().to_string()).collect();
        assert_eq!(paths, vec!["normal.colors.text", "spacing.padding"]);
    }

    #[test]
    fn test_field_lookup() {
        let schema = schema();
        assert_eq!(
            schema.field(&KeyPath::parse("normal.colors.text")).map(|f| f.key()),
            Some("text")
        );
        assert!(schema.field(&KeyPath::parse("spacing.padding")).is_some());
        assert!(schema.field(&KeyPath::parse("colors.text")).is_none());
        assert!(schema.field(&KeyPath::parse("normal.colors.text.x")).is_none());
        assert!(schema.field(&KeyPath::root()).is_none());
    }

    #[test]
    fn test_manifest_shape() {
        let manifest = schema().to_manifest();
        assert_eq!(manifest["category"], json!("style"));
        assert_eq!(manifest["nodes"][0]["kind"], json!("tab"));
        assert_eq!(manifest["nodes"][0]["groups"][0]["fields"][0]["type"], json!("color"));
        assert_eq!(manifest["nodes"][1]["kind"], json!("group"));
    }

    #[test]
    fn test_len() {
        assert_eq!(schema().len(), 2);
        assert!(ControlSchema::empty(Category::General).is_empty());
    }
}
