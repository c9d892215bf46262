//! Editor side of the schema manifest.
//!
//! The editor renders input controls from the JSON manifest produced by
//! [`ControlSchema::to_manifest`](crate::schema::ControlSchema::to_manifest).
//! A manifest may come from a newer engine, so anything this reader does not
//! understand becomes a [`PanelItem::Warning`] in place, and reading continues
//! with the next sibling.

use std::fmt;

use serde_json::Value;

use crate::field::FieldType;
use crate::settings::KeyPath;

/// One line of an editor panel, in manifest order.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelItem {
    /// Tab header.
    Tab { key: String, label: String },
    /// Group header.
    Group { path: KeyPath, label: String },
    /// An input control.
    Control(Control),
    /// A field or node the editor cannot show.
    Warning { path: KeyPath, message: String },
}

/// An input control for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    /// Where the editor writes the value back.
    pub path: KeyPath,
    pub field_type: FieldType,
    pub label: String,
    pub default: Value,
    pub responsive: bool,
}

impl fmt::Display for PanelItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelItem::Tab { key, label } => write!(f, "[tab {key}] {label}"),
            PanelItem::Group { path, label } => write!(f, "[group {path}] {label}"),
            PanelItem::Control(c) => {
                write!(f, "  {} ({}) {}", c.path, c.field_type.name(), c.label)?;
                if c.responsive {
                    f.write_str(" [responsive]")?;
                }
                Ok(())
            }
            PanelItem::Warning { path, message } => write!(f, "  ! {path}: {message}"),
        }
    }
}

/// Walk a manifest into panel items.
pub fn read_manifest(manifest: &Value) -> Vec<PanelItem> {
    let mut items = Vec::new();
    let Some(nodes) = manifest.get("nodes").and_then(Value::as_array) else {
        warn(&mut items, KeyPath::root(), "manifest has no `nodes` list".into());
        return items;
    };

    for (index, node) in nodes.iter().enumerate() {
        let key = text(node, "key");
        match node.get("kind").and_then(Value::as_str) {
            Some("tab") => {
                items.push(PanelItem::Tab {
                    key: key.clone(),
                    label: text(node, "label"),
                });
                let tab = KeyPath::from_segments([key.as_str()]);
                for group in list(node, "groups") {
                    read_group(group, &tab, &mut items);
                }
            }
            Some("group") => read_group(node, &KeyPath::root(), &mut items),
            other => {
                let path = if key.is_empty() {
                    KeyPath::from_segments([format!("#{index}")])
                } else {
                    KeyPath::from_segments([key])
                };
                warn(&mut items, path, format!("unsupported node kind {}", describe(other)));
            }
        }
    }
    items
}

fn read_group(group: &Value, parent: &KeyPath, items: &mut Vec<PanelItem>) {
    let path = parent.child(&text(group, "key"));
    items.push(PanelItem::Group {
        path: path.clone(),
        label: text(group, "label"),
    });
    for field in list(group, "fields") {
        let field_path = path.child(&text(field, "key"));
        let type_name = field.get("type").and_then(Value::as_str);
        match type_name.and_then(FieldType::from_name) {
            Some(field_type) => items.push(PanelItem::Control(Control {
                path: field_path,
                field_type,
                label: text(field, "label"),
                default: field.get("default").cloned().unwrap_or(Value::Null),
                responsive: field.get("responsive").and_then(Value::as_bool).unwrap_or(false),
            })),
            None => warn(items, field_path, format!("unknown field type {}", describe(type_name))),
        }
    }
}

fn warn(items: &mut Vec<PanelItem>, path: KeyPath, message: String) {
    tracing::warn!(path = %path, "{message}");
    items.push(PanelItem::Warning { path, message });
}

fn text(value: &Value, key: &str) -> String {
    value.get(key).and_then(Value::as_str).unwrap_or_default().to_owned()
}

fn list<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value.get(key).and_then(Value::as_array).into_iter().flatten()
}

fn describe(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("`{name}`"),
        None => "(missing)".into(),
    }
}
