//! The stored settings of one widget instance.
//!
//! A [`SettingsTree`] mirrors its schema's key paths:
//! `{ group: { field: value } }` or `{ tab: { group: { field: value } } }`.
//! It is owned by the external document store and handed to the engine by
//! value (or reference) per compile call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::settings::path::KeyPath;

/// Anything that can answer "what value is stored at this key path?".
///
/// Implemented by the raw [`SettingsTree`] and by the compiler's
/// default-aware view, so condition evaluation stays independent of where
/// values come from.
pub trait ValueSource {
    /// The value at `path`, or `None` when absent. Explicit `null` counts as absent.
    fn value_at(&self, path: &KeyPath) -> Option<&Value>;

    /// Whether `path` names a field at all. Sources without schema knowledge
    /// treat every path as a field whose value may be undefined.
    fn has_field(&self, _path: &KeyPath) -> bool {
        true
    }
}

/// Nested JSON settings for one schema category of one widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsTree {
    root: Value,
}

impl Default for SettingsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsTree {
    /// An empty tree (`{}`).
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Wrap an already-parsed JSON value.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parse a persisted JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize back to the persisted JSON shape.
    pub fn to_json(&self) -> String {
        self.root.to_string()
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Look up the value at `path`. Missing keys, non-object intermediates and
    /// explicit `null` all yield `None`.
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        let mut node = &self.root;
        for segment in path.segments() {
            node = node.as_object()?.get(segment)?;
        }
        if node.is_null() {
            None
        } else {
            Some(node)
        }
    }

    /// Store `value` at `path`, creating (or replacing non-object) intermediate nodes.
    ///
    /// Setting the root path replaces the whole tree.
    pub fn set(&mut self, path: &KeyPath, value: Value) {
        let Some((last, parents)) = path.segments().split_last() else {
            self.root = value;
            return;
        };

        let mut node = &mut self.root;
        for segment in parents {
            node = object_entry(node, segment);
        }
        ensure_object(node).insert(last.clone(), value);
    }

    /// Remove the value at `path`, returning it if present.
    pub fn remove(&mut self, path: &KeyPath) -> Option<Value> {
        let (last, parents) = path.segments().split_last()?;
        let mut node = &mut self.root;
        for segment in parents {
            node = node.as_object_mut()?.get_mut(segment)?;
        }
        node.as_object_mut()?.remove(last)
    }
}

impl ValueSource for SettingsTree {
    fn value_at(&self, path: &KeyPath) -> Option<&Value> {
        self.get(path)
    }
}

impl From<Value> for SettingsTree {
    fn from(root: Value) -> Self {
        Self::from_value(root)
    }
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}

fn object_entry<'a>(node: &'a mut Value, key: &str) -> &'a mut Value {
    let map = ensure_object(node);
    let entry = map
        .entry(key.to_owned())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    entry
}

/// Both settings categories of one widget instance, as persisted:
/// `{ "general": {...}, "style": {...} }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WidgetSettings {
    #[serde(default)]
    pub general: SettingsTree,
    #[serde(default)]
    pub style: SettingsTree,
}

impl WidgetSettings {
    /// Create from the two category trees.
    pub fn new(general: SettingsTree, style: SettingsTree) -> Self {
        Self { general, style }
    }

    /// Parse a persisted widget settings document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_nested_value() {
        let tree = SettingsTree::from_value(json!({"normal": {"colors": {"text": "#fff"}}}));
        assert_eq!(tree.get(&KeyPath::parse("normal.colors.text")), Some(&json!("#fff")));
    }

    #[test]
    fn test_get_missing_and_null() {
        let tree = SettingsTree::from_value(json!({"content": {"title": null}}));
        assert_eq!(tree.get(&KeyPath::parse("content.title")), None);
        assert_eq!(tree.get(&KeyPath::parse("content.missing")), None);
        assert_eq!(tree.get(&KeyPath::parse("content.title.deeper")), None);
    }

    #[test]
    fn test_set_creates_intermediates() {
        let mut tree = SettingsTree::new();
        tree.set(&KeyPath::parse("hover.colors.text"), json!("red"));
        assert_eq!(tree.as_value(), &json!({"hover": {"colors": {"text": "red"}}}));
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let mut tree = SettingsTree::from_value(json!({"content": 5}));
        tree.set(&KeyPath::parse("content.title"), json!("Hi"));
        assert_eq!(tree.get(&KeyPath::parse("content.title")), Some(&json!("Hi")));
    }

    #[test]
    fn test_remove() {
        let mut tree = SettingsTree::from_value(json!({"content": {"title": "Hi"}}));
        assert_eq!(tree.remove(&KeyPath::parse("content.title")), Some(json!("Hi")));
        assert_eq!(tree.get(&KeyPath::parse("content.title")), None);
        assert_eq!(tree.remove(&KeyPath::parse("nope.nothing")), None);
    }

    #[test]
    fn test_json_round_trip_keeps_shape() {
        let json = r#"{"content":{"title":"Hello"}}"#;
        let tree = SettingsTree::from_json(json).unwrap();
        assert_eq!(tree.to_json(), json);
    }

    #[test]
    fn test_widget_settings_missing_categories_default() {
        let settings = WidgetSettings::from_json(r#"{"general":{"content":{"title":"x"}}}"#).unwrap();
        assert_eq!(settings.style, SettingsTree::new());
        assert_eq!(
            settings.general.get(&KeyPath::parse("content.title")),
            Some(&json!("x"))
        );
    }
}
