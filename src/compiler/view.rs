//! Default-aware view of a settings tree.

use serde_json::Value;

use crate::field::FieldDefinition;
use crate::resolve::scalar_text;
use crate::schema::ControlSchema;
use crate::settings::{KeyPath, ResponsiveValue, SettingsTree, ValueSource};

/// Stored values with the schema's defaults filled in.
///
/// Conditions are evaluated against this view, so leaving a setting unset
/// behaves exactly like storing its default.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSettings<'a> {
    schema: &'a ControlSchema,
    settings: &'a SettingsTree,
}

impl<'a> ResolvedSettings<'a> {
    pub fn new(schema: &'a ControlSchema, settings: &'a SettingsTree) -> Self {
        Self { schema, settings }
    }
}

impl ValueSource for ResolvedSettings<'_> {
    fn value_at(&self, path: &KeyPath) -> Option<&Value> {
        let field = self.schema.field(path);
        let default = || {
            field
                .map(|field| field.default_value())
                .filter(|v| !v.is_null())
        };
        match (self.settings.get(path), field) {
            // A stored value the resolver would reject reads as the default,
            // so gating agrees with the emitted CSS.
            (Some(value), Some(field)) if !usable(field, value) => default(),
            (Some(value), _) => Some(value),
            (None, _) => default(),
        }
    }

    fn has_field(&self, path: &KeyPath) -> bool {
        self.schema.field(path).is_some()
    }
}

/// A stored value with a desktop entry the field's type and options accept.
fn usable(field: &FieldDefinition, value: &Value) -> bool {
    let desktop = if ResponsiveValue::is_responsive_map(value) {
        value.get("desktop")
    } else {
        Some(value)
    };
    match desktop.filter(|v| !v.is_null()) {
        Some(desktop) if field.field_type().accepts(desktop) => match scalar_text(desktop) {
            Some(text) => text.is_empty() || field.allows_choice(&text),
            None => true,
        },
        _ => false,
    }
}
