//! Inline attribute builder: `class` and `style` values for rendered markup.
//!
//! Only fields that declare a `class_template` or `style_template` take part.
//! The same resolvers as the compiler are used, but there is no selector
//! scoping and no breakpoint expansion: responsive fields contribute their
//! desktop value.

use serde_json::Value;

use crate::compiler::ResolvedSettings;
use crate::condition;
use crate::field::{FieldDefinition, FieldType};
use crate::resolve::{self, Resolved};
use crate::schema::{Category, ControlSchema, FieldEntry};
use crate::settings::{ResponsiveValue, SettingsTree};
use crate::template::{Template, VALUE};

/// Space-joined classes from fields with a class mapping.
pub fn build_css_classes(schema: &ControlSchema, settings: &SettingsTree) -> String {
    collect(schema, settings, FieldDefinition::class_template).join(" ")
}

/// `; `-joined inline declarations from fields with a style mapping.
pub fn generate_style_attribute(schema: &ControlSchema, settings: &SettingsTree) -> String {
    collect(schema, settings, FieldDefinition::style_template)
        .iter()
        .map(|decl| decl.trim_end_matches(';').trim())
        .filter(|decl| !decl.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Escape text for a double-quoted HTML attribute.
pub fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn collect(
    schema: &ControlSchema,
    settings: &SettingsTree,
    mapping: fn(&FieldDefinition) -> Option<&Template>,
) -> Vec<String> {
    if schema.category() != Category::General {
        tracing::debug!(category = schema.category().name(), "attribute mappings only apply to general fields");
        return Vec::new();
    }
    let view = ResolvedSettings::new(schema, settings);

    schema
        .fields()
        .iter()
        .filter_map(|entry| {
            let template = mapping(entry.field)?;
            if let Some(cond) = entry.field.condition() {
                if !condition::evaluate(cond, &view, &entry.group_path()) {
                    return None;
                }
            }
            let resolved = resolve_desktop(entry, settings)?;
            if !should_emit(entry.field, &resolved) {
                return None;
            }
            let text = escape_attribute(resolved.tokens.render(template).trim());
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

fn resolve_desktop(entry: &FieldEntry<'_>, settings: &SettingsTree) -> Option<Resolved> {
    let path = entry.path();
    let desktop = |value: &Value| ResponsiveValue::from_stored(value).desktop;
    let stored = settings.get(&path).and_then(desktop);
    let default = desktop(entry.field.default_value());
    match resolve::resolve(entry.field, stored.as_ref(), default.as_ref()) {
        Ok(resolved) => Some(resolved),
        Err(err) => {
            tracing::warn!(field = %path, "skipping attribute: {err}");
            None
        }
    }
}

/// Toggles map only when on; everything else when its value is non-empty.
fn should_emit(field: &FieldDefinition, resolved: &Resolved) -> bool {
    let value = resolved.tokens.get(VALUE).unwrap_or_default();
    match field.field_type() {
        FieldType::Toggle => is_truthy(value),
        _ => !value.is_empty(),
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::field::FieldBuilder;
    use crate::schema::SchemaBuilder;
    use serde_json::json;

    fn schema() -> ControlSchema {
        SchemaBuilder::new(Category::General)
            .add_group("content", "Content")
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Select, "size", "Size")
                    .with_options([("small", "Small"), ("large", "Large")])
                    .with_default("small")
                    .with_class("size-{{VALUE}}"),
            )
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Toggle, "full_width", "Full width")
                    .with_default(false)
                    .with_class("is-full-width"),
            )
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Color, "accent", "Accent")
                    .with_style("--accent: {{VALUE}}"),
            )
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Number, "max_width", "Max width")
                    .with_unit("px")
                    .with_responsive(true)
                    .with_style("max-width: {{VALUE}};"),
            )
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Text, "note", "Note")
                    .with_condition(Condition::when("full_width", true))
                    .with_class("{{VALUE}}"),
            )
            .unwrap()
            .end_group()
            .get_fields()
    }

    #[test]
    fn test_classes_from_defaults() {
        assert_eq!(build_css_classes(&schema(), &SettingsTree::new()), "size-small");
    }

    #[test]
    fn test_toggle_and_condition() {
        let tree = SettingsTree::from_value(json!({
            "content": {"size": "large", "full_width": true, "note": "boxed"}
        }));
        assert_eq!(build_css_classes(&schema(), &tree), "size-large is-full-width boxed");
    }

    #[test]
    fn test_style_attribute_uses_desktop_value() {
        let tree = SettingsTree::from_value(json!({
            "content": {"accent": "#f00", "max_width": {"desktop": 640, "mobile": 320}}
        }));
        assert_eq!(
            generate_style_attribute(&schema(), &tree),
            "--accent: #f00; max-width: 640px"
        );
    }

    #[test]
    fn test_empty_values_are_skipped() {
        assert_eq!(generate_style_attribute(&schema(), &SettingsTree::new()), "");
    }

    #[test]
    fn test_values_are_escaped() {
        let tree = SettingsTree::from_value(json!({
            "content": {"full_width": true, "note": "a\"b<c>"}
        }));
        assert_eq!(
            build_css_classes(&schema(), &tree),
            "size-small is-full-width a&quot;b&lt;c&gt;"
        );
    }

    #[test]
    fn test_style_schemas_are_ignored() {
        let schema = SchemaBuilder::new(Category::Style).get_fields();
        assert_eq!(build_css_classes(&schema, &SettingsTree::new()), "");
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy("true"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("0"));
    }
}
