//! The CSS compiler: schema + settings → scoped stylesheet.
//!
//! Compilation is a single depth-first pass over the schema. For each field
//! the compiler:
//!
//! 1. skips it when it has no selector rules or its condition is unmet,
//! 2. resolves the stored value (falling back to the default) per breakpoint,
//! 3. emits the desktop rules unscoped, then one `@media (max-width)` block
//!    each for tablet and mobile overrides.
//!
//! Output order is declaration order, so a later field wins over an earlier
//! one on equal specificity. Nothing is cached or deduplicated: identical
//! inputs always give byte-identical output.
//!
//! Failures are local to a field. A field whose value cannot be resolved is
//! logged and skipped; the rest of the schema still compiles.

pub mod view;

use serde_json::Value;

use crate::condition;
use crate::config::CompilerConfig;
use crate::css::model::{join_declarations, CssBlock, CssRule, StyleSheet};
use crate::field::{FieldDefinition, SelectorRule};
use crate::resolve::{self, ResolveError, Resolved};
use crate::schema::{ControlSchema, FieldEntry};
use crate::settings::{Breakpoint, KeyPath, ResponsiveValue, SettingsTree};
use crate::template::{Template, WRAPPER};

pub use view::ResolvedSettings;

/// Compile `settings` against `schema` with the default configuration.
pub fn generate_css(
    widget_id: &str,
    schema: &ControlSchema,
    settings: &SettingsTree,
    section_id: Option<&str>,
) -> String {
    CssCompiler::default().generate_css(widget_id, schema, settings, section_id)
}

/// The selector that scopes one widget instance: `#id` or `#section #id`.
pub fn wrapper_selector(widget_id: &str, section_id: Option<&str>) -> String {
    match section_id.filter(|s| !s.is_empty()) {
        Some(section) => format!("#{section} #{widget_id}"),
        None => format!("#{widget_id}"),
    }
}

/// Append `:hover` to every top-level comma-separated part of `selector`.
///
/// Commas inside `(...)` or `[...]`, as in `:is(.a, .b)`, do not split.
pub fn hover_selector(selector: &str) -> String {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in selector.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&selector[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&selector[start..]);
    parts
        .iter()
        .map(|part| format!("{}:hover", part.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compiles settings trees into stylesheets.
#[derive(Debug, Clone, Default)]
pub struct CssCompiler {
    config: CompilerConfig,
}

impl CssCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile to CSS text.
    pub fn generate_css(
        &self,
        widget_id: &str,
        schema: &ControlSchema,
        settings: &SettingsTree,
        section_id: Option<&str>,
    ) -> String {
        self.compile(widget_id, schema, settings, section_id).to_string()
    }

    /// Compile to a [`StyleSheet`].
    pub fn compile(
        &self,
        widget_id: &str,
        schema: &ControlSchema,
        settings: &SettingsTree,
        section_id: Option<&str>,
    ) -> StyleSheet {
        let wrapper = wrapper_selector(widget_id, section_id);
        let view = ResolvedSettings::new(schema, settings);
        let mut sheet = StyleSheet::new();

        for entry in schema.fields() {
            let field = entry.field;
            if field.selectors().is_empty() {
                continue;
            }
            if let Some(cond) = field.condition() {
                if !condition::evaluate(cond, &view, &entry.group_path()) {
                    tracing::debug!(field = %entry.path(), "condition unmet, field skipped");
                    continue;
                }
            }
            self.compile_field(&entry, settings, &wrapper, &mut sheet);
        }

        sheet
    }

    fn compile_field(
        &self,
        entry: &FieldEntry<'_>,
        settings: &SettingsTree,
        wrapper: &str,
        sheet: &mut StyleSheet,
    ) {
        let field = entry.field;
        let path = entry.path();
        let mut blocks = Vec::new();

        for (breakpoint, result) in resolve_breakpoints(field, settings.get(&path)) {
            let resolved = match result {
                Ok(resolved) => resolved,
                Err(err @ ResolveError::Missing { .. }) => {
                    tracing::debug!(field = %path, breakpoint = breakpoint.key(), "{err}");
                    continue;
                }
                Err(err) => {
                    tracing::warn!(field = %path, breakpoint = breakpoint.key(), "skipping field: {err}");
                    continue;
                }
            };

            let rules = emit_rules(field, &resolved, wrapper);
            for rule in &rules {
                tracing::trace!(field = %path, breakpoint = breakpoint.key(), rule = %rule, "emit");
            }
            match self.config.breakpoints.max_width(breakpoint) {
                None => blocks.extend(rules.into_iter().map(CssBlock::Rule)),
                Some(_) if rules.is_empty() => {}
                Some(max_width) => blocks.push(CssBlock::Media { max_width, rules }),
            }
        }

        if blocks.is_empty() {
            return;
        }
        if self.config.emit_comments {
            sheet.push(CssBlock::Comment(path.to_string()));
        }
        sheet.blocks.extend(blocks);
    }
}

/// Resolve the value of `field` for each breakpoint it emits at.
///
/// Non-responsive fields only emit at desktop, using the desktop entry if a
/// responsive map was stored anyway. For responsive fields the stored map (or
/// the default, when nothing is stored) decides which overrides exist.
fn resolve_breakpoints(
    field: &FieldDefinition,
    stored: Option<&Value>,
) -> Vec<(Breakpoint, Result<Resolved, ResolveError>)> {
    let default = ResponsiveValue::from_stored(field.default_value());
    let stored = stored.map(ResponsiveValue::from_stored);

    if !field.is_responsive() {
        let value = stored.as_ref().and_then(|s| s.desktop.as_ref());
        return vec![(
            Breakpoint::Desktop,
            resolve::resolve(field, value, default.desktop.as_ref()),
        )];
    }

    let source = stored.as_ref().unwrap_or(&default);
    Breakpoint::ALL
        .into_iter()
        .filter(|bp| *bp == Breakpoint::Desktop || source.get(*bp).is_some())
        .map(|bp| {
            let value = stored.as_ref().and_then(|s| s.get(bp));
            (bp, resolve::resolve(field, value, default.get(bp)))
        })
        .collect()
}

/// Rules for one resolved value, in selector-rule order.
fn emit_rules(field: &FieldDefinition, resolved: &Resolved, wrapper: &str) -> Vec<CssRule> {
    let mut rules = Vec::new();
    for rule in field.selectors() {
        match rule {
            SelectorRule::Template { selector, template } => {
                rules.push(CssRule::new(
                    scope(selector, wrapper),
                    resolved.tokens.render(template),
                ));
            }
            SelectorRule::Composite { selectors } => {
                if !resolved.declarations.is_empty() {
                    let body = join_declarations(&resolved.declarations);
                    rules.extend(
                        selectors
                            .iter()
                            .map(|s| CssRule::new(scope(s, wrapper), body.clone())),
                    );
                }
                if !resolved.hover_declarations.is_empty() {
                    let body = join_declarations(&resolved.hover_declarations);
                    rules.extend(selectors.iter().map(|s| {
                        CssRule::new(hover_selector(&scope(s, wrapper)), body.clone())
                    }));
                }
            }
        }
    }
    rules
}

fn scope(selector: &Template, wrapper: &str) -> String {
    selector.render(|name| (name == WRAPPER).then_some(wrapper.into()))
}

/// Full key path of a field inside `schema`, if declared.
pub fn field_path(schema: &ControlSchema, key: &str) -> Option<KeyPath> {
    schema
        .fields()
        .iter()
        .find(|e| e.field.key() == key)
        .map(FieldEntry::path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::field::{FieldBuilder, FieldType};
    use crate::schema::{Category, SchemaBuilder};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn color_schema() -> ControlSchema {
        SchemaBuilder::new(Category::Style)
            .add_group("colors", "Colors")
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Color, "text", "Text")
                    .with_default("#333")
                    .with_selector(SelectorRule::template("{{WRAPPER}} .title", "color: {{VALUE}};")),
            )
            .unwrap()
            .end_group()
            .get_fields()
    }

    #[test]
    fn test_wrapper_selector() {
        assert_eq!(wrapper_selector("widget-42", None), "#widget-42");
        assert_eq!(wrapper_selector("widget-42", Some("sec-7")), "#sec-7 #widget-42");
        assert_eq!(wrapper_selector("widget-42", Some("")), "#widget-42");
    }

    #[test]
    fn test_hover_selector_handles_lists() {
        assert_eq!(hover_selector("#w .a, #w .b"), "#w .a:hover, #w .b:hover");
    }

    #[test]
    fn test_hover_selector_keeps_nested_lists_whole() {
        assert_eq!(hover_selector("#w :is(.a, .b)"), "#w :is(.a, .b):hover");
        assert_eq!(
            hover_selector("#w [data-x=\"a,b\"], #w .c"),
            "#w [data-x=\"a,b\"]:hover, #w .c:hover"
        );
    }

    #[test]
    fn test_empty_value_still_emits() {
        let tree = SettingsTree::from_value(json!({"colors": {"text": ""}}));
        let css = generate_css("w", &color_schema(), &tree, None);
        assert_eq!(css, "#w .title { color: ; }\n");
    }

    #[test]
    fn test_empty_alignment_still_emits() {
        let schema = SchemaBuilder::new(Category::Style)
            .add_group("content", "Content")
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Alignment, "align", "Align")
                    .with_default("left")
                    .with_selector(SelectorRule::template("{{WRAPPER}}", "text-align: {{VALUE}};")),
            )
            .unwrap()
            .end_group()
            .get_fields();
        let tree = SettingsTree::from_value(json!({"content": {"align": ""}}));
        assert_eq!(generate_css("w", &schema, &tree, None), "#w { text-align: ; }\n");
    }

    #[test]
    fn test_responsive_field_without_selectors_is_a_no_op() {
        let schema = SchemaBuilder::new(Category::Style)
            .add_group("layout", "Layout")
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Number, "gap", "Gap")
                    .with_unit("px")
                    .with_responsive(true),
            )
            .unwrap()
            .end_group()
            .get_fields();
        let tree = SettingsTree::from_value(json!({
            "layout": {"gap": {"desktop": 20, "mobile": 8}}
        }));
        assert_eq!(generate_css("w", &schema, &tree, None), "");
    }

    #[test]
    fn test_rejected_choice_gates_like_its_default() {
        let schema = SchemaBuilder::new(Category::Style)
            .add_group("layout", "Layout")
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Select, "mode", "Mode")
                    .with_options([("boxed", "Boxed"), ("full", "Full")])
                    .with_default("boxed")
                    .with_selector(SelectorRule::template("{{WRAPPER}}", "--mode: {{VALUE}};")),
            )
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Color, "frame", "Frame")
                    .with_default("#ccc")
                    .with_condition(Condition::when("mode", "boxed"))
                    .with_selector(SelectorRule::template("{{WRAPPER}} .frame", "color: {{VALUE}};")),
            )
            .unwrap()
            .end_group()
            .get_fields();
        let expected = "#w { --mode: boxed; }\n#w .frame { color: #ccc; }\n";
        assert_eq!(generate_css("w", &schema, &SettingsTree::new(), None), expected);

        let stale = SettingsTree::from_value(json!({"layout": {"mode": "legacy_boxed"}}));
        assert_eq!(generate_css("w", &schema, &stale, None), expected);
    }

    #[test]
    fn test_default_is_used_when_unset() {
        let css = generate_css("w", &color_schema(), &SettingsTree::new(), None);
        assert_eq!(css, "#w .title { color: #333; }\n");
    }

    #[test]
    fn test_stored_value_and_section_scope() {
        let tree = SettingsTree::from_value(json!({"colors": {"text": "#fff"}}));
        let css = generate_css("w", &color_schema(), &tree, Some("s"));
        assert_eq!(css, "#s #w .title { color: #fff; }\n");
    }

    #[test]
    fn test_comments_are_optional() {
        let compiler = CssCompiler::new(CompilerConfig::new().with_comments(true));
        let css = compiler.generate_css("w", &color_schema(), &SettingsTree::new(), None);
        assert_eq!(css, "/* colors.text */\n#w .title { color: #333; }\n");
    }

    #[test]
    fn test_field_without_selectors_contributes_nothing() {
        let schema = SchemaBuilder::new(Category::Style)
            .add_group("g", "G")
            .unwrap()
            .field(FieldBuilder::field(FieldType::Color, "c", "C").with_default("red"))
            .unwrap()
            .end_group()
            .get_fields();
        assert!(CssCompiler::default()
            .compile("w", &schema, &SettingsTree::new(), None)
            .is_empty());
    }

    #[test]
    fn test_responsive_number_emits_media_blocks() {
        let schema = SchemaBuilder::new(Category::Style)
            .add_group("layout", "Layout")
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Number, "gap", "Gap")
                    .with_unit("px")
                    .with_responsive(true)
                    .with_selector(SelectorRule::template("{{WRAPPER}}", "gap: {{VALUE}};")),
            )
            .unwrap()
            .end_group()
            .get_fields();
        let tree = SettingsTree::from_value(json!({
            "layout": {"gap": {"desktop": 20, "tablet": 12, "mobile": 8}}
        }));
        let css = generate_css("w", &schema, &tree, None);
        assert_eq!(
            css,
            "#w { gap: 20px; }\n\
             @media (max-width: 1023px) { #w { gap: 12px; } }\n\
             @media (max-width: 767px) { #w { gap: 8px; } }\n"
        );
    }

    #[test]
    fn test_custom_breakpoints() {
        let schema = SchemaBuilder::new(Category::Style)
            .add_group("layout", "Layout")
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Number, "gap", "Gap")
                    .with_responsive(true)
                    .with_selector(SelectorRule::template("{{WRAPPER}}", "order: {{VALUE}};")),
            )
            .unwrap()
            .end_group()
            .get_fields();
        let tree = SettingsTree::from_value(json!({"layout": {"gap": {"desktop": 1, "mobile": 2}}}));
        let compiler = CssCompiler::new(CompilerConfig::new().with_breakpoints(900, 480));
        assert_eq!(
            compiler.generate_css("w", &schema, &tree, None),
            "#w { order: 1; }\n@media (max-width: 480px) { #w { order: 2; } }\n"
        );
    }

    #[test]
    fn test_non_responsive_field_uses_desktop_entry() {
        let tree = SettingsTree::from_value(json!({"colors": {"text": {"desktop": "#111", "mobile": "#222"}}}));
        let css = generate_css("w", &color_schema(), &tree, None);
        assert_eq!(css, "#w .title { color: #111; }\n");
    }

    #[test]
    fn test_condition_gates_field() {
        let schema = SchemaBuilder::new(Category::Style)
            .add_group("icon", "Icon")
            .unwrap()
            .field(FieldBuilder::field(FieldType::Toggle, "show_icon", "Show").with_default(false))
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Color, "icon_color", "Color")
                    .with_default("red")
                    .with_condition(Condition::when("show_icon", true))
                    .with_selector(SelectorRule::template("{{WRAPPER}} i", "color: {{VALUE}};")),
            )
            .unwrap()
            .end_group()
            .get_fields();
        assert_eq!(generate_css("w", &schema, &SettingsTree::new(), None), "");
        let on = SettingsTree::from_value(json!({"icon": {"show_icon": true}}));
        assert_eq!(generate_css("w", &schema, &on, None), "#w i { color: red; }\n");
    }

    #[test]
    fn test_malformed_field_does_not_abort_siblings() {
        let schema = SchemaBuilder::new(Category::Style)
            .add_group("g", "G")
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Dimension, "padding", "Padding")
                    .with_selector(SelectorRule::template("{{WRAPPER}}", "padding-top: {{VALUE.TOP}};")),
            )
            .unwrap()
            .field(
                FieldBuilder::field(FieldType::Color, "color", "Color")
                    .with_selector(SelectorRule::template("{{WRAPPER}}", "color: {{VALUE}};")),
            )
            .unwrap()
            .end_group()
            .get_fields();
        let tree = SettingsTree::from_value(json!({"g": {"padding": "oops", "color": "blue"}}));
        assert_eq!(generate_css("w", &schema, &tree, None), "#w { color: blue; }\n");
    }

    #[test]
    fn test_field_path_lookup() {
        let schema = color_schema();
        assert_eq!(field_path(&schema, "text").map(|p| p.to_string()), Some("colors.text".into()));
        assert_eq!(field_path(&schema, "nope"), None);
    }
}
