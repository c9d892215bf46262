//! Per-instance render context.

use serde_json::{json, Value};

use crate::attributes::{build_css_classes, escape_attribute, generate_style_attribute};
use crate::compiler::ResolvedSettings;
use crate::resolve::scalar_text;
use crate::schema::ControlSchema;
use crate::settings::{KeyPath, ResponsiveValue, SettingsTree, ValueSource, WidgetSettings};

/// Everything a widget needs to render one instance.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub widget_id: &'a str,
    pub settings: &'a WidgetSettings,
    pub general: &'a ControlSchema,
    pub style: &'a ControlSchema,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        widget_id: &'a str,
        settings: &'a WidgetSettings,
        general: &'a ControlSchema,
        style: &'a ControlSchema,
    ) -> Self {
        Self {
            widget_id,
            settings,
            general,
            style,
        }
    }

    /// A general setting with its default filled in. Responsive values yield
    /// their desktop entry.
    pub fn value(&self, path: &str) -> Option<Value> {
        let view = ResolvedSettings::new(self.general, &self.settings.general);
        let value = view.value_at(&KeyPath::parse(path))?;
        ResponsiveValue::from_stored(value).desktop
    }

    /// A general setting as trimmed text; empty when unset.
    pub fn text(&self, path: &str) -> String {
        self.value(path)
            .as_ref()
            .and_then(scalar_text)
            .unwrap_or_default()
    }

    /// A general setting as text, escaped for HTML.
    pub fn escaped(&self, path: &str) -> String {
        escape_attribute(&self.text(path))
    }

    /// Whether a toggle setting is on.
    pub fn flag(&self, path: &str) -> bool {
        match self.value(path) {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => matches!(s.as_str(), "yes" | "true" | "1" | "on"),
            _ => false,
        }
    }

    /// The instance's `class` attribute contributions.
    pub fn css_classes(&self) -> String {
        build_css_classes(self.general, &self.settings.general)
    }

    /// The instance's inline `style` attribute.
    pub fn style_attribute(&self) -> String {
        generate_style_attribute(self.general, &self.settings.general)
    }

    /// Every general field's effective value, shaped like the settings tree.
    pub fn resolved_general(&self) -> SettingsTree {
        let view = ResolvedSettings::new(self.general, &self.settings.general);
        let mut tree = SettingsTree::new();
        for entry in self.general.fields() {
            let path = entry.path();
            if let Some(value) = view.value_at(&path) {
                tree.set(&path, value.clone());
            }
        }
        tree
    }

    /// JSON context handed to a [`TemplateRenderer`](crate::widget::TemplateRenderer).
    pub fn template_context(&self) -> Value {
        json!({
            "id": self.widget_id,
            "classes": self.css_classes(),
            "style": self.style_attribute(),
            "settings": self.resolved_general().as_value(),
        })
    }

    /// `id`, `class` and (if non-empty) `style` attributes for the wrapper
    /// element, `base_class` first.
    pub fn wrapper_attributes(&self, base_class: &str) -> String {
        let classes = self.css_classes();
        let class = if classes.is_empty() {
            base_class.to_owned()
        } else {
            format!("{base_class} {classes}")
        };
        let mut out = format!("id=\"{}\" class=\"{class}\"", escape_attribute(self.widget_id));
        let style = self.style_attribute();
        if !style.is_empty() {
            out.push_str(&format!(" style=\"{style}\""));
        }
        out
    }
}
