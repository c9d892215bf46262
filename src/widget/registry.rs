//! Widget registry: one explicit, constructor-built catalog of widget types.
//!
//! Each widget's schemas are built once, at registration, and shared as
//! `Arc<ControlSchema>`. The registry is immutable after setup and can be
//! shared across threads behind an `Arc`.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::compiler::CssCompiler;
use crate::config::CompilerConfig;
use crate::schema::{ControlSchema, SchemaError};
use crate::settings::WidgetSettings;
use crate::widget::context::RenderContext;
use crate::widget::traits::{RenderError, Widget};

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown widget type `{0}`")]
    UnknownWidget(String),
    #[error("widget type `{0}` is already registered")]
    DuplicateWidget(String),
    #[error("widget `{widget}` declares an invalid schema: {source}")]
    Schema {
        widget: String,
        #[source]
        source: SchemaError,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

struct Registered {
    widget: Box<dyn Widget>,
    general: Arc<ControlSchema>,
    style: Arc<ControlSchema>,
}

/// Catalog of widget types and the compiler used for their CSS.
pub struct WidgetRegistry {
    compiler: CssCompiler,
    widgets: BTreeMap<String, Registered>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRegistry {
    /// An empty registry with the default compiler configuration.
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::default())
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self {
            compiler: CssCompiler::new(config),
            widgets: BTreeMap::new(),
        }
    }

    /// A registry holding the built-in widgets.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        crate::widgets::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Register a widget type, building both of its schemas.
    pub fn register(&mut self, widget: impl Widget + 'static) -> Result<(), RegistryError> {
        let name = widget.widget_type().to_owned();
        if self.widgets.contains_key(&name) {
            return Err(RegistryError::DuplicateWidget(name));
        }
        let schema_err = |source| RegistryError::Schema {
            widget: name.clone(),
            source,
        };
        let general = widget.general_fields().map_err(schema_err)?;
        let style = widget.style_fields().map_err(schema_err)?;
        tracing::debug!(
            widget = %name,
            general = general.len(),
            style = style.len(),
            "registered widget"
        );
        self.widgets.insert(
            name,
            Registered {
                widget: Box::new(widget),
                general: Arc::new(general),
                style: Arc::new(style),
            },
        );
        Ok(())
    }

    pub fn contains(&self, widget_type: &str) -> bool {
        self.widgets.contains_key(widget_type)
    }

    /// Registered type names, sorted.
    pub fn widget_types(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    fn get(&self, widget_type: &str) -> Result<&Registered, RegistryError> {
        self.widgets
            .get(widget_type)
            .ok_or_else(|| RegistryError::UnknownWidget(widget_type.to_owned()))
    }

    /// The general-category schema of a widget type.
    pub fn general_fields(&self, widget_type: &str) -> Result<Arc<ControlSchema>, RegistryError> {
        self.get(widget_type).map(|r| Arc::clone(&r.general))
    }

    /// The style-category schema of a widget type.
    pub fn style_fields(&self, widget_type: &str) -> Result<Arc<ControlSchema>, RegistryError> {
        self.get(widget_type).map(|r| Arc::clone(&r.style))
    }

    /// Compile the CSS for one instance: general-category rules first, then
    /// style-category rules.
    pub fn generate_css(
        &self,
        widget_type: &str,
        widget_id: &str,
        settings: &WidgetSettings,
        section_id: Option<&str>,
    ) -> Result<String, RegistryError> {
        let registered = self.get(widget_type)?;
        let mut sheet =
            self.compiler
                .compile(widget_id, &registered.general, &settings.general, section_id);
        sheet.extend(
            self.compiler
                .compile(widget_id, &registered.style, &settings.style, section_id),
        );
        Ok(sheet.to_string())
    }

    /// Render the markup for one instance.
    pub fn render(
        &self,
        widget_type: &str,
        widget_id: &str,
        settings: &WidgetSettings,
    ) -> Result<String, RegistryError> {
        let registered = self.get(widget_type)?;
        let ctx = RenderContext::new(widget_id, settings, &registered.general, &registered.style);
        Ok(registered.widget.render(&ctx)?)
    }
}
