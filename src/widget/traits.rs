//! Widget trait and the template-renderer capability.
//!
//! A `Widget` declares its two control schemas once and renders its own
//! markup. Widgets that render through external templates hold a
//! [`TemplateRenderer`]; the rest build their HTML by hand.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::schema::{ControlSchema, SchemaError};
use crate::widget::context::RenderContext;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from rendering a widget's markup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("no template named `{0}`")]
    MissingTemplate(String),
    #[error("template `{name}` failed: {message}")]
    Template { name: String, message: String },
}

// ---------------------------------------------------------------------------
// TemplateRenderer
// ---------------------------------------------------------------------------

/// Renders named templates against a JSON context.
///
/// Injected into widgets that support template rendering. The context carries
/// `id`, `classes`, `style` and the default-filled `settings` of the instance.
pub trait TemplateRenderer: Send + Sync {
    fn render_template(&self, name: &str, context: &Value) -> Result<String, RenderError>;
}

/// Shared handle to a template renderer.
#[derive(Clone)]
pub struct SharedRenderer(pub Arc<dyn TemplateRenderer>);

impl SharedRenderer {
    pub fn new(renderer: impl TemplateRenderer + 'static) -> Self {
        Self(Arc::new(renderer))
    }

    /// Render `name` with the context of `ctx`.
    pub fn render(&self, name: &str, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        self.0.render_template(name, &ctx.template_context())
    }
}

impl fmt::Debug for SharedRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedRenderer(..)")
    }
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by every widget type.
///
/// Object-safe and thread-safe: a registry holds widgets as `Box<dyn Widget>`
/// and serves concurrent requests from them.
pub trait Widget: Send + Sync {
    /// The registry name of this widget type (e.g. `"heading"`).
    fn widget_type(&self) -> &str;

    /// Content and behavior settings. Built once, at registration.
    fn general_fields(&self) -> Result<ControlSchema, SchemaError>;

    /// Visual settings compiled into CSS. Built once, at registration.
    fn style_fields(&self) -> Result<ControlSchema, SchemaError>;

    /// Render the markup for one instance.
    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError>;
}
