//! Widget layer: the `Widget` trait, render context, template renderers, registry.

pub mod context;
pub mod registry;
pub mod traits;

pub use context::RenderContext;
pub use registry::{RegistryError, WidgetRegistry};
pub use traits::{RenderError, SharedRenderer, TemplateRenderer, Widget};
