//! Built-in widgets: Heading, Button, Spacer.

pub mod button;
pub mod heading;
pub mod spacer;

pub use button::Button;
pub use heading::Heading;
pub use spacer::Spacer;

use crate::widget::{RegistryError, WidgetRegistry};

/// Register every built-in widget with manual HTML rendering.
pub fn register_builtins(registry: &mut WidgetRegistry) -> Result<(), RegistryError> {
    registry.register(Heading::new())?;
    registry.register(Button::new())?;
    registry.register(Spacer)?;
    Ok(())
}
