//! Settings trees: stored values for one widget instance, key paths, responsive values.

pub mod path;
pub mod responsive;
pub mod tree;

pub use path::KeyPath;
pub use responsive::{Breakpoint, ResponsiveValue};
pub use tree::{SettingsTree, ValueSource, WidgetSettings};
