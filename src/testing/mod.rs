//! Testing helpers: compile and render widgets in one call, and flatten
//! output for snapshot-style assertions.

pub mod snapshot;

pub use snapshot::{compile_widget_css, css_lines, panel_outline, render_widget};
