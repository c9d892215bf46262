//! Compiled CSS output: rules, media blocks and stylesheets.

pub mod model;

pub use model::{CssBlock, CssRule, Declaration, StyleSheet};
