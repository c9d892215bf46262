//! # widget-style
//!
//! A declarative widget settings engine: widgets declare typed control
//! schemas, instances store settings trees shaped like those schemas, and the
//! engine compiles a tree into instance-scoped CSS and inline attributes.
//!
//! Compilation is pure and synchronous. Schemas are built once per widget
//! type and shared read-only; every compile call is independent and returns
//! byte-identical output for identical input.
//!
//! ## Core Systems
//!
//! - **[`field`]**: Field types, validated field definitions, selector rules
//! - **[`schema`]**: Typestate builder for Tab → Group → Field schemas
//! - **[`settings`]**: Settings trees, key paths, responsive values
//! - **[`template`]**: `{{PLACEHOLDER}}` templates, lexed with logos
//! - **[`condition`]**: Visibility conditions over sibling or absolute fields
//! - **[`resolve`]**: Per-type value resolvers producing tokens and declarations
//! - **[`compiler`]**: Schema + settings → scoped stylesheet with media queries
//! - **[`attributes`]**: Inline `class` and `style` attribute builders
//! - **[`css`]**: Output model (rules, media blocks, comments)
//! - **[`widget`]**: Widget trait, render context, template renderers, registry
//! - **[`widgets`]**: Built-in widgets: Heading, Button, Spacer
//! - **[`editor`]**: Reading schema manifests into editor panels
//! - **[`config`]**: Compiler configuration
//! - **[`testing`]**: Snapshot helpers

// Lets `selectors!` expansions name this crate from inside it.
extern crate self as widget_style;

// Foundation
pub mod settings;
pub mod template;

// Declarations
pub mod condition;
pub mod field;
pub mod schema;

// Compilation
pub mod attributes;
pub mod compiler;
pub mod config;
pub mod css;
pub mod resolve;

// Widget system
pub mod widget;
pub mod widgets;

// Editor integration
pub mod editor;

// Testing
pub mod testing;

pub use compiler::{generate_css, CssCompiler};
pub use config::CompilerConfig;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use widget_style_macros::selectors;
