//! Snapshot helpers.
//!
//! Functions that run a widget end to end (schemas, compile, render) and turn
//! the result into plain text suitable for `insta` snapshots and assertions.

use crate::compiler::CssCompiler;
use crate::editor::read_manifest;
use crate::schema::ControlSchema;
use crate::settings::WidgetSettings;
use crate::widget::{RenderContext, Widget};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compile a widget's general and style CSS with the default config.
///
/// # Panics
///
/// Panics if the widget's schemas fail to build; widget declarations are
/// fixed at compile time, so a failure is a bug in the test subject.
///
/// # Examples
///
/// ```ignore
/// use widget_style::testing::compile_widget_css;
/// use widget_style::widgets::Spacer;
///
/// let css = compile_widget_css(&Spacer, "s-1", &WidgetSettings::default(), None);
/// assert!(css.contains("height: 50px"));
/// ```
pub fn compile_widget_css(
    widget: &dyn Widget,
    widget_id: &str,
    settings: &WidgetSettings,
    section_id: Option<&str>,
) -> String {
    let (general, style) = schemas(widget);
    let compiler = CssCompiler::default();
    let mut sheet = compiler.compile(widget_id, &general, &settings.general, section_id);
    sheet.extend(compiler.compile(widget_id, &style, &settings.style, section_id));
    sheet.to_string()
}

/// Render a widget's markup.
///
/// # Panics
///
/// Panics if the schemas fail to build or rendering fails.
pub fn render_widget(widget: &dyn Widget, widget_id: &str, settings: &WidgetSettings) -> String {
    let (general, style) = schemas(widget);
    let ctx = RenderContext::new(widget_id, settings, &general, &style);
    match widget.render(&ctx) {
        Ok(html) => html,
        Err(err) => panic!("{} failed to render: {err}", widget.widget_type()),
    }
}

/// Split CSS text into trimmed, non-empty lines.
pub fn css_lines(css: &str) -> Vec<&str> {
    css.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// The editor panel outline of a schema, one item per line.
pub fn panel_outline(schema: &ControlSchema) -> String {
    read_manifest(&schema.to_manifest())
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn schemas(widget: &dyn Widget) -> (ControlSchema, ControlSchema) {
    let general = widget.general_fields();
    let style = widget.style_fields();
    match (general, style) {
        (Ok(general), Ok(style)) => (general, style),
        (Err(err), _) | (_, Err(err)) => {
            panic!("{} declares an invalid schema: {err}", widget.widget_type())
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
