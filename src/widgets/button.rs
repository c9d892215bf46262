//! Button widget: a link styled as a button, with an optional icon.

use serde_json::Value;

use crate::attributes::escape_attribute;
use crate::condition::Condition;
use crate::field::{FieldBuilder, FieldType, SelectorRule};
use crate::schema::{Category, ControlSchema, SchemaBuilder, SchemaError};
use crate::widget::{RenderContext, RenderError, SharedRenderer, Widget};

const PADDING: &str =
    "padding: {{VALUE.TOP}}{{UNIT}} {{VALUE.RIGHT}}{{UNIT}} {{VALUE.BOTTOM}}{{UNIT}} {{VALUE.LEFT}}{{UNIT}};";

/// A call-to-action button.
#[derive(Debug, Default)]
pub struct Button {
    renderer: Option<SharedRenderer>,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render through the `button` template instead of the built-in markup.
    pub fn with_renderer(mut self, renderer: SharedRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "button"
    }

    fn general_fields(&self) -> Result<ControlSchema, SchemaError> {
        Ok(SchemaBuilder::new(Category::General)
            .add_group("content", "Content")?
            .field(FieldBuilder::field(FieldType::Text, "text", "Text").with_default("Click here"))?
            .field(FieldBuilder::field(FieldType::Url, "link", "Link").with_default("#"))?
            .field(
                FieldBuilder::field(FieldType::Select, "size", "Size")
                    .with_options([("sm", "Small"), ("md", "Medium"), ("lg", "Large")])
                    .with_default("md")
                    .with_class("button-{{VALUE}}"),
            )?
            .field(
                FieldBuilder::field(FieldType::Toggle, "full_width", "Full width")
                    .with_default(false)
                    .with_class("button-block"),
            )?
            .end_group()
            .add_group("icon", "Icon")?
            .field(FieldBuilder::field(FieldType::Toggle, "show_icon", "Show icon").with_default(false))?
            .field(
                FieldBuilder::field(FieldType::Icon, "icon", "Icon")
                    .with_condition(Condition::when("show_icon", true)),
            )?
            .end_group()
            .get_fields())
    }

    fn style_fields(&self) -> Result<ControlSchema, SchemaError> {
        Ok(SchemaBuilder::new(Category::Style)
            .add_tab("normal", "Normal")?
            .add_group("colors", "Colors")?
            .field(
                FieldBuilder::field(FieldType::Color, "text_color", "Text Color")
                    .with_default("#ffffff")
                    .with_selector(SelectorRule::template("{{WRAPPER}} .button", "color: {{VALUE}};")),
            )?
            .field(
                FieldBuilder::field(FieldType::BackgroundGroup, "background", "Background")
                    .with_selector(SelectorRule::composite(["{{WRAPPER}} .button"])),
            )?
            .end_group()
            .end_tab()
            .add_tab("hover", "Hover")?
            .add_group("colors", "Colors")?
            .field(
                FieldBuilder::field(FieldType::Color, "text_color", "Text Color")
                    .with_default("#ffffff")
                    .with_selector(SelectorRule::template(
                        "{{WRAPPER}} .button:hover",
                        "color: {{VALUE}};",
                    )),
            )?
            .end_group()
            .end_tab()
            .add_group("box", "Box")?
            .field(
                FieldBuilder::field(FieldType::Dimension, "padding", "Padding")
                    .with_unit("px")
                    .with_responsive(true)
                    .with_selector(SelectorRule::template("{{WRAPPER}} .button", PADDING)),
            )?
            .field(
                FieldBuilder::field(FieldType::Number, "border_radius", "Border Radius")
                    .with_unit("px")
                    .with_min(0.0)
                    .with_default(4)
                    .with_selector(SelectorRule::template(
                        "{{WRAPPER}} .button",
                        "border-radius: {{VALUE}};",
                    )),
            )?
            .end_group()
            .get_fields())
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        if let Some(renderer) = &self.renderer {
            return renderer.render(self.widget_type(), ctx);
        }

        let icon = if ctx.flag("icon.show_icon") {
            icon_markup(ctx.value("icon.icon").as_ref())
        } else {
            String::new()
        };
        Ok(format!(
            "<div {}><a class=\"button\" href=\"{}\">{icon}<span class=\"button-text\">{}</span></a></div>",
            ctx.wrapper_attributes("widget-button"),
            ctx.escaped("content.link"),
            ctx.escaped("content.text"),
        ))
    }
}

/// `<i class="…"></i>` for an icon value `{ "library": "…", "value": "fa fa-star" }`.
fn icon_markup(icon: Option<&Value>) -> String {
    match icon.and_then(|v| v.get("value")).and_then(Value::as_str) {
        Some(class) if !class.trim().is_empty() => {
            format!("<i class=\"{}\" aria-hidden=\"true\"></i>", escape_attribute(class.trim()))
        }
        _ => String::new(),
    }
}
