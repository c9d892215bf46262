//! Heading widget: a title in a configurable heading tag.
//!
//! # Examples
//!
//! ```ignore
//! let heading = Heading::new();
//! let templated = Heading::new().with_renderer(SharedRenderer::new(my_renderer));
//! ```

use crate::condition::{Condition, Operator};
use crate::field::{AlignmentAxis, FieldBuilder, FieldType, SelectorRule};
use crate::schema::{Category, ControlSchema, SchemaBuilder, SchemaError};
use crate::widget::{RenderContext, RenderError, SharedRenderer, Widget};

const TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// A heading with optional link.
#[derive(Debug, Default)]
pub struct Heading {
    renderer: Option<SharedRenderer>,
}

impl Heading {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render through the `heading` template instead of the built-in markup.
    pub fn with_renderer(mut self, renderer: SharedRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }
}

impl Widget for Heading {
    fn widget_type(&self) -> &str {
        "heading"
    }

    fn general_fields(&self) -> Result<ControlSchema, SchemaError> {
        Ok(SchemaBuilder::new(Category::General)
            .add_group("content", "Content")?
            .field(FieldBuilder::field(FieldType::Text, "title", "Title").with_default("Add your heading"))?
            .field(FieldBuilder::field(FieldType::Url, "link", "Link"))?
            .field(
                FieldBuilder::field(FieldType::Select, "tag", "HTML Tag")
                    .with_options(TAGS.map(|t| (t, t.to_uppercase())))
                    .with_default("h2"),
            )?
            .field(
                FieldBuilder::field(FieldType::Select, "size", "Size")
                    .with_options([("default", "Default"), ("small", "Small"), ("large", "Large")])
                    .with_default("default")
                    .with_class("heading-size-{{VALUE}}"),
            )?
            .field(
                FieldBuilder::field(FieldType::Alignment, "align", "Alignment")
                    .with_default("left")
                    .with_responsive(true)
                    .with_selector(SelectorRule::template("{{WRAPPER}}", "text-align: {{VALUE}};")),
            )?
            .end_group()
            .get_fields())
    }

    fn style_fields(&self) -> Result<ControlSchema, SchemaError> {
        Ok(SchemaBuilder::new(Category::Style)
            .add_tab("normal", "Normal")?
            .add_group("title", "Title")?
            .field(
                FieldBuilder::field(FieldType::Color, "color", "Text Color")
                    .with_default("#333333")
                    .with_selector(SelectorRule::template(
                        "{{WRAPPER}} .heading-title",
                        "color: {{VALUE}};",
                    )),
            )?
            .field(
                FieldBuilder::field(FieldType::TypographyGroup, "typography", "Typography")
                    .with_selector(SelectorRule::composite(["{{WRAPPER}} .heading-title"])),
            )?
            .end_group()
            .end_tab()
            .add_tab("hover", "Hover")?
            .add_group("title", "Title")?
            .field(
                FieldBuilder::field(FieldType::Color, "color", "Text Color")
                    .with_default("#333333")
                    .with_selector(SelectorRule::template(
                        "{{WRAPPER}} .heading-title:hover",
                        "color: {{VALUE}};",
                    )),
            )?
            .end_group()
            .end_tab()
            .add_group("flex", "Layout")?
            .field(
                FieldBuilder::field(FieldType::Toggle, "inline", "Inline").with_default(false),
            )?
            .field(
                FieldBuilder::field(FieldType::Alignment, "justify", "Justify")
                    .with_axis(AlignmentAxis::Flex)
                    .with_default("left")
                    .with_condition(Condition::new("inline", Operator::Eq, true))
                    .with_selector(SelectorRule::template(
                        "{{WRAPPER}}",
                        "display: flex; justify-content: {{VALUE}};",
                    )),
            )?
            .end_group()
            .add_group("spacing", "Spacing")?
            .field(
                FieldBuilder::field(FieldType::Dimension, "margin", "Margin")
                    .with_unit("px")
                    .with_responsive(true)
                    .with_selector(SelectorRule::template(
                        "{{WRAPPER}}",
                        "margin: {{VALUE.TOP}} {{VALUE.RIGHT}} {{VALUE.BOTTOM}} {{VALUE.LEFT}};",
                    )),
            )?
            .end_group()
            .get_fields())
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        if let Some(renderer) = &self.renderer {
            return renderer.render(self.widget_type(), ctx);
        }

        let tag = ctx.text("content.tag");
        let tag = if TAGS.contains(&tag.as_str()) { tag } else { "h2".to_owned() };
        let title = ctx.escaped("content.title");
        let link = ctx.escaped("content.link");
        let inner = if link.is_empty() {
            title
        } else {
            format!("<a href=\"{link}\">{title}</a>")
        };
        Ok(format!(
            "<div {}><{tag} class=\"heading-title\">{inner}</{tag}></div>",
            ctx.wrapper_attributes("widget-heading")
        ))
    }
}
