//! Spacer widget: empty vertical space with a responsive height.

use serde_json::json;

use crate::field::{FieldBuilder, FieldType, SelectorRule};
use crate::schema::{Category, ControlSchema, SchemaBuilder, SchemaError};
use crate::widget::{RenderContext, RenderError, Widget};

/// Vertical whitespace. Has no general settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Spacer;

impl Widget for Spacer {
    fn widget_type(&self) -> &str {
        "spacer"
    }

    fn general_fields(&self) -> Result<ControlSchema, SchemaError> {
        Ok(ControlSchema::empty(Category::General))
    }

    fn style_fields(&self) -> Result<ControlSchema, SchemaError> {
        Ok(SchemaBuilder::new(Category::Style)
            .add_group("size", "Size")?
            .field(
                FieldBuilder::field(FieldType::Number, "height", "Height")
                    .with_unit("px")
                    .with_min(0.0)
                    .with_max(1000.0)
                    .with_step(1.0)
                    .with_responsive(true)
                    .with_default(json!({"desktop": 50, "mobile": 20}))
                    .with_selector(SelectorRule::template("{{WRAPPER}} .spacer", "height: {{VALUE}};")),
            )?
            .end_group()
            .get_fields())
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        Ok(format!(
            "<div {}><div class=\"spacer\"></div></div>",
            ctx.wrapper_attributes("widget-spacer")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::generate_css;
    use crate::settings::SettingsTree;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_heights() {
        let style = Spacer.style_fields().unwrap();
        assert_eq!(
            generate_css("s-1", &style, &SettingsTree::new(), None),
            "#s-1 .spacer { height: 50px; }\n\
             @media (max-width: 767px) { #s-1 .spacer { height: 20px; } }\n"
        );
    }

    #[test]
    fn test_bare_value_replaces_default_map() {
        let style = Spacer.style_fields().unwrap();
        let tree = SettingsTree::from_value(json!({"size": {"height": 80}}));
        assert_eq!(
            generate_css("s-1", &style, &tree, None),
            "#s-1 .spacer { height: 80px; }\n"
        );
    }

    #[test]
    fn test_missing_desktop_takes_default() {
        let style = Spacer.style_fields().unwrap();
        let tree = SettingsTree::from_value(json!({"size": {"height": {"tablet": 2000}}}));
        assert_eq!(
            generate_css("s-1", &style, &tree, None),
            "#s-1 .spacer { height: 50px; }\n\
             @media (max-width: 1023px) { #s-1 .spacer { height: 1000px; } }\n"
        );
    }
}
