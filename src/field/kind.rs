//! The field type catalog.
//!
//! Every field type belongs to one resolver family:
//!
//! | Family     | Types                                                  | Tokens                         |
//! |------------|--------------------------------------------------------|--------------------------------|
//! | scalar     | text, textarea, url, select, toggle, number            | `VALUE`, `UNIT`                |
//! | color      | color                                                  | `VALUE`                        |
//! | dimension  | dimension                                              | `VALUE.<SIDE>`, `UNIT`         |
//! | composite  | background_group, typography_group                     | resolver-emitted declarations  |
//! | alignment  | alignment                                              | `VALUE`                        |
//! | structured | icon, image, repeater, link_group                      | none (render-only)             |

use serde::Serialize;
use serde_json::Value;

/// Tokens produced by the typography resolver.
pub const TYPOGRAPHY_TOKENS: [&str; 8] = [
    "FONT_FAMILY",
    "FONT_SIZE",
    "FONT_WEIGHT",
    "LINE_HEIGHT",
    "LETTER_SPACING",
    "WORD_SPACING",
    "TEXT_TRANSFORM",
    "FONT_STYLE",
];

/// Tokens produced by the dimension resolver.
pub const DIMENSION_TOKENS: [&str; 5] = ["VALUE.TOP", "VALUE.RIGHT", "VALUE.BOTTOM", "VALUE.LEFT", "UNIT"];

const SCALAR_TOKENS: [&str; 2] = ["VALUE", "UNIT"];
const VALUE_TOKEN: [&str; 1] = ["VALUE"];

/// A field type from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Url,
    Select,
    Toggle,
    Number,
    Color,
    Dimension,
    BackgroundGroup,
    TypographyGroup,
    Alignment,
    Icon,
    Image,
    Repeater,
    LinkGroup,
}

impl FieldType {
    /// Every catalog entry.
    pub const ALL: [FieldType; 15] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Url,
        FieldType::Select,
        FieldType::Toggle,
        FieldType::Number,
        FieldType::Color,
        FieldType::Dimension,
        FieldType::BackgroundGroup,
        FieldType::TypographyGroup,
        FieldType::Alignment,
        FieldType::Icon,
        FieldType::Image,
        FieldType::Repeater,
        FieldType::LinkGroup,
    ];

    /// The catalog name, as used in manifests.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Url => "url",
            FieldType::Select => "select",
            FieldType::Toggle => "toggle",
            FieldType::Number => "number",
            FieldType::Color => "color",
            FieldType::Dimension => "dimension",
            FieldType::BackgroundGroup => "background_group",
            FieldType::TypographyGroup => "typography_group",
            FieldType::Alignment => "alignment",
            FieldType::Icon => "icon",
            FieldType::Image => "image",
            FieldType::Repeater => "repeater",
            FieldType::LinkGroup => "link_group",
        }
    }

    /// Look up a type by catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Types whose value is one of a declared option set.
    pub fn is_choice(self) -> bool {
        matches!(self, FieldType::Select | FieldType::Alignment)
    }

    /// Types whose resolver writes full declarations for composite selector rules.
    pub fn is_composite(self) -> bool {
        matches!(self, FieldType::BackgroundGroup | FieldType::TypographyGroup)
    }

    /// Types consumed only by widget rendering, never by the CSS compiler.
    pub fn is_structured(self) -> bool {
        matches!(
            self,
            FieldType::Icon | FieldType::Image | FieldType::Repeater | FieldType::LinkGroup
        )
    }

    /// Types that accept a declared unit.
    pub fn supports_unit(self) -> bool {
        matches!(self, FieldType::Number | FieldType::Dimension)
    }

    /// Types that accept `min`/`max`/`step` bounds.
    pub fn supports_bounds(self) -> bool {
        self == FieldType::Number
    }

    /// Placeholder tokens this type's resolver produces for declaration templates.
    pub fn token_names(self) -> &'static [&'static str] {
        match self {
            FieldType::Text
            | FieldType::Textarea
            | FieldType::Url
            | FieldType::Select
            | FieldType::Toggle
            | FieldType::Number => &SCALAR_TOKENS,
            FieldType::Color | FieldType::Alignment => &VALUE_TOKEN,
            FieldType::Dimension => &DIMENSION_TOKENS,
            FieldType::TypographyGroup => &TYPOGRAPHY_TOKENS,
            FieldType::BackgroundGroup
            | FieldType::Icon
            | FieldType::Image
            | FieldType::Repeater
            | FieldType::LinkGroup => &[],
        }
    }

    /// Whether `value` has the stored shape this type expects.
    ///
    /// `null` is never a valid shape; callers treat it as "no value".
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldType::Text
            | FieldType::Textarea
            | FieldType::Url
            | FieldType::Select => matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)),
            FieldType::Toggle => matches!(value, Value::Bool(_) | Value::String(_)),
            FieldType::Number => match value {
                Value::Number(_) => true,
                Value::String(s) => s.is_empty() || s.trim().parse::<f64>().is_ok(),
                _ => false,
            },
            FieldType::Color | FieldType::Alignment => value.is_string(),
            FieldType::Dimension
            | FieldType::BackgroundGroup
            | FieldType::TypographyGroup
            | FieldType::Icon
            | FieldType::Image
            | FieldType::LinkGroup => value.is_object(),
            FieldType::Repeater => value.is_array(),
        }
    }
}

/// Which CSS axis an alignment field feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentAxis {
    /// `left`/`center`/`right`/`justify` used as-is (`text-align`).
    #[default]
    Text,
    /// Mapped to flexbox keywords (`justify-content`).
    Flex,
}
