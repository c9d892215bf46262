//! Typography group resolver.
//!
//! Produces one token per component (for declaration templates) and the full
//! declaration set for composite rules. Numeric sizes and spacings get `px`;
//! `{ "size": 1.2, "unit": "em" }` objects are accepted too. A numeric
//! `line_height` stays unitless.

use serde_json::{Map, Value};

use crate::css::model::Declaration;
use crate::resolve::{format_number, scalar_text, Resolved, TokenSet};

/// `(stored key, token, property, numeric unit)`.
const COMPONENTS: [(&str, &str, &str, Option<&str>); 8] = [
    ("font_family", "FONT_FAMILY", "font-family", None),
    ("font_size", "FONT_SIZE", "font-size", Some("px")),
    ("font_weight", "FONT_WEIGHT", "font-weight", None),
    ("line_height", "LINE_HEIGHT", "line-height", None),
    ("letter_spacing", "LETTER_SPACING", "letter-spacing", Some("px")),
    ("word_spacing", "WORD_SPACING", "word-spacing", Some("px")),
    ("text_transform", "TEXT_TRANSFORM", "text-transform", None),
    ("font_style", "FONT_STYLE", "font-style", None),
];

/// Resolve a typography group.
pub fn resolve(value: &Value) -> Option<Resolved> {
    let map = value.as_object()?;
    let mut tokens = TokenSet::new();
    let mut declarations = Vec::new();

    for (key, token, property, unit) in COMPONENTS {
        let text = component_text(map, key, unit)?;
        if !text.is_empty() {
            declarations.push(Declaration::new(property, text.clone()));
        }
        tokens.insert(token, text);
    }

    Some(Resolved {
        tokens,
        declarations,
        ..Resolved::default()
    })
}

/// `None` only when the component holds something unusable (a list, say).
fn component_text(map: &Map<String, Value>, key: &str, unit: Option<&str>) -> Option<String> {
    match map.get(key) {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::Number(n)) => {
            let n = format_number(n.as_f64()?);
            Some(format!("{n}{}", unit.unwrap_or_default()))
        }
        Some(Value::Object(sized)) => {
            let size = sized.get("size").and_then(scalar_text).unwrap_or_default();
            if size.is_empty() {
                return Some(String::new());
            }
            let unit = sized
                .get("unit")
                .and_then(Value::as_str)
                .or(unit)
                .unwrap_or_default();
            Some(format!("{size}{unit}"))
        }
        Some(other) => scalar_text(other),
    }
}
