//! Scalar resolvers: text, textarea, url, select, toggle, number, color, alignment.

use serde_json::Value;

use crate::field::{AlignmentAxis, FieldDefinition, FieldType};
use crate::resolve::{format_number, scalar_text, Resolved, TokenSet};
use crate::template::{UNIT, VALUE};

/// Resolve a scalar value; `None` when it violates the field's constraints.
pub fn resolve(field: &FieldDefinition, value: &Value) -> Option<Resolved> {
    let text = match field.field_type() {
        FieldType::Number => number_text(field, value)?,
        FieldType::Select => {
            let text = scalar_text(value)?;
            if !text.is_empty() && !field.allows_choice(&text) {
                return None;
            }
            text
        }
        FieldType::Alignment => {
            let text = scalar_text(value)?;
            if !text.is_empty() && !field.allows_choice(&text) {
                return None;
            }
            match field.axis().unwrap_or_default() {
                AlignmentAxis::Text => text,
                AlignmentAxis::Flex => flex_keyword(&text).to_owned(),
            }
        }
        _ => scalar_text(value)?,
    };
    Some(tokens_for(field, text))
}

/// The resolution of a field with no stored value and no default.
pub fn empty(field: &FieldDefinition) -> Resolved {
    tokens_for(field, String::new())
}

fn tokens_for(field: &FieldDefinition, text: String) -> Resolved {
    let mut tokens = TokenSet::new().with(VALUE, text);
    if field.field_type().token_names().contains(&UNIT) {
        tokens.insert(UNIT, field.unit().unwrap_or_default());
        tokens.set_unit_suffix(field.unit().map(str::to_owned));
    }
    Resolved {
        tokens,
        ..Resolved::default()
    }
}

/// Numbers are clamped to the declared bounds; an empty string stays empty.
fn number_text(field: &FieldDefinition, value: &Value) -> Option<String> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if s.trim().is_empty() => return Some(String::new()),
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let n = field.min().map_or(n, |min| n.max(min));
    let n = field.max().map_or(n, |max| n.min(max));
    Some(format_number(n))
}

/// Map a text alignment keyword onto the flexbox main axis.
pub fn flex_keyword(alignment: &str) -> &str {
    match alignment {
        "left" => "flex-start",
        "right" => "flex-end",
        "justify" => "space-between",
        other => other,
    }
}
