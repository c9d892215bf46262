//! Value resolvers: stored field value → interpolation tokens and declarations.
//!
//! Resolution never fails on bad data alone: a stored value with the wrong
//! shape falls back to the field's default, and only when neither is usable
//! does [`resolve`] return a [`ResolveError`] (which the compiler treats as
//! "skip this field").

pub mod background;
pub mod dimension;
pub mod scalar;
pub mod tokens;
pub mod typography;

use serde_json::Value;

use crate::css::model::Declaration;
use crate::field::{FieldDefinition, FieldType};

pub use tokens::TokenSet;

/// Why a field produced no resolved value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// Neither a stored value nor a default exists.
    #[error("field `{key}` has no value and no default")]
    Missing { key: String },
    /// The stored value and the default both have the wrong shape.
    #[error("field `{key}` holds {found}, which a `{field_type}` field cannot use")]
    Malformed {
        key: String,
        field_type: &'static str,
        found: String,
    },
}

/// Everything one field value contributes to CSS output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    /// Tokens for declaration templates.
    pub tokens: TokenSet,
    /// Declarations written by composite resolvers.
    pub declarations: Vec<Declaration>,
    /// Declarations for the `:hover` state (background groups only).
    pub hover_declarations: Vec<Declaration>,
}

/// Resolve one (single-breakpoint) value for `field`.
///
/// `stored` is what the settings tree holds, `fallback` is the matching
/// default entry. Either may be absent.
pub fn resolve(
    field: &FieldDefinition,
    stored: Option<&Value>,
    fallback: Option<&Value>,
) -> Result<Resolved, ResolveError> {
    if let Some(value) = stored.filter(|v| !v.is_null()) {
        match resolve_one(field, value) {
            Some(resolved) => return Ok(resolved),
            None => tracing::debug!(
                field = field.key(),
                value = %value,
                "stored value does not fit the field type, using default"
            ),
        }
    }

    match fallback.filter(|v| !v.is_null()) {
        Some(value) => resolve_one(field, value).ok_or_else(|| ResolveError::Malformed {
            key: field.key().to_owned(),
            field_type: field.field_type().name(),
            found: stored.unwrap_or(value).to_string(),
        }),
        None if stored.is_some_and(|v| !v.is_null()) => Err(ResolveError::Malformed {
            key: field.key().to_owned(),
            field_type: field.field_type().name(),
            found: stored.map(Value::to_string).unwrap_or_default(),
        }),
        None => empty_value(field),
    }
}

/// Resolve a value known to be non-null; `None` when its shape is wrong.
fn resolve_one(field: &FieldDefinition, value: &Value) -> Option<Resolved> {
    if !field.field_type().accepts(value) {
        return None;
    }
    match field.field_type() {
        FieldType::Text
        | FieldType::Textarea
        | FieldType::Url
        | FieldType::Select
        | FieldType::Toggle
        | FieldType::Number
        | FieldType::Color
        | FieldType::Alignment => scalar::resolve(field, value),
        FieldType::Dimension => dimension::resolve(field, value),
        FieldType::BackgroundGroup => background::resolve(value),
        FieldType::TypographyGroup => typography::resolve(value),
        FieldType::Icon | FieldType::Image | FieldType::Repeater | FieldType::LinkGroup => {
            Some(Resolved::default())
        }
    }
}

/// Scalar-like fields with nothing stored and no default still emit, with an
/// empty `VALUE`; structured values have nothing to emit.
fn empty_value(field: &FieldDefinition) -> Result<Resolved, ResolveError> {
    match field.field_type() {
        FieldType::Dimension
        | FieldType::BackgroundGroup
        | FieldType::TypographyGroup
        | FieldType::Icon
        | FieldType::Image
        | FieldType::Repeater
        | FieldType::LinkGroup => Err(ResolveError::Missing {
            key: field.key().to_owned(),
        }),
        _ => Ok(scalar::empty(field)),
    }
}

/// Format a number the way CSS expects: no trailing `.0` on integers.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Render a JSON scalar as CSS text. Strings are trimmed.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => n.as_f64().map(format_number),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
