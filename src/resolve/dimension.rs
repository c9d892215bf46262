//! Per-side dimension resolver: `{top, right, bottom, left, unit}`.

use serde_json::{Map, Value};

use crate::field::FieldDefinition;
use crate::resolve::{format_number, Resolved, TokenSet};
use crate::template::UNIT;

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Sides in CSS shorthand order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Key in the stored object.
    pub fn key(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }

    /// Placeholder token name.
    pub fn token(self) -> &'static str {
        match self {
            Side::Top => "VALUE.TOP",
            Side::Right => "VALUE.RIGHT",
            Side::Bottom => "VALUE.BOTTOM",
            Side::Left => "VALUE.LEFT",
        }
    }
}

/// Resolve a dimension object. A missing, `null` or empty side becomes `0`;
/// a side holding a non-scalar makes the whole value malformed.
pub fn resolve(field: &FieldDefinition, value: &Value) -> Option<Resolved> {
    let map = value.as_object()?;
    let mut tokens = TokenSet::new();

    for side in Side::ALL {
        tokens.insert(side.token(), side_text(map, side)?);
    }

    let unit = map
        .get("unit")
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .or(field.unit())
        .unwrap_or_default()
        .to_owned();
    tokens.insert(UNIT, unit.clone());
    if field.unit().is_some() {
        tokens.set_unit_suffix(Some(unit));
    }

    Some(Resolved {
        tokens,
        ..Resolved::default()
    })
}

fn side_text(map: &Map<String, Value>, side: Side) -> Option<String> {
    match map.get(side.key()) {
        None | Some(Value::Null) => Some("0".into()),
        Some(Value::Number(n)) => n.as_f64().map(format_number),
        Some(Value::String(s)) if s.trim().is_empty() => Some("0".into()),
        Some(Value::String(s)) => Some(s.trim().to_owned()),
        Some(_) => None,
    }
}
