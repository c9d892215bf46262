//! Background group resolver.
//!
//! Stored shape:
//!
//! ```text
//! {
//!   "type": "classic" | "gradient" | "none",
//!   "color": "#fff",
//!   "image": "https://…" | { "url", "position", "size", "repeat", "attachment" },
//!   "gradient": "linear-gradient(…)" | {
//!       "type": "linear" | "radial", "angle": 180, "position": "center center",
//!       "start_color", "start_position", "end_color", "end_position"
//!   },
//!   "hover": { …same shape, without its own hover… }
//! }
//! ```
//!
//! A missing `type` is inferred: `gradient` when a gradient is present, else `classic`.

use serde_json::{Map, Value};

use crate::css::model::Declaration;
use crate::resolve::{format_number, scalar_text, Resolved};

/// Resolve a background group; `None` for an unknown `type`.
pub fn resolve(value: &Value) -> Option<Resolved> {
    let map = value.as_object()?;
    let declarations = declarations(map)?;
    let hover_declarations = match map.get("hover") {
        Some(Value::Object(hover)) => declarations_or_empty(hover),
        _ => Vec::new(),
    };
    Some(Resolved {
        declarations,
        hover_declarations,
        ..Resolved::default()
    })
}

fn declarations_or_empty(map: &Map<String, Value>) -> Vec<Declaration> {
    declarations(map).unwrap_or_else(|| {
        tracing::debug!("ignoring hover background with an unknown type");
        Vec::new()
    })
}

fn declarations(map: &Map<String, Value>) -> Option<Vec<Declaration>> {
    let kind = match map.get("type").and_then(Value::as_str).filter(|t| !t.is_empty()) {
        Some(kind) => kind,
        None if map.get("gradient").is_some_and(|g| !g.is_null()) => "gradient",
        None => "classic",
    };

    let mut out = Vec::new();
    match kind {
        "none" => {}
        "classic" => {
            push_color(map, &mut out);
            push_image(map.get("image"), &mut out);
        }
        "gradient" => {
            push_color(map, &mut out);
            if let Some(gradient) = gradient_text(map.get("gradient")) {
                out.push(Declaration::new("background-image", gradient));
            }
        }
        _ => return None,
    }
    Some(out)
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(scalar_text).filter(|s| !s.is_empty())
}

fn push_color(map: &Map<String, Value>, out: &mut Vec<Declaration>) {
    if let Some(color) = text(map, "color") {
        out.push(Declaration::new("background-color", color));
    }
}

fn push_image(image: Option<&Value>, out: &mut Vec<Declaration>) {
    match image {
        Some(Value::String(url)) if !url.trim().is_empty() => {
            out.push(Declaration::new("background-image", css_url(url.trim())));
        }
        Some(Value::Object(image)) => {
            let Some(url) = text(image, "url") else {
                return;
            };
            out.push(Declaration::new("background-image", css_url(&url)));
            for (key, property) in [
                ("position", "background-position"),
                ("size", "background-size"),
                ("repeat", "background-repeat"),
                ("attachment", "background-attachment"),
            ] {
                if let Some(v) = text(image, key) {
                    out.push(Declaration::new(property, v));
                }
            }
        }
        _ => {}
    }
}

/// Quote `url` so it cannot leave the `url("...")` string.
fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len() + 7);
    out.push_str("url(\"");
    for c in url.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("%22"),
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            '\x0c' => out.push_str("%0C"),
            c => out.push(c),
        }
    }
    out.push_str("\")");
    out
}

fn gradient_text(gradient: Option<&Value>) -> Option<String> {
    match gradient? {
        Value::String(raw) if !raw.trim().is_empty() => Some(raw.trim().to_owned()),
        Value::Object(g) => {
            let start_color = text(g, "start_color").unwrap_or_else(|| "transparent".into());
            let end_color = text(g, "end_color").unwrap_or_else(|| "transparent".into());
            let start = stop(g, "start_position", 0.0);
            let end = stop(g, "end_position", 100.0);
            let stops = format!("{start_color} {start}, {end_color} {end}");

            match g.get("type").and_then(Value::as_str).unwrap_or("linear") {
                "radial" => {
                    let at = text(g, "position").unwrap_or_else(|| "center center".into());
                    Some(format!("radial-gradient(at {at}, {stops})"))
                }
                _ => {
                    let angle = g.get("angle").and_then(Value::as_f64).unwrap_or(180.0);
                    Some(format!("linear-gradient({}deg, {stops})", format_number(angle)))
                }
            }
        }
        _ => None,
    }
}

fn stop(g: &Map<String, Value>, key: &str, default: f64) -> String {
    let n = g.get(key).and_then(Value::as_f64).unwrap_or(default);
    format!("{}%", format_number(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::model::join_declarations;
    use serde_json::json;

    fn css(value: Value) -> String {
        join_declarations(&resolve(&value).unwrap().declarations)
    }

    #[test]
    fn test_classic_color() {
        assert_eq!(css(json!({"type": "classic", "color": "#fff"})), "background-color: #fff;");
    }

    #[test]
    fn test_classic_image_object() {
        assert_eq!(
            css(json!({"type": "classic", "image": {"url": "a.png", "size": "cover", "repeat": "no-repeat"}})),
            "background-image: url(\"a.png\"); background-size: cover; background-repeat: no-repeat;"
        );
    }

    #[test]
    fn test_type_inferred_from_gradient() {
        assert_eq!(
            css(json!({"gradient": {"start_color": "#000", "end_color": "#fff"}})),
            "background-image: linear-gradient(180deg, #000 0%, #fff 100%);"
        );
    }

    #[test]
    fn test_radial_gradient() {
        assert_eq!(
            css(json!({"type": "gradient", "gradient": {
                "type": "radial", "start_color": "red", "start_position": 10,
                "end_color": "blue", "end_position": 90
            }})),
            "background-image: radial-gradient(at center center, red 10%, blue 90%);"
        );
    }

    #[test]
    fn test_raw_gradient_string() {
        assert_eq!(
            css(json!({"type": "gradient", "color": "#111", "gradient": "linear-gradient(red, blue)"})),
            "background-color: #111; background-image: linear-gradient(red, blue);"
        );
    }

    #[test]
    fn test_none_emits_nothing() {
        assert_eq!(css(json!({"type": "none", "color": "#fff"})), "");
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        assert!(resolve(&json!({"type": "video"})).is_none());
    }

    #[test]
    fn test_hover_declarations() {
        let r = resolve(&json!({"color": "#fff", "hover": {"color": "#eee"}})).unwrap();
        assert_eq!(join_declarations(&r.hover_declarations), "background-color: #eee;");
    }

    #[test]
    fn test_quotes_in_url_are_escaped() {
        assert_eq!(
            css(json!({"image": "a\"b.png"})),
            "background-image: url(\"a%22b.png\");"
        );
    }

    #[test]
    fn test_backslash_and_newline_in_url_are_escaped() {
        assert_eq!(
            css(json!({"image": "a\\\");\nb.png"})),
            "background-image: url(\"a\\\\%22);%0Ab.png\");"
        );
    }
}
