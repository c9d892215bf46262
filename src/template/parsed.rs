//! Parsed templates and interpolation.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::template::tokenizer::{tokenize, Token};

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied to the output unchanged.
    Literal(String),
    /// A placeholder name without braces, e.g. `VALUE.TOP`.
    Placeholder(String),
}

/// A template lexed once into literal and placeholder segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template. Never fails: malformed placeholders stay literal.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut segments: Vec<Segment> = Vec::new();

        for (token, text) in tokenize(&source) {
            match token {
                Token::Placeholder => {
                    let name = &text[2..text.len() - 2];
                    segments.push(Segment::Placeholder(name.to_owned()));
                }
                Token::Text | Token::Brace => match segments.last_mut() {
                    Some(Segment::Literal(prev)) => prev.push_str(&text),
                    _ => segments.push(Segment::Literal(text)),
                },
            }
        }

        Self { source, segments }
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in order of appearance (duplicates included).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns `true` if the template references placeholder `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.placeholders().any(|p| p == name)
    }

    /// Substitute placeholders using `lookup`.
    ///
    /// A placeholder `lookup` does not know is written back verbatim
    /// (`{{NAME}}`), so a typo is visible in the output instead of silently
    /// producing an empty value.
    pub fn render<'a, F>(&self, lookup: F) -> String
    where
        F: Fn(&str) -> Option<Cow<'a, str>>,
    {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                },
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::parse(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let t = Template::parse("{{WRAPPER}} .btn");
        assert_eq!(
            t.segments(),
            &[
                Segment::Placeholder("WRAPPER".into()),
                Segment::Literal(" .btn".into()),
            ]
        );
    }

    #[test]
    fn test_literal_braces_merge_into_one_segment() {
        let t = Template::parse("a { b }");
        assert_eq!(t.segments(), &[Segment::Literal("a { b }".into())]);
    }

    #[test]
    fn test_render_substitutes() {
        let t = Template::parse("padding: {{VALUE.TOP}}{{UNIT}};");
        let out = t.render(|name| match name {
            "VALUE.TOP" => Some(Cow::Borrowed("12")),
            "UNIT" => Some(Cow::Borrowed("px")),
            _ => None,
        });
        assert_eq!(out, "padding: 12px;");
    }

    #[test]
    fn test_render_unknown_placeholder_is_verbatim() {
        let t = Template::parse("color: {{COLOUR}};");
        assert_eq!(t.render(|_| None), "color: {{COLOUR}};");
    }

    #[test]
    fn test_unclosed_placeholder_renders_verbatim() {
        let t = Template::parse("{{VALUE");
        assert_eq!(t.placeholders().count(), 0);
        assert_eq!(t.render(|_| Some(Cow::Borrowed("x"))), "{{VALUE");
    }

    #[test]
    fn test_placeholders_and_contains() {
        let t = Template::parse("{{VALUE}}{{UNIT}} {{VALUE}}");
        assert_eq!(t.placeholders().collect::<Vec<_>>(), vec!["VALUE", "UNIT", "VALUE"]);
        assert!(t.contains("UNIT"));
        assert!(!t.contains("WRAPPER"));
    }

    #[test]
    fn test_source_is_preserved() {
        let t = Template::parse("{{WRAPPER}}:hover");
        assert_eq!(t.source(), "{{WRAPPER}}:hover");
        assert_eq!(t.to_string(), "{{WRAPPER}}:hover");
    }
}
