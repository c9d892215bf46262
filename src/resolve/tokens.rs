//! Token sets: named values substituted into declaration templates.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::template::{Template, UNIT, VALUE};

/// Named token values produced by a resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    values: BTreeMap<String, String>,
    /// Unit appended to numeric `VALUE`/`VALUE.<SIDE>` tokens when a template
    /// does not place `{{UNIT}}` itself.
    unit_suffix: Option<String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set_unit_suffix(&mut self, unit: Option<String>) {
        self.unit_suffix = unit.filter(|u| !u.is_empty());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Substitute this set's tokens into `template`.
    pub fn render(&self, template: &Template) -> String {
        let suffix = self
            .unit_suffix
            .as_deref()
            .filter(|_| !template.contains(UNIT));

        template.render(|name| {
            let value = self.values.get(name)?;
            match suffix {
                Some(unit) if is_value_token(name) && value.parse::<f64>().is_ok() => {
                    Some(Cow::Owned(format!("{value}{unit}")))
                }
                _ => Some(Cow::Borrowed(value.as_str())),
            }
        })
    }
}

fn is_value_token(name: &str) -> bool {
    name == VALUE || name.strip_prefix(VALUE).is_some_and(|rest| rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let tokens = TokenSet::new().with("VALUE", "#fff");
        assert_eq!(tokens.render(&Template::parse("color: {{VALUE}};")), "color: #fff;");
    }

    #[test]
    fn test_unknown_token_is_verbatim() {
        let tokens = TokenSet::new().with("VALUE", "1");
        assert_eq!(tokens.render(&Template::parse("x: {{OTHER}};")), "x: {{OTHER}};");
    }

    #[test]
    fn test_unit_suffix_without_unit_token() {
        let mut tokens = TokenSet::new().with("VALUE", "10").with("UNIT", "px");
        tokens.set_unit_suffix(Some("px".into()));
        assert_eq!(tokens.render(&Template::parse("width: {{VALUE}};")), "width: 10px;");
    }

    #[test]
    fn test_unit_token_disables_suffix() {
        let mut tokens = TokenSet::new().with("VALUE", "10").with("UNIT", "px");
        tokens.set_unit_suffix(Some("px".into()));
        assert_eq!(
            tokens.render(&Template::parse("width: {{VALUE}}{{UNIT}};")),
            "width: 10px;"
        );
    }

    #[test]
    fn test_suffix_skips_non_numeric_values() {
        let mut tokens = TokenSet::new().with("VALUE", "auto").with("VALUE.TOP", "");
        tokens.set_unit_suffix(Some("px".into()));
        assert_eq!(tokens.render(&Template::parse("width: {{VALUE}};")), "width: auto;");
        assert_eq!(tokens.render(&Template::parse("top: {{VALUE.TOP}};")), "top: ;");
    }

    #[test]
    fn test_suffix_applies_to_sides() {
        let mut tokens = TokenSet::new().with("VALUE.TOP", "4");
        tokens.set_unit_suffix(Some("em".into()));
        assert_eq!(tokens.render(&Template::parse("top: {{VALUE.TOP}};")), "top: 4em;");
    }

    #[test]
    fn test_is_value_token() {
        assert!(is_value_token("VALUE"));
        assert!(is_value_token("VALUE.LEFT"));
        assert!(!is_value_token("VALUES"));
        assert!(!is_value_token("UNIT"));
    }
}
