//! Output model for compiled CSS: Declaration, CssRule, CssBlock, StyleSheet.
//!
//! The compiler builds a [`StyleSheet`] and renders it with `Display`. Each
//! block is written on its own line, in the order it was pushed; nothing is
//! deduplicated or reordered, so source order decides the cascade.

use std::fmt;

/// A single `property: value;` pair written by a composite resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The property name, e.g. `"background-color"`.
    pub property: String,
    /// The value text, e.g. `"#fff"`.
    pub value: String,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

/// Join declarations into one rule body.
pub fn join_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A selector with its declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    /// The fully substituted selector, e.g. `#sec-7 #widget-42 .title`.
    pub selector: String,
    /// The declaration block text without braces.
    pub body: String,
}

impl CssRule {
    /// Create a new rule.
    pub fn new(selector: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ {} }}", self.selector, self.body)
    }
}

/// One top-level entry of a compiled stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssBlock {
    /// An unscoped rule.
    Rule(CssRule),
    /// Rules wrapped in `@media (max-width: <px>px)`.
    Media { max_width: u32, rules: Vec<CssRule> },
    /// `/* text */`.
    Comment(String),
}

impl fmt::Display for CssBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssBlock::Rule(rule) => write!(f, "{rule}"),
            CssBlock::Media { max_width, rules } => {
                write!(f, "@media (max-width: {max_width}px) {{")?;
                for rule in rules {
                    write!(f, " {rule}")?;
                }
                write!(f, " }}")
            }
            CssBlock::Comment(text) => write!(f, "/* {} */", text.replace("*/", "* /")),
        }
    }
}

/// A compiled stylesheet: blocks in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    pub blocks: Vec<CssBlock>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Append a block.
    pub fn push(&mut self, block: CssBlock) {
        self.blocks.push(block);
    }

    /// Append every block of `other`.
    pub fn extend(&mut self, other: StyleSheet) {
        self.blocks.extend(other.blocks);
    }

    /// Returns `true` if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of rules, counting rules inside media blocks.
    pub fn rule_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| match b {
                CssBlock::Rule(_) => 1,
                CssBlock::Media { rules, .. } => rules.len(),
                CssBlock::Comment(_) => 0,
            })
            .sum()
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            writeln!(f, "{block}")?;
        }
        Ok(())
    }
}
