//! logos-based placeholder tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (`{{VALUE}}` as Placeholder beats `{` as Brace)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Anything that is not a well-formed placeholder is literal text, so every
//! input lexes without error: `{{value}}` (lowercase) is `Brace`, `Brace`, `Text`,
//! and an unclosed `{{VALUE` is a single lexer error span mapped to `Text`.

use logos::Logos;

/// Template token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// `{{NAME}}` or `{{NAME.PART}}`, upper-case names only.
    #[regex(r"\{\{[A-Z][A-Z0-9_]*(\.[A-Z][A-Z0-9_]*)?\}\}")]
    Placeholder,

    /// A run of text without `{`.
    #[regex(r"[^{]+")]
    Text,

    /// A lone `{` that does not open a placeholder.
    #[token("{")]
    Brace,
}

/// Tokenize a template into `(Token, text)` pairs.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .map(|(result, span)| {
            let text = input[span].to_string();
            (result.unwrap_or(Token::Text), text)
        })
        .collect()
}
