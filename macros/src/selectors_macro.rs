//! `selectors!` macro: validate selector-rule templates at compile time and
//! generate `SelectorRule` constructors.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{bracketed, Error, LitStr, Result, Token};

/// Placeholders a declaration template may use.
const VALUE_TOKENS: &[&str] = &[
    "VALUE",
    "UNIT",
    "VALUE.TOP",
    "VALUE.RIGHT",
    "VALUE.BOTTOM",
    "VALUE.LEFT",
    "FONT_FAMILY",
    "FONT_SIZE",
    "FONT_WEIGHT",
    "LINE_HEIGHT",
    "LETTER_SPACING",
    "WORD_SPACING",
    "TEXT_TRANSFORM",
    "FONT_STYLE",
];

/// Placeholders a selector may use.
const SELECTOR_TOKENS: &[&str] = &["WRAPPER"];

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// One rule in the macro input.
#[derive(Debug)]
enum RuleInput {
    /// `"selector" => "template"`
    Template { selector: LitStr, template: LitStr },
    /// `["selector", ...]`
    Composite { selectors: Vec<LitStr> },
}

#[derive(Debug)]
struct SelectorsInput {
    rules: Vec<RuleInput>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for RuleInput {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(syn::token::Bracket) {
            let content;
            let bracket = bracketed!(content in input);
            let list: Punctuated<LitStr, Token![,]> = Punctuated::parse_terminated(&content)?;
            let selectors: Vec<LitStr> = list.into_iter().collect();
            if selectors.is_empty() {
                return Err(Error::new(bracket.span.join(), "composite rule needs at least one selector"));
            }
            return Ok(RuleInput::Composite { selectors });
        }

        let selector: LitStr = input.parse()?;
        input.parse::<Token![=>]>()?;
        let template: LitStr = input.parse()?;
        Ok(RuleInput::Template { selector, template })
    }
}

impl Parse for SelectorsInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let rules: Punctuated<RuleInput, Token![,]> = Punctuated::parse_terminated(input)?;
        Ok(SelectorsInput {
            rules: rules.into_iter().collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Extract placeholder names from `text`.
///
/// Fails on a `{{` without a matching `}}`, on a stray `}}`, and on names that
/// are not upper-case identifiers with at most one `.` part.
pub(crate) fn placeholders(text: &str) -> std::result::Result<Vec<String>, String> {
    let mut names = Vec::new();
    let mut rest = text;
    loop {
        let open = rest.find("{{");
        let close = rest.find("}}");
        match (open, close) {
            (None, None) => return Ok(names),
            (None, Some(_)) => return Err("`}}` without a matching `{{`".into()),
            (Some(o), Some(c)) if c < o => return Err("`}}` without a matching `{{`".into()),
            (Some(_), None) => return Err("unclosed `{{`".into()),
            (Some(o), Some(c)) => {
                let name = &rest[o + 2..c];
                if !is_placeholder_name(name) {
                    return Err(format!("`{{{{{name}}}}}` is not a valid placeholder"));
                }
                names.push(name.to_owned());
                rest = &rest[c + 2..];
            }
        }
    }
}

fn is_placeholder_name(name: &str) -> bool {
    let mut parts = name.split('.');
    let valid = |part: &str| {
        let mut chars = part.chars();
        chars.next().is_some_and(|c| c.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    };
    match (parts.next(), parts.next(), parts.next()) {
        (Some(head), None, _) => valid(head),
        (Some(head), Some(tail), None) => valid(head) && valid(tail),
        _ => false,
    }
}

fn check(lit: &LitStr, allowed: &[&str], what: &str) -> Result<()> {
    let names = placeholders(&lit.value()).map_err(|msg| Error::new(lit.span(), msg))?;
    match names.iter().find(|n| !allowed.contains(&n.as_str())) {
        Some(bad) => Err(Error::new(
            lit.span(),
            format!("{what} may not use `{{{{{bad}}}}}`"),
        )),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Entry point: generate code for the entire selectors! macro.
pub(crate) fn selectors_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: SelectorsInput = syn::parse2(input)?;

    let mut rules = Vec::new();
    for rule in &parsed.rules {
        rules.push(match rule {
            RuleInput::Template { selector, template } => {
                check(selector, SELECTOR_TOKENS, "a selector")?;
                check(template, VALUE_TOKENS, "a declaration template")?;
                quote! { ::widget_style::field::SelectorRule::template(#selector, #template) }
            }
            RuleInput::Composite { selectors } => {
                for selector in selectors {
                    check(selector, SELECTOR_TOKENS, "a selector")?;
                }
                quote! { ::widget_style::field::SelectorRule::composite([#(#selectors),*]) }
            }
        });
    }

    Ok(quote! {
        ::std::vec![#(#rules),*]
    })
}

// ===========================================================================
// Tests
// ===========================================================================
