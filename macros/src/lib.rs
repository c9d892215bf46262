//! Proc macros for widget-style: `selectors!` compile-time selector-rule validation.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `widget-style`.

use proc_macro::TokenStream;

mod selectors_macro;

/// Selector-rule list with compile-time placeholder validation.
///
/// Expands to a `Vec<widget_style::field::SelectorRule>`.
///
/// # Syntax
///
/// - `"<selector>" => "<declarations>"` becomes `SelectorRule::template(..)`
/// - `["<selector>", "<selector>", ...]` becomes `SelectorRule::composite(..)`
///
/// Selectors may only use `{{WRAPPER}}`; declaration templates may use the
/// value tokens (`{{VALUE}}`, `{{VALUE.TOP}}`, `{{UNIT}}`, `{{FONT_SIZE}}`, ...)
/// but not `{{WRAPPER}}`. Unknown placeholders and unbalanced braces are
/// compile errors.
///
/// # Example
///
/// ```ignore
/// let rules = selectors! {
///     "{{WRAPPER}} .title" => "color: {{VALUE}};",
///     ["{{WRAPPER}} .title", "{{WRAPPER}} .subtitle"],
/// };
/// ```
#[proc_macro]
pub fn selectors(input: TokenStream) -> TokenStream {
    selectors_macro::selectors_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
