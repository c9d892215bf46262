//! Selector rules: how a field maps onto CSS.

use serde::Serialize;

use crate::template::Template;

/// Maps a field onto one or more CSS selectors.
///
/// - [`SelectorRule::Template`]: the field's tokens are substituted into
///   `template`, which becomes the declaration block for `selector`.
/// - [`SelectorRule::Composite`]: the field's resolver writes its own
///   declarations (background and typography groups) for every selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SelectorRule {
    Template { selector: Template, template: Template },
    Composite { selectors: Vec<Template> },
}

impl SelectorRule {
    /// `selector { template }` with token substitution.
    pub fn template(selector: impl Into<Template>, template: impl Into<Template>) -> Self {
        SelectorRule::Template {
            selector: selector.into(),
            template: template.into(),
        }
    }

    /// Resolver-emitted declarations for each selector.
    pub fn composite<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Template>,
    {
        SelectorRule::Composite {
            selectors: selectors.into_iter().map(Into::into).collect(),
        }
    }

    /// The selector templates of this rule.
    pub fn selectors(&self) -> &[Template] {
        match self {
            SelectorRule::Template { selector, .. } => std::slice::from_ref(selector),
            SelectorRule::Composite { selectors } => selectors,
        }
    }

    /// Returns `true` for composite rules.
    pub fn is_composite(&self) -> bool {
        matches!(self, SelectorRule::Composite { .. })
    }
}
