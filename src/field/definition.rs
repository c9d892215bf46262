//! FieldDefinition and its fluent builder.
//!
//! Setters return the builder for chaining and check their argument against
//! the declared field type; the first problem is remembered and reported by
//! [`FieldBuilder::build`], so a chain never has to be interrupted by `?`.
//!
//! ```ignore
//! let padding = FieldBuilder::new(FieldType::Dimension)
//!     .with_key("padding")
//!     .with_label("Padding")
//!     .with_unit("px")
//!     .with_responsive(true)
//!     .with_selector(SelectorRule::template(
//!         "{{WRAPPER}} .btn",
//!         "padding: {{VALUE.TOP}}{{UNIT}} {{VALUE.RIGHT}}{{UNIT}} {{VALUE.BOTTOM}}{{UNIT}} {{VALUE.LEFT}}{{UNIT}};",
//!     ))
//!     .build()?;
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::condition::Condition;
use crate::field::kind::{AlignmentAxis, FieldType};
use crate::field::selector::SelectorRule;
use crate::settings::ResponsiveValue;
use crate::template::{Template, WRAPPER};

/// Alignment keywords accepted when an alignment field declares no options.
pub const ALIGNMENTS: [&str; 4] = ["left", "center", "right", "justify"];

/// Errors from building a field definition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("invalid field definition `{key}`: {message}")]
    InvalidFieldDefinition { key: String, message: String },
    #[error(
        "field `{}` is missing required attribute `{attribute}`",
        .key.as_deref().unwrap_or("<unnamed>")
    )]
    MissingRequiredAttribute {
        attribute: &'static str,
        key: Option<String>,
    },
}

/// One entry of a choice field's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// An immutable, validated field descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    key: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Value::is_null")]
    default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<ChoiceOption>,
    responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<Condition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    selectors: Vec<SelectorRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    axis: Option<AlignmentAxis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_template: Option<Template>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style_template: Option<Template>,
}

impl FieldDefinition {
    /// Start building a field of the given type.
    pub fn builder(field_type: FieldType) -> FieldBuilder {
        FieldBuilder::new(field_type)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The declared default; `null` when none was declared.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn step(&self) -> Option<f64> {
        self.step
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn is_responsive(&self) -> bool {
        self.responsive
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn selectors(&self) -> &[SelectorRule] {
        &self.selectors
    }

    /// Alignment axis; always `Some` for alignment fields and `None` otherwise.
    pub fn axis(&self) -> Option<AlignmentAxis> {
        self.axis
    }

    pub fn class_template(&self) -> Option<&Template> {
        self.class_template.as_ref()
    }

    pub fn style_template(&self) -> Option<&Template> {
        self.style_template.as_ref()
    }

    /// Returns `true` if `value` is one of the declared options (or, for an
    /// alignment field without options, one of [`ALIGNMENTS`]). Fields without
    /// an option set accept everything.
    pub fn allows_choice(&self, value: &str) -> bool {
        if !self.options.is_empty() {
            return self.options.iter().any(|o| o.value == value);
        }
        if self.field_type == FieldType::Alignment {
            return ALIGNMENTS.contains(&value);
        }
        true
    }
}

/// Fluent builder for [`FieldDefinition`].
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    field_type: Result<FieldType, String>,
    key: Option<String>,
    label: Option<String>,
    description: Option<String>,
    default: Value,
    unit: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    options: Vec<ChoiceOption>,
    responsive: bool,
    condition: Option<Condition>,
    selectors: Vec<SelectorRule>,
    axis: AlignmentAxis,
    class_template: Option<Template>,
    style_template: Option<Template>,
    /// First problem found by a setter, reported by `build`.
    problem: Option<String>,
}

impl FieldBuilder {
    /// Start a field of a known type.
    pub fn new(field_type: FieldType) -> Self {
        Self::with_type(Ok(field_type))
    }

    /// Start a field from a catalog type name. Unknown names fail at `build`.
    pub fn of_type(name: &str) -> Self {
        Self::with_type(FieldType::from_name(name).ok_or_else(|| name.to_owned()))
    }

    /// Shorthand for `new(field_type).with_key(key).with_label(label)`.
    pub fn field(field_type: FieldType, key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(field_type).with_key(key).with_label(label)
    }

    fn with_type(field_type: Result<FieldType, String>) -> Self {
        Self {
            field_type,
            key: None,
            label: None,
            description: None,
            default: Value::Null,
            unit: None,
            min: None,
            max: None,
            step: None,
            options: Vec::new(),
            responsive: false,
            condition: None,
            selectors: Vec::new(),
            axis: AlignmentAxis::default(),
            class_template: None,
            style_template: None,
            problem: None,
        }
    }

    fn note(&mut self, message: String) {
        if self.problem.is_none() {
            self.problem = Some(message);
        }
    }

    /// Run `check` against the declared type when it is known.
    fn check_type(&mut self, check: impl FnOnce(FieldType) -> Result<(), String>) {
        if let Ok(field_type) = self.field_type {
            if let Err(message) = check(field_type) {
                self.note(message);
            }
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Help text shown by the editor.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The value used when the settings tree holds nothing (or garbage) for this field.
    ///
    /// Its shape is checked at `build`, once `with_responsive` is known.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.check_type(|t| {
            if t.supports_unit() {
                Ok(())
            } else {
                Err(format!("`{}` fields do not take a unit", t.name()))
            }
        });
        self.unit = Some(unit.into());
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.check_bounds("min");
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.check_bounds("max");
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.check_bounds("step");
        self.step = Some(step);
        self
    }

    fn check_bounds(&mut self, what: &str) {
        self.check_type(|t| {
            if t.supports_bounds() {
                Ok(())
            } else {
                Err(format!("`{}` fields do not take `{what}`", t.name()))
            }
        });
    }

    /// Option list for choice-like fields, as `(value, label)` pairs.
    pub fn with_options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.check_type(|t| {
            if t.is_choice() {
                Ok(())
            } else {
                Err(format!("`{}` fields are not choice fields and take no options", t.name()))
            }
        });
        self.options = options
            .into_iter()
            .map(|(value, label)| ChoiceOption {
                value: value.into(),
                label: label.into(),
            })
            .collect();
        self
    }

    pub fn with_responsive(mut self, responsive: bool) -> Self {
        if responsive {
            self.check_type(|t| {
                if t.is_structured() {
                    Err(format!("`{}` fields cannot be responsive", t.name()))
                } else {
                    Ok(())
                }
            });
        }
        self.responsive = responsive;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Replace the selector rules.
    pub fn with_selectors(mut self, rules: Vec<SelectorRule>) -> Self {
        self.selectors.clear();
        for rule in rules {
            self = self.with_selector(rule);
        }
        self
    }

    /// Append one selector rule.
    pub fn with_selector(mut self, rule: SelectorRule) -> Self {
        self.check_type(|t| check_selector_rule(t, &rule));
        self.selectors.push(rule);
        self
    }

    pub fn with_axis(mut self, axis: AlignmentAxis) -> Self {
        self.check_type(|t| {
            if t == FieldType::Alignment {
                Ok(())
            } else {
                Err(format!("`{}` fields have no alignment axis", t.name()))
            }
        });
        self.axis = axis;
        self
    }

    /// Class emitted into the rendered element's `class` attribute, e.g. `size-{{VALUE}}`.
    pub fn with_class(mut self, template: impl Into<Template>) -> Self {
        let template = template.into();
        self.check_type(|t| check_attribute_template(t, &template, "class"));
        self.class_template = Some(template);
        self
    }

    /// Declaration emitted into the inline `style` attribute, e.g. `color: {{VALUE}}`.
    pub fn with_style(mut self, template: impl Into<Template>) -> Self {
        let template = template.into();
        self.check_type(|t| check_attribute_template(t, &template, "style"));
        self.style_template = Some(template);
        self
    }

    /// Validate and freeze the definition.
    pub fn build(self) -> Result<FieldDefinition, FieldError> {
        let key = self.key.filter(|k| !k.is_empty());
        let field_type = match self.field_type {
            Ok(t) => t,
            Err(name) => {
                return Err(FieldError::InvalidFieldDefinition {
                    key: key.unwrap_or_else(|| "<unnamed>".into()),
                    message: format!("unknown field type `{name}`"),
                });
            }
        };
        let key = key.ok_or(FieldError::MissingRequiredAttribute {
            attribute: "key",
            key: None,
        })?;
        let invalid = |message: String| FieldError::InvalidFieldDefinition {
            key: key.clone(),
            message,
        };

        if !is_valid_key(&key) {
            return Err(invalid("keys may not contain `.` or whitespace".into()));
        }
        let label = self
            .label
            .filter(|l| !l.is_empty())
            .ok_or_else(|| FieldError::MissingRequiredAttribute {
                attribute: "label",
                key: Some(key.clone()),
            })?;
        if let Some(message) = self.problem {
            return Err(invalid(message));
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(invalid(format!("min ({min}) is greater than max ({max})")));
            }
        }
        if let Some(step) = self.step {
            if step <= 0.0 {
                return Err(invalid(format!("step must be positive, got {step}")));
            }
        }

        let defaults: Vec<&Value> = match ResponsiveValue::is_responsive_map(&self.default) {
            true if self.responsive => self
                .default
                .as_object()
                .map(|map| map.values().filter(|v| !v.is_null()).collect())
                .unwrap_or_default(),
            _ if self.default.is_null() => Vec::new(),
            _ => vec![&self.default],
        };
        for value in &defaults {
            if !field_type.accepts(value) {
                return Err(invalid(format!(
                    "default {value} does not fit a `{}` field",
                    field_type.name()
                )));
            }
        }

        let definition = FieldDefinition {
            key,
            field_type,
            label,
            description: self.description,
            default: self.default.clone(),
            unit: self.unit,
            min: self.min,
            max: self.max,
            step: self.step,
            options: self.options,
            responsive: self.responsive,
            condition: self.condition,
            selectors: self.selectors,
            axis: (field_type == FieldType::Alignment).then_some(self.axis),
            class_template: self.class_template,
            style_template: self.style_template,
        };

        if field_type.is_choice() {
            for value in &defaults {
                let choice = value.as_str().map(str::to_owned).unwrap_or_else(|| value.to_string());
                if !definition.allows_choice(&choice) {
                    return Err(FieldError::InvalidFieldDefinition {
                        key: definition.key,
                        message: format!("default `{choice}` is not one of the options"),
                    });
                }
            }
        }

        Ok(definition)
    }
}

/// Group, tab and field keys are single path segments.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.contains('.') && !key.chars().any(char::is_whitespace)
}

fn check_selector_rule(field_type: FieldType, rule: &SelectorRule) -> Result<(), String> {
    if field_type.is_structured() {
        return Err(format!("`{}` fields are render-only and take no selectors", field_type.name()));
    }
    for selector in rule.selectors() {
        if let Some(bad) = selector.placeholders().find(|p| *p != WRAPPER) {
            return Err(format!("selector `{selector}` may only use {{{{WRAPPER}}}}, found {{{{{bad}}}}}"));
        }
    }
    match rule {
        SelectorRule::Composite { .. } if !field_type.is_composite() => Err(format!(
            "`{}` fields need a declaration template, not a composite rule",
            field_type.name()
        )),
        SelectorRule::Template { template, .. } => {
            let tokens = field_type.token_names();
            if tokens.is_empty() {
                return Err(format!(
                    "`{}` fields write their own declarations; use a composite rule",
                    field_type.name()
                ));
            }
            match template.placeholders().find(|p| !tokens.contains(p)) {
                Some(bad) => Err(format!(
                    "`{}` fields do not produce {{{{{bad}}}}}",
                    field_type.name()
                )),
                None => Ok(()),
            }
        }
        SelectorRule::Composite { .. } => Ok(()),
    }
}

fn check_attribute_template(field_type: FieldType, template: &Template, attribute: &str) -> Result<(), String> {
    if field_type.is_structured() || field_type.is_composite() || field_type == FieldType::Dimension {
        return Err(format!(
            "`{}` fields cannot map to the {attribute} attribute",
            field_type.name()
        ));
    }
    let tokens = field_type.token_names();
    match template.placeholders().find(|p| !tokens.contains(p)) {
        Some(bad) => Err(format!("`{}` fields do not produce {{{{{bad}}}}}", field_type.name())),
        None => Ok(()),
    }
}
