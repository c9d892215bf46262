//! Condition model and JSON forms.
//!
//! A condition is an implicit AND over one or more clauses. Three JSON shapes
//! are accepted:
//!
//! ```text
//! { "field": "show_icon", "op": "eq", "value": true }   // one clause, op defaults to eq
//! { "show_icon": true, "layout": "inline" }             // AND of equality checks
//! [ { "field": "size", "op": "gt", "value": 10 }, ... ] // AND of clauses
//! ```

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::settings::KeyPath;

/// Errors from reading a condition out of JSON.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConditionError {
    #[error("unknown condition operator `{0}`")]
    UnknownOperator(String),
    #[error("malformed condition: {0}")]
    Malformed(String),
}

/// Comparison operator of one clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Strict equality.
    #[default]
    Eq,
    Neq,
    /// Numeric greater-than.
    Gt,
    /// Numeric less-than.
    Lt,
    /// Membership in a list.
    In,
}

impl Operator {
    /// Parse an operator name (`eq`, `neq`, `gt`, `lt`, `in`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "eq" => Some(Operator::Eq),
            "neq" => Some(Operator::Neq),
            "gt" => Some(Operator::Gt),
            "lt" => Some(Operator::Lt),
            "in" => Some(Operator::In),
            _ => None,
        }
    }

    /// The operator's name.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::In => "in",
        }
    }
}

/// One comparison: `field op value`.
///
/// A single-segment `field` names a sibling in the conditional field's own
/// group; a dotted `field` is an absolute path from the settings root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    pub field: KeyPath,
    pub op: Operator,
    pub value: Value,
}

impl Clause {
    pub fn new(field: impl Into<KeyPath>, op: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    fn from_object(map: &Map<String, Value>) -> Result<Self, ConditionError> {
        if let Some(extra) = map.keys().find(|k| !matches!(k.as_str(), "field" | "op" | "value")) {
            return Err(ConditionError::Malformed(format!(
                "clause mixes `field` with unrelated key `{extra}`"
            )));
        }
        let field = map
            .get("field")
            .and_then(Value::as_str)
            .filter(|f| !f.is_empty())
            .ok_or_else(|| ConditionError::Malformed("`field` must be a non-empty string".into()))?;
        let op = match map.get("op") {
            None => Operator::Eq,
            Some(Value::String(name)) => Operator::from_name(name)
                .ok_or_else(|| ConditionError::UnknownOperator(name.clone()))?,
            Some(other) => {
                return Err(ConditionError::Malformed(format!("`op` must be a string, got {other}")));
            }
        };
        let value = map.get("value").cloned().unwrap_or(Value::Null);
        if op == Operator::In && !value.is_array() {
            return Err(ConditionError::Malformed(format!(
                "`in` on `{field}` needs a list value"
            )));
        }
        Ok(Self::new(field, op, value))
    }
}

/// An implicit AND over one or more clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    clauses: Vec<Clause>,
}

impl Condition {
    /// `field == value`.
    pub fn when(field: impl Into<KeyPath>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    /// `field <op> value`.
    pub fn new(field: impl Into<KeyPath>, op: Operator, value: impl Into<Value>) -> Self {
        Self {
            clauses: vec![Clause::new(field, op, value)],
        }
    }

    /// Add another clause that must also hold.
    pub fn and(mut self, field: impl Into<KeyPath>, op: Operator, value: impl Into<Value>) -> Self {
        self.clauses.push(Clause::new(field, op, value));
        self
    }

    /// The clauses, all of which must hold.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Read a condition from any of the accepted JSON forms.
    pub fn from_json(value: &Value) -> Result<Self, ConditionError> {
        let clauses = match value {
            Value::Object(map) if map.contains_key("field") => vec![Clause::from_object(map)?],
            Value::Object(map) if !map.is_empty() => map
                .iter()
                .map(|(field, expected)| Clause::new(field.as_str(), Operator::Eq, expected.clone()))
                .collect(),
            Value::Array(items) if !items.is_empty() => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => Clause::from_object(map),
                    other => Err(ConditionError::Malformed(format!(
                        "list entries must be clause objects, got {other}"
                    ))),
                })
                .collect::<Result<_, _>>()?,
            other => {
                return Err(ConditionError::Malformed(format!(
                    "expected a clause, a field map or a clause list, got {other}"
                )));
            }
        };
        Ok(Self { clauses })
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let [single] = self.clauses.as_slice() {
            return single.serialize(serializer);
        }
        let mut seq = serializer.serialize_seq(Some(self.clauses.len()))?;
        for clause in &self.clauses {
            seq.serialize_element(clause)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_clause_defaults_to_eq() {
        let c = Condition::from_json(&json!({"field": "show_icon", "value": true})).unwrap();
        assert_eq!(c.clauses(), &[Clause::new("show_icon", Operator::Eq, true)]);
    }

    #[test]
    fn test_explicit_operator() {
        let c = Condition::from_json(&json!({"field": "size", "op": "gt", "value": 10})).unwrap();
        assert_eq!(c.clauses()[0].op, Operator::Gt);
    }

    #[test]
    fn test_field_map_is_implicit_and() {
        let c = Condition::from_json(&json!({"show_icon": true, "layout": "inline"})).unwrap();
        assert_eq!(c.clauses().len(), 2);
        assert!(c.clauses().iter().all(|cl| cl.op == Operator::Eq));
    }

    #[test]
    fn test_clause_list() {
        let c = Condition::from_json(&json!([
            {"field": "a", "value": 1},
            {"field": "b", "op": "neq", "value": "x"}
        ]))
        .unwrap();
        assert_eq!(c.clauses().len(), 2);
        assert_eq!(c.clauses()[1].op, Operator::Neq);
    }

    #[test]
    fn test_unknown_operator() {
        let err = Condition::from_json(&json!({"field": "a", "op": "gte", "value": 1})).unwrap_err();
        assert_eq!(err, ConditionError::UnknownOperator("gte".into()));
    }

    #[test]
    fn test_ambiguous_mixed_form_is_rejected() {
        let err = Condition::from_json(&json!({"field": "a", "value": 1, "other": 2})).unwrap_err();
        assert!(matches!(err, ConditionError::Malformed(_)));
    }

    #[test]
    fn test_in_requires_list() {
        let err = Condition::from_json(&json!({"field": "a", "op": "in", "value": 1})).unwrap_err();
        assert!(matches!(err, ConditionError::Malformed(_)));
    }

    #[test]
    fn test_empty_forms_are_rejected() {
        assert!(Condition::from_json(&json!({})).is_err());
        assert!(Condition::from_json(&json!([])).is_err());
        assert!(Condition::from_json(&json!("show_icon")).is_err());
    }

    #[test]
    fn test_builder_and() {
        let c = Condition::when("show_icon", true).and("icon_size", Operator::Gt, 0);
        assert_eq!(c.clauses().len(), 2);
    }

    #[test]
    fn test_serialize_single_and_multiple() {
        let single = Condition::when("show_icon", true);
        assert_eq!(
            serde_json::to_value(&single).unwrap(),
            json!({"field": "show_icon", "op": "eq", "value": true})
        );
        let multi = single.and("layout", Operator::In, json!(["a", "b"]));
        assert_eq!(
            serde_json::to_value(&multi).unwrap(),
            json!([
                {"field": "show_icon", "op": "eq", "value": true},
                {"field": "layout", "op": "in", "value": ["a", "b"]}
            ])
        );
    }
}
