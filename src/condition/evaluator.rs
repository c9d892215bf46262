//! Condition evaluation.

use std::cmp::Ordering;

use serde_json::Value;

use crate::condition::model::{Clause, Condition, Operator};
use crate::settings::{KeyPath, ResponsiveValue, ValueSource};

/// Evaluate `condition` against `source`.
///
/// `scope` is the key path of the group that owns the conditional field:
/// single-segment clause fields are looked up as siblings inside it, dotted
/// clause fields are absolute paths from the settings root. All clauses must
/// hold. Never fails: a clause naming a field the source does not know is unmet.
pub fn evaluate(condition: &Condition, source: &dyn ValueSource, scope: &KeyPath) -> bool {
    condition
        .clauses()
        .iter()
        .all(|clause| evaluate_clause(clause, source, scope))
}

/// Resolve a clause's field against the conditional field's group.
pub fn target_path(clause: &Clause, scope: &KeyPath) -> KeyPath {
    if clause.field.len() == 1 {
        scope.join(&clause.field)
    } else {
        clause.field.clone()
    }
}

fn evaluate_clause(clause: &Clause, source: &dyn ValueSource, scope: &KeyPath) -> bool {
    let path = target_path(clause, scope);
    if !source.has_field(&path) {
        tracing::debug!(field = %path, "condition references an unknown field");
        return false;
    }

    // Conditions compare the desktop value of responsive settings.
    let actual = source.value_at(&path).and_then(|value| {
        if ResponsiveValue::is_responsive_map(value) {
            value.get("desktop").filter(|v| !v.is_null())
        } else {
            Some(value)
        }
    });

    let Some(actual) = actual else {
        return clause.op == Operator::Neq && !is_empty(&clause.value);
    };

    match clause.op {
        Operator::Eq => actual == &clause.value,
        Operator::Neq => actual != &clause.value,
        Operator::Gt => compare_numbers(actual, &clause.value) == Some(Ordering::Greater),
        Operator::Lt => compare_numbers(actual, &clause.value) == Some(Ordering::Less),
        Operator::In => clause
            .value
            .as_array()
            .is_some_and(|list| list.contains(actual)),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    as_number(a)?.partial_cmp(&as_number(b)?)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
