//! Condition expression evaluation
//!
//! Conditions are the three-token expressions entered in the condition
//! step, e.g. `patient.age > 65` or `status == active`. Malformed input is
//! logged and evaluates to false; this function never errors to the caller.

use log::warn;
use serde_json::Value;

/// Operators accepted in a condition expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
}

impl ConditionOperator {
    /// Parse an operator token; unknown tokens are rejected.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            "contains" => Some(Self::Contains),
            "not_contains" => Some(Self::NotContains),
            "starts_with" => Some(Self::StartsWith),
            "ends_with" => Some(Self::EndsWith),
            "is_empty" => Some(Self::IsEmpty),
            "is_not_empty" => Some(Self::IsNotEmpty),
            _ => None,
        }
    }
}

/// Evaluate a condition expression against a data object.
///
/// The expression must be exactly three whitespace-separated tokens:
/// `field operator value`. The field is resolved by dot-path lookup into
/// `data`. Any malformed expression evaluates to false.
pub fn evaluate_condition(expression: &str, data: &Value) -> bool {
    let tokens: Vec<&str> = expression.split_whitespace().collect();
    let &[field, operator, value] = tokens.as_slice() else {
        warn!(
            "Malformed condition (expected 3 tokens, got {}): {:?}",
            tokens.len(),
            expression
        );
        return false;
    };

    let Some(operator) = ConditionOperator::parse(operator) else {
        warn!("Unknown condition operator: {:?}", operator);
        return false;
    };

    let resolved = resolve_path(data, field);
    apply_operator(&resolved, operator, value)
}

/// Resolve a dot-separated path into a JSON object; missing paths yield null.
fn resolve_path(data: &Value, path: &str) -> Value {
    let mut current = data;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return Value::Null,
        }
    }
    current.clone()
}

fn apply_operator(resolved: &Value, operator: ConditionOperator, value: &str) -> bool {
    match operator {
        ConditionOperator::Eq => value_as_string(resolved) == value,
        ConditionOperator::Ne => value_as_string(resolved) != value,
        ConditionOperator::Gt => match (value_as_f64(resolved), value.parse::<f64>()) {
            (Some(left), Ok(right)) => left > right,
            _ => false,
        },
        ConditionOperator::Lt => match (value_as_f64(resolved), value.parse::<f64>()) {
            (Some(left), Ok(right)) => left < right,
            _ => false,
        },
        ConditionOperator::Contains => value_as_string(resolved).contains(value),
        ConditionOperator::NotContains => !value_as_string(resolved).contains(value),
        ConditionOperator::StartsWith => value_as_string(resolved).starts_with(value),
        ConditionOperator::EndsWith => value_as_string(resolved).ends_with(value),
        // The value token is required by the tokenizer but ignored here.
        ConditionOperator::IsEmpty => is_empty(resolved),
        ConditionOperator::IsNotEmpty => !is_empty(resolved),
    }
}

fn value_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}
