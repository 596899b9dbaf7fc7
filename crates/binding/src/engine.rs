//! The evaluation engine for executing a parsed action.
use super::ast::{Command, Operand, Pipeline};
use super::functions::HelperRegistry;
use crate::error::BindingError;
use serde_json::Value;

/// A container for all state needed during evaluation.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// What `.` refers to.
    pub dot: &'a Value,
    /// What `$` refers to.
    pub root: &'a Value,
    pub helpers: &'a HelperRegistry,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(data: &'a Value, helpers: &'a HelperRegistry) -> Self {
        Self { dot: data, root: data, helpers }
    }
}

/// Evaluates a pipeline to a `serde_json::Value`.
pub fn evaluate(pipeline: &Pipeline, e_ctx: &EvaluationContext) -> Result<Value, BindingError> {
    let mut previous: Option<Value> = None;
    for command in &pipeline.commands {
        previous = Some(evaluate_command(command, previous.take(), e_ctx)?);
    }
    Ok(previous.unwrap_or(Value::Null))
}

fn evaluate_command(
    command: &Command,
    piped: Option<Value>,
    e_ctx: &EvaluationContext,
) -> Result<Value, BindingError> {
    match command {
        Command::Call { name, args } => {
            let helper = e_ctx
                .helpers
                .get(name)
                .ok_or_else(|| BindingError::UnknownHelper(name.clone()))?;
            let mut evaluated_args = args
                .iter()
                .map(|arg| evaluate_operand(arg, e_ctx))
                .collect::<Result<Vec<_>, _>>()?;
            evaluated_args.extend(piped);
            helper(evaluated_args).map_err(|message| BindingError::Helper {
                helper: name.clone(),
                message,
            })
        }
        Command::Operand(operand) => match piped {
            Some(_) => Err(BindingError::Type(
                "Only helpers can receive a piped value".to_string(),
            )),
            None => evaluate_operand(operand, e_ctx),
        },
    }
}

fn evaluate_operand(operand: &Operand, e_ctx: &EvaluationContext) -> Result<Value, BindingError> {
    match operand {
        Operand::Literal(val) => Ok(val.clone()),
        Operand::Field(path) => select(path, e_ctx.dot),
        Operand::Root(path) => select(path, e_ctx.root),
        Operand::Nested(pipeline) => evaluate(pipeline, e_ctx),
    }
}

static MISSING: Value = Value::Null;

/// Walks `path` from `start`. A missing final key yields `null`; stepping
/// through `null` or a non-object is an error.
pub fn select(path: &[String], start: &Value) -> Result<Value, BindingError> {
    let mut current = start;
    for key in path {
        current = match current {
            Value::Object(map) => map.get(key).unwrap_or(&MISSING),
            Value::Null => {
                return Err(BindingError::Type(format!(
                    "Cannot read field '{}' of a missing value",
                    key
                )));
            }
            other => {
                return Err(BindingError::Type(format!(
                    "Cannot read field '{}' of {}",
                    key,
                    type_name(other)
                )));
            }
        };
    }
    Ok(current.clone())
}

/// Converts an evaluated value to its printed form. `null` has no printed form.
pub fn print_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(print_nested(other)),
    }
}

fn print_nested(value: &Value) -> String {
    match value {
        Value::Null => "<nil>".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(v) if n.is_f64() => print_number(v),
            _ => n.to_string(),
        },
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(print_nested).collect();
            format!("[{}]", parts.join(" "))
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let parts: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}:{}", k, print_nested(&map[k])))
                .collect();
            format!("map[{}]", parts.join(" "))
        }
    }
}

/// Whole numbers print without a fraction.
pub fn print_number(v: f64) -> String {
    if v == 0.0 { "0".to_string() } else { v.to_string() }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn select_walks_objects() {
        let data = json!({ "customer": { "name": "ACME" } });
        assert_eq!(select(&path(&["customer", "name"]), &data).unwrap(), json!("ACME"));
        assert_eq!(select(&[], &data).unwrap(), data);
    }

    #[test]
    fn missing_leaf_is_null() {
        let data = json!({ "customer": {} });
        assert_eq!(select(&path(&["customer", "name"]), &data).unwrap(), Value::Null);
    }

    #[test]
    fn stepping_through_missing_or_scalar_fails() {
        let data = json!({ "count": 3 });
        assert!(select(&path(&["missing", "name"]), &data).is_err());
        assert!(select(&path(&["count", "name"]), &data).is_err());
        assert!(select(&path(&["missing", "name", "first"]), &data).is_err());
    }

    #[test]
    fn prints_numbers_without_trailing_zeros() {
        assert_eq!(print_value(&json!(25.0)).unwrap(), "25");
        assert_eq!(print_value(&json!(500)).unwrap(), "500");
        assert_eq!(print_value(&json!(2.5)).unwrap(), "2.5");
        assert_eq!(print_value(&json!(-0.0)).unwrap(), "0");
        assert_eq!(print_value(&json!(9007199254740993u64)).unwrap(), "9007199254740993");
    }

    #[test]
    fn prints_composites() {
        assert_eq!(print_value(&json!(["a", 1, null])).unwrap(), "[a 1 <nil>]");
        assert_eq!(print_value(&json!({"b": 2, "a": true})).unwrap(), "map[a:true b:2]");
        assert_eq!(print_value(&Value::Null), None);
    }
}
