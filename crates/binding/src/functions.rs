//! Defines the registry and built-in helpers available inside actions.
use super::engine::type_name;
use quire_format::{FormatKind, format_value};
use serde_json::{Number, Value};
use std::collections::HashMap;

/// The signature for a helper. Errors are reported as a plain message.
pub type Helper = fn(args: Vec<Value>) -> Result<Value, String>;

/// A registry to hold all helpers available to the evaluation engine.
pub struct HelperRegistry {
    helpers: HashMap<String, Helper>,
}

impl HelperRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self { helpers: HashMap::new() }
    }

    /// Registers a helper, replacing any previous one with the same name.
    pub fn register(&mut self, name: &str, helper: Helper) {
        self.helpers.insert(name.to_lowercase(), helper);
    }

    /// Finds a helper by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(&name.to_lowercase())
    }
}

// --- Argument helpers ---

fn exactly<const N: usize>(args: Vec<Value>) -> Result<[Value; N], String> {
    let got = args.len();
    args.try_into()
        .map_err(|_| format!("wrong number of args: want {} got {}", N, got))
}

fn string_arg(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected string; got {}", type_name(value)))
}

fn number_arg(value: &Value) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("expected number; got {}", type_name(value)))
}

fn number_value(v: f64) -> Result<Value, String> {
    Number::from_f64(v)
        .map(Value::Number)
        .ok_or_else(|| format!("result {} is not a finite number", v))
}

// --- Built-in Helper Implementations ---

fn upper(args: Vec<Value>) -> Result<Value, String> {
    let [s] = exactly(args)?;
    Ok(string_arg(&s)?.to_uppercase().into())
}

fn lower(args: Vec<Value>) -> Result<Value, String> {
    let [s] = exactly(args)?;
    Ok(string_arg(&s)?.to_lowercase().into())
}

fn trim(args: Vec<Value>) -> Result<Value, String> {
    let [s] = exactly(args)?;
    Ok(string_arg(&s)?.trim().into())
}

/// Upper-cases the first letter of every word.
fn title(args: Vec<Value>) -> Result<Value, String> {
    let [s] = exactly(args)?;
    let mut out = String::new();
    let mut at_word_start = true;
    for c in string_arg(&s)?.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = is_word_separator(c);
    }
    Ok(out.into())
}

fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    c.is_whitespace()
}

/// `default FALLBACK VALUE` yields VALUE unless it is nil or empty.
fn default(args: Vec<Value>) -> Result<Value, String> {
    let [fallback, value] = exactly(args)?;
    Ok(match &value {
        Value::Null => fallback,
        Value::String(s) if s.is_empty() => fallback,
        _ => value,
    })
}

fn add(args: Vec<Value>) -> Result<Value, String> {
    let [a, b] = exactly(args)?;
    number_value(number_arg(&a)? + number_arg(&b)?)
}

fn sub(args: Vec<Value>) -> Result<Value, String> {
    let [a, b] = exactly(args)?;
    number_value(number_arg(&a)? - number_arg(&b)?)
}

fn mul(args: Vec<Value>) -> Result<Value, String> {
    let [a, b] = exactly(args)?;
    number_value(number_arg(&a)? * number_arg(&b)?)
}

/// Division by zero yields zero.
fn div(args: Vec<Value>) -> Result<Value, String> {
    let [a, b] = exactly(args)?;
    let (a, b) = (number_arg(&a)?, number_arg(&b)?);
    if b == 0.0 {
        return number_value(0.0);
    }
    number_value(a / b)
}

fn number(args: Vec<Value>) -> Result<Value, String> {
    let [v] = exactly(args)?;
    Ok(format_value(&v, FormatKind::Plain).into())
}

fn currency(args: Vec<Value>) -> Result<Value, String> {
    let [v] = exactly(args)?;
    Ok(format_value(&v, FormatKind::Currency).into())
}

fn percent(args: Vec<Value>) -> Result<Value, String> {
    let [v] = exactly(args)?;
    Ok(format_value(&v, FormatKind::Percent).into())
}

impl Default for HelperRegistry {
    /// Creates a new registry populated with all built-in helpers.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("upper", upper);
        registry.register("lower", lower);
        registry.register("title", title);
        registry.register("trim", trim);
        registry.register("default", default);
        registry.register("add", add);
        registry.register("sub", sub);
        registry.register("mul", mul);
        registry.register("div", div);
        registry.register("number", number);
        registry.register("currency", currency);
        registry.register("percent", percent);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str, args: Vec<Value>) -> Result<Value, String> {
        let registry = HelperRegistry::default();
        let helper = registry.get(name).expect("builtin");
        helper(args)
    }

    #[test]
    fn string_helpers() {
        assert_eq!(call("upper", vec![json!("abc")]).unwrap(), json!("ABC"));
        assert_eq!(call("lower", vec![json!("ABC")]).unwrap(), json!("abc"));
        assert_eq!(call("trim", vec![json!("  x ")]).unwrap(), json!("x"));
        assert_eq!(
            call("title", vec![json!("hello wide-world_x")]).unwrap(),
            json!("Hello Wide-World_x")
        );
    }

    #[test]
    fn string_helpers_reject_numbers() {
        let err = call("upper", vec![json!(3)]).unwrap_err();
        assert!(err.contains("expected string"));
    }

    #[test]
    fn arity_is_checked() {
        let err = call("upper", vec![json!("a"), json!("b")]).unwrap_err();
        assert_eq!(err, "wrong number of args: want 1 got 2");
    }

    #[test]
    fn default_substitutes_nil_and_empty() {
        assert_eq!(call("default", vec![json!("x"), Value::Null]).unwrap(), json!("x"));
        assert_eq!(call("default", vec![json!("x"), json!("")]).unwrap(), json!("x"));
        assert_eq!(call("default", vec![json!("x"), json!(0)]).unwrap(), json!(0));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(call("add", vec![json!(1), json!(2.5)]).unwrap(), json!(3.5));
        assert_eq!(call("sub", vec![json!(1), json!(3)]).unwrap(), json!(-2.0));
        assert_eq!(call("mul", vec![json!(4), json!(2.5)]).unwrap(), json!(10.0));
        assert_eq!(call("div", vec![json!(9), json!(3)]).unwrap(), json!(3.0));
        assert_eq!(call("div", vec![json!(9), json!(0)]).unwrap(), json!(0.0));
        assert!(call("add", vec![json!("1"), json!(2)]).is_err());
    }

    #[test]
    fn formatting_helpers() {
        assert_eq!(call("currency", vec![json!(1.005)]).unwrap(), json!("$1.01"));
        assert_eq!(call("percent", vec![json!(0.25)]).unwrap(), json!("25%"));
        assert_eq!(call("number", vec![json!(7)]).unwrap(), json!("7"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = HelperRegistry::default();
        assert!(registry.get("UPPER").is_some());
        assert!(registry.get("nope").is_none());
    }
}
