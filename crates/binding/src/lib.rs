//! Data binding for report text.
//!
//! Text fragments may embed `{{ ... }}` actions: field paths (`.customer.name`),
//! literals, helper calls (`upper .name`) and pipelines (`.total | currency`).
//! Resolution fails open: if anything goes wrong the original fragment is
//! returned unchanged, so a bad placeholder shows up verbatim in the output
//! instead of aborting the report.

pub mod ast;
pub mod engine;
pub mod error;
mod fragment;
pub mod functions;
mod parser;

use std::borrow::Cow;

use fragment::Segment;
use serde_json::Value;

// --- Public API ---
pub use ast::{Command, Operand, Pipeline};
pub use engine::{EvaluationContext, evaluate, print_value};
pub use error::BindingError;
pub use functions::{Helper, HelperRegistry};
pub use parser::parse_action;

/// Resolves text fragments against a data document.
#[derive(Default)]
pub struct Binder {
    helpers: HelperRegistry,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_helpers(helpers: HelperRegistry) -> Self {
        Self { helpers }
    }

    pub fn helpers_mut(&mut self) -> &mut HelperRegistry {
        &mut self.helpers
    }

    /// Substitutes every action in `fragment`. Fragments without `{{` are
    /// returned borrowed and untouched.
    pub fn resolve<'a>(&self, fragment: &'a str, data: &Value) -> Cow<'a, str> {
        if !fragment.contains(fragment::OPEN) {
            return Cow::Borrowed(fragment);
        }
        match self.try_resolve(fragment, data) {
            Ok(resolved) => Cow::Owned(resolved),
            Err(e) => {
                log::debug!("Leaving '{}' unresolved: {}", fragment, e);
                Cow::Borrowed(fragment)
            }
        }
    }

    /// Like [`Binder::resolve`], but reports why a fragment could not be bound.
    pub fn try_resolve(&self, fragment: &str, data: &Value) -> Result<String, BindingError> {
        let e_ctx = EvaluationContext::new(data, &self.helpers);
        let mut out = String::with_capacity(fragment.len());
        for segment in fragment::split(fragment)? {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Comment => {}
                Segment::Action(pipeline) => {
                    let value = evaluate(&pipeline, &e_ctx)?;
                    let printed = print_value(&value)
                        .ok_or_else(|| BindingError::NoValue(fragment.to_string()))?;
                    out.push_str(&printed);
                }
            }
        }
        Ok(out)
    }
}

/// Turns a data source reference such as `{{.items}}` into the lookup key
/// `items`. Plain keys, and anything too short to hold a placeholder, pass
/// through unchanged.
pub fn extract_data_key(fragment: &str) -> &str {
    if fragment.len() < 5 {
        return fragment;
    }
    let key = fragment.trim();
    let key = key.strip_prefix(fragment::OPEN).unwrap_or(key);
    let key = key.strip_suffix(fragment::CLOSE).unwrap_or(key);
    let key = key.trim();
    key.strip_prefix('.').unwrap_or(key).trim()
}

/// Finds `key` in `data`. An exact top-level key wins; otherwise the key is
/// treated as a dotted path.
pub fn lookup<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return None;
    }
    if let Some(found) = data.get(key) {
        return Some(found);
    }
    key.split('.')
        .try_fold(data, |current, part| current.get(part))
}

/// [`extract_data_key`] followed by [`lookup`].
pub fn resolve_data_source<'a>(data: &'a Value, fragment: &str) -> Option<&'a Value> {
    lookup(data, extract_data_key(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> Value {
        json!({
            "title": "Quarterly report",
            "customer": { "name": "acme corp", "tier": "" },
            "total": 1234.5,
            "count": 3,
            "empty": "",
            "items": [1, 2],
            "orders.recent": "flat key"
        })
    }

    #[test]
    fn fragments_without_actions_are_borrowed() {
        let binder = Binder::new();
        let text = "Plain text with { single } braces";
        match binder.resolve(text, &data()) {
            Cow::Borrowed(s) => assert!(std::ptr::eq(s, text)),
            Cow::Owned(_) => panic!("expected the input to be returned as-is"),
        }
    }

    #[test]
    fn substitutes_fields() {
        let binder = Binder::new();
        assert_eq!(
            binder.resolve("Report: {{.title}} for {{ .customer.name }}", &data()),
            "Report: Quarterly report for acme corp"
        );
        assert_eq!(binder.resolve("{{.count}} items", &data()), "3 items");
        assert_eq!(binder.resolve("{{$.title}}", &data()), "Quarterly report");
    }

    #[test]
    fn helpers_and_pipelines() {
        let binder = Binder::new();
        assert_eq!(binder.resolve("{{upper .title}}", &data()), "QUARTERLY REPORT");
        assert_eq!(binder.resolve("{{.customer.name | title}}", &data()), "Acme Corp");
        assert_eq!(binder.resolve("{{.total | currency}}", &data()), "$1234.50");
        assert_eq!(binder.resolve("{{div .total 0}}", &data()), "0");
        assert_eq!(binder.resolve("{{add .count 2}}", &data()), "5");
        assert_eq!(binder.resolve("{{mul (add .count 1) 2}}", &data()), "8");
    }

    #[test]
    fn default_covers_missing_and_empty() {
        let binder = Binder::new();
        assert_eq!(binder.resolve(r#"{{default "n/a" .missing}}"#, &data()), "n/a");
        assert_eq!(binder.resolve(r#"{{.empty | default "none"}}"#, &data()), "none");
        assert_eq!(binder.resolve(r#"{{default "std" .customer.tier}}"#, &data()), "std");
    }

    #[test]
    fn string_literals_may_contain_the_close_delimiter() {
        let binder = Binder::new();
        assert_eq!(binder.resolve(r#"{{ "a}}b" }}"#, &data()), "a}}b");
        assert_eq!(binder.resolve("[{{ `}}` }}]", &data()), "[}}]");
    }

    #[test]
    fn default_does_not_hide_a_missing_parent() {
        let binder = Binder::new();
        let fragment = r#"{{.missing.name | default "x"}}"#;
        assert_eq!(binder.resolve(fragment, &data()), fragment);
        assert!(matches!(binder.try_resolve(fragment, &data()), Err(BindingError::Type(_))));
    }

    #[test]
    fn failures_return_the_fragment_unchanged() {
        let binder = Binder::new();
        for fragment in [
            "Hello {{.missing}}",
            "Hello {{.missing.deeper}}",
            "Hello {{nosuchhelper .title}}",
            "Hello {{upper .count}}",
            "Hello {{.title",
            "Hello {{ | }}",
        ] {
            assert_eq!(binder.resolve(fragment, &data()), fragment);
        }
    }

    #[test]
    fn try_resolve_reports_the_cause() {
        let binder = Binder::new();
        assert!(matches!(
            binder.try_resolve("{{nosuch}}", &data()),
            Err(BindingError::UnknownHelper(_))
        ));
        assert!(matches!(
            binder.try_resolve("{{.missing}}", &data()),
            Err(BindingError::NoValue(_))
        ));
    }

    #[test]
    fn custom_helpers_can_be_registered() {
        fn shout(args: Vec<Value>) -> Result<Value, String> {
            let text = args.first().and_then(Value::as_str).unwrap_or_default();
            Ok(format!("{}!", text).into())
        }
        let mut binder = Binder::new();
        binder.helpers_mut().register("shout", shout);
        assert_eq!(binder.resolve("{{shout .title}}", &data()), "Quarterly report!");
    }

    #[test]
    fn data_keys_are_extracted() {
        assert_eq!(extract_data_key("{{.items}}"), "items");
        assert_eq!(extract_data_key("{{ .items }}"), "items");
        assert_eq!(extract_data_key("items"), "items");
        assert_eq!(extract_data_key(".ab"), ".ab");
        assert_eq!(extract_data_key("{{.orders.recent}}"), "orders.recent");
    }

    #[test]
    fn lookup_prefers_flat_keys_then_paths() {
        let data = data();
        assert_eq!(lookup(&data, "orders.recent"), Some(&json!("flat key")));
        assert_eq!(lookup(&data, "customer.name"), Some(&json!("acme corp")));
        assert_eq!(lookup(&data, "nope"), None);
        assert_eq!(lookup(&data, ""), None);
        assert_eq!(resolve_data_source(&data, "{{.items}}"), Some(&json!([1, 2])));
    }
}
