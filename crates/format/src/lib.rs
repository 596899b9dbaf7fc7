//! Deterministic formatting of numeric values for table cells and bound text.
//!
//! Rounding never multiplies binary floats. A value is first rendered as its
//! shortest round-trip decimal string, and the rounding to two places happens
//! on that digit string as a scaled integer. `1.005` therefore formats as
//! `1.01` on every platform.

mod decimal;

use decimal::Decimal;
use serde_json::{Number, Value};

/// Prefix used by [`FormatKind::Currency`].
pub const CURRENCY_SYMBOL: &str = "$";

/// How a numeric value should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatKind {
    #[default]
    Plain,
    Currency,
    Percent,
}

impl FormatKind {
    /// Maps a column `format` attribute. Unknown names fall back to plain.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "currency" => FormatKind::Currency,
            "percent" => FormatKind::Percent,
            _ => FormatKind::Plain,
        }
    }
}

/// Formats a data value for display.
///
/// `null` becomes the empty string and strings pass through untouched.
/// Numbers are formatted according to `kind`; booleans, arrays and objects
/// have no textual form here and also become empty.
pub fn format_value(value: &Value, kind: FormatKind) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => format_integer_as(n, kind)
            .or_else(|| n.as_f64().map(|v| format_number_as(v, kind)))
            .unwrap_or_default(),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Integers are printed from their exact digits, so values beyond 2^53 keep
/// their precision. Returns `None` for numbers with a fractional form.
fn format_integer_as(n: &Number, kind: FormatKind) -> Option<String> {
    let digits = match (n.as_i64(), n.as_u64()) {
        (Some(i), _) => i.to_string(),
        (None, Some(u)) => u.to_string(),
        (None, None) => return None,
    };
    Some(match kind {
        FormatKind::Plain => digits,
        FormatKind::Currency => format!("{}{}", CURRENCY_SYMBOL, digits),
        FormatKind::Percent if digits == "0" => "0%".to_string(),
        FormatKind::Percent => format!("{}00%", digits),
    })
}

/// Formats a number according to `kind`.
pub fn format_number_as(value: f64, kind: FormatKind) -> String {
    match kind {
        FormatKind::Plain => format_number(value),
        FormatKind::Currency => format!("{}{}", CURRENCY_SYMBOL, format_number(value)),
        FormatKind::Percent => match Decimal::from_f64(value) {
            Some(d) => format!("{}%", d.shift_left(2).to_plain_string()),
            None => format!("{}%", value * 100.0),
        },
    }
}

/// Integral values print without a decimal point, everything else is rounded
/// half-up (away from zero) to exactly two decimals.
pub fn format_number(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(d) => d.to_plain_string(),
        None => value.to_string(),
    }
}
