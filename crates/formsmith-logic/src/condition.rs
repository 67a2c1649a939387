//! Single-rule evaluation.
//!
//! Values are compared the way the exported forms compare them in the
//! browser, so a preview and a generated form always agree on visibility.

use std::sync::LazyLock;

use formsmith_core::enums::Operator;
use formsmith_core::field::Rule;
use formsmith_core::pattern;
use formsmith_core::values::{FormValue, FormValues};
use regex::Regex;

static LEADING_FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(Infinity|[0-9]+\.?[0-9]*([eE][+-]?[0-9]+)?|\.[0-9]+([eE][+-]?[0-9]+)?)")
        .expect("float pattern compiles")
});

/// Evaluates one rule against the current values. Never fails.
///
/// A rule naming a field with no entry sees an absent value. Unknown
/// operators evaluate to `true`.
pub fn evaluate(rule: &Rule, values: &FormValues) -> bool {
    let current = values.get(&rule.field);
    let expected = rule.value.as_str();

    match rule.operator {
        Operator::Equals => loose_equals(current, expected),
        Operator::NotEquals => !loose_equals(current, expected),
        Operator::Contains => text_of(current).contains(expected),
        Operator::StartsWith => text_of(current).starts_with(expected),
        Operator::EndsWith => text_of(current).ends_with(expected),
        Operator::GreaterThan => leading_float(&text_of(current)) > leading_float(expected),
        Operator::LessThan => leading_float(&text_of(current)) < leading_float(expected),
        Operator::IsEmpty => is_empty(current),
        Operator::IsNotEmpty => !is_empty(current),
        Operator::Matches => pattern::is_match(expected, &text_of(current)),
        Operator::In => is_member(current, expected),
        Operator::NotIn => !is_member(current, expected),
        Operator::Checked | Operator::IsChecked | Operator::True | Operator::IsTrue => {
            is_checked(current, expected)
        }
        Operator::NotChecked | Operator::False => !is_checked(current, expected),
        Operator::Custom(_) => true,
    }
}

/// Text form of a value; absent values read as the empty string.
fn text_of(value: Option<&FormValue>) -> String {
    value.map(FormValue::to_text).unwrap_or_default()
}

/// Loose equality between a current value and a rule's literal.
fn loose_equals(current: Option<&FormValue>, expected: &str) -> bool {
    match current {
        None => false,
        Some(FormValue::Text(s)) => s == expected,
        Some(FormValue::List(items)) => items.join(",") == expected,
        Some(FormValue::Number(n)) => *n == to_number(expected),
        Some(FormValue::Bool(b)) => f64::from(u8::from(*b)) == to_number(expected),
    }
}

fn is_empty(current: Option<&FormValue>) -> bool {
    match current {
        None => true,
        Some(FormValue::List(items)) => items.is_empty(),
        Some(v) => v.is_falsy(),
    }
}

fn is_member(current: Option<&FormValue>, expected: &str) -> bool {
    let allowed: Vec<&str> = expected.split(',').map(str::trim).collect();
    match current {
        None => false,
        Some(FormValue::List(items)) => items.iter().any(|i| allowed.contains(&i.as_str())),
        Some(v) => allowed.contains(&v.to_text().as_str()),
    }
}

/// Whether a checkbox-style value is on. With no rule value, the text
/// `"false"` counts as unchecked even though it is a non-empty string.
fn is_checked(current: Option<&FormValue>, expected: &str) -> bool {
    match current {
        None => false,
        Some(FormValue::List(items)) if expected.is_empty() => !items.is_empty(),
        Some(FormValue::List(items)) => items.iter().any(|i| i == expected),
        Some(FormValue::Text(s)) if expected.is_empty() => !s.is_empty() && s != "false",
        Some(FormValue::Text(s)) => s == expected,
        Some(FormValue::Bool(b)) => *b,
        Some(FormValue::Number(n)) => *n == 1.0,
    }
}

/// Whole-string numeric conversion: blank is zero, anything that is not
/// a complete number is NaN.
pub fn to_number(input: &str) -> f64 {
    let s = input.trim();
    if s.is_empty() {
        return 0.0;
    }
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, s.strip_prefix('+').unwrap_or(s)),
    };
    if unsigned.starts_with(['+', '-']) {
        return f64::NAN;
    }
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
        }
    }
    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }
    unsigned.parse::<f64>().map_or(f64::NAN, |n| sign * n)
}

/// Leading-prefix numeric parse: `"42px"` is 42, `"px"` is NaN.
pub fn leading_float(input: &str) -> f64 {
    let s = input.trim_start();
    let Some(m) = LEADING_FLOAT_RE.find(s) else {
        return f64::NAN;
    };
    let text = m.as_str();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.strip_prefix('+').unwrap_or(text)),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    unsigned.parse::<f64>().map_or(f64::NAN, |n| sign * n)
}
