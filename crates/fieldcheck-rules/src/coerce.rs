//! Loose value coercion.
//!
//! Comparison, equality and pattern rules coerce values loosely:
//! `Number("")` is `0`, `"0" == 0` holds, `null == undefined` holds, and
//! patterns see `undefined` when the field is absent. `None` stands for an
//! absent field throughout this module.

use std::borrow::Cow;

use serde_json::{Number, Value};

/// Numeric coercion (`Number(value)`).
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => bool_to_number(*b),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => string_to_number(s),
        Some(array @ Value::Array(_)) => string_to_number(&to_js_string(Some(array))),
        Some(Value::Object(_)) => f64::NAN,
    }
}

/// Numeric coercion of a string. Blank strings are `0`; anything that is not
/// a complete numeric literal is `NaN`.
pub fn string_to_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(n) = prefixed_integer(t) {
        return n;
    }
    // f64::from_str also accepts "inf" and "nan", which are not numbers here.
    let literal = t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !literal {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

fn prefixed_integer(t: &str) -> Option<f64> {
    let radix = match t.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return None,
    };
    let digits = &t[2..];
    Some(
        u64::from_str_radix(digits, radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN),
    )
}

fn bool_to_number(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// String coercion (`String(value)`), used for pattern matching.
pub fn to_js_string(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None => Cow::Borrowed("undefined"),
        Some(Value::Null) => Cow::Borrowed("null"),
        Some(Value::Bool(true)) => Cow::Borrowed("true"),
        Some(Value::Bool(false)) => Cow::Borrowed("false"),
        Some(Value::Number(n)) => Cow::Owned(number_to_string(n)),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Array(items)) => Cow::Owned(
            items
                .iter()
                .map(|item| match item {
                    Value::Null => Cow::Borrowed(""),
                    other => to_js_string(Some(other)),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(Value::Object(_)) => Cow::Borrowed("[object Object]"),
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    format_f64(n.as_f64().unwrap_or(f64::NAN))
}

/// Format a float without a trailing `.0` and with `e+` exponents.
pub fn format_f64(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    let abs = f.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{f:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    if f.fract() == 0.0 {
        format!("{f:.0}")
    } else {
        format!("{f}")
    }
}

#[derive(Debug)]
enum Operand<'a> {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Cow<'a, str>),
    /// Arrays and objects, carried with their primitive string form.
    Object(Cow<'a, str>),
}

fn operand(value: Option<&Value>) -> Operand<'_> {
    match value {
        None => Operand::Undefined,
        Some(Value::Null) => Operand::Null,
        Some(Value::Bool(b)) => Operand::Bool(*b),
        Some(Value::Number(n)) => Operand::Number(n.as_f64().unwrap_or(f64::NAN)),
        Some(Value::String(s)) => Operand::String(Cow::Borrowed(s.as_str())),
        Some(v @ (Value::Array(_) | Value::Object(_))) => Operand::Object(to_js_string(Some(v))),
    }
}

/// Loose equality (`a == b`).
///
/// Two arrays or objects are never equal: they are distinct values even when
/// their contents match.
pub fn loose_eq(a: Option<&Value>, b: Option<&Value>) -> bool {
    loose_eq_operands(operand(a), operand(b))
}

/// Loose equality against a rule parameter, which is always a string.
pub fn loose_eq_str(value: Option<&Value>, s: &str) -> bool {
    loose_eq_operands(operand(value), Operand::String(Cow::Borrowed(s)))
}

fn loose_eq_operands(a: Operand<'_>, b: Operand<'_>) -> bool {
    use Operand as O;

    match (a, b) {
        (O::Undefined | O::Null, O::Undefined | O::Null) => true,
        (O::Undefined | O::Null, _) | (_, O::Undefined | O::Null) => false,
        (O::Number(x), O::Number(y)) => x == y,
        (O::String(x), O::String(y)) => x == y,
        (O::Bool(x), O::Bool(y)) => x == y,
        (O::Object(_), O::Object(_)) => false,
        (O::Bool(x), other) => loose_eq_operands(O::Number(bool_to_number(x)), other),
        (other, O::Bool(y)) => loose_eq_operands(other, O::Number(bool_to_number(y))),
        (O::Number(x), O::String(s)) | (O::String(s), O::Number(x)) => x == string_to_number(&s),
        (O::Object(p), other) => loose_eq_operands(O::String(p), other),
        (other, O::Object(p)) => loose_eq_operands(other, O::String(p)),
    }
}
