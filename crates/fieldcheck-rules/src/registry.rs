//! The rule registry.
//!
//! Each descriptor compiles into a [`Rule`], the parameterized form of a
//! [`RuleKind`]: numeric bounds are parsed, regular expressions are built and
//! enumerations are split once, up front. Bad parameters are configuration
//! errors and surface from [`Rule::compile`], never from [`Rule::test`].
//!
//! Default failure messages live in [`default_message`].

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use tracing::debug;

use fieldcheck_contracts::{FieldcheckError, FieldcheckResult, RuleKind, TypeKind};

use crate::coerce::{loose_eq, loose_eq_str, string_to_number, to_js_string, to_number};
use crate::descriptor::RuleDescriptor;

// ── Built-in patterns ─────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+\-]+@(?:[a-zA-Z0-9\-]+\.)+[a-zA-Z0-9]{2,}$")
        .expect("email pattern is valid")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:https?|ftp)://",
        r"(?:\S+(?::\S*)?@)?",
        r"(?:localhost",
        r"|(?:\d{1,3}\.){3}\d{1,3}",
        r"|(?:[a-z0-9\x{00a1}-\x{d7ff}\x{e000}-\x{ffff}](?:[a-z0-9\x{00a1}-\x{d7ff}\x{e000}-\x{ffff}\-]*[a-z0-9\x{00a1}-\x{d7ff}\x{e000}-\x{ffff}])?\.)+",
        r"[a-z\x{00a1}-\x{d7ff}\x{e000}-\x{ffff}]{2,})",
        r"(?::\d{2,5})?",
        r"(?:[/?#]\S*)?$",
    ))
    .expect("url pattern is valid")
});

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("uuid pattern is valid")
});

static SLUGID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[0-9a-z_-]{22}$").expect("slugid pattern is valid"));

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]*\.?[0-9]*$").expect("numeric pattern is valid"));

static INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]*$").expect("integer pattern is valid"));

static ALPHABETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]*$").expect("alphabetical pattern is valid"));

static ALPHANUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]*$").expect("alphanumeric pattern is valid"));

// ── Compiled rules ────────────────────────────────────────────────────────────

/// A rule with its parameter already interpreted.
#[derive(Debug, Clone)]
pub enum Rule {
    Any,
    Type(TypeKind),
    Required,
    IllegalField,
    MinimumLength(f64),
    MaximumLength(f64),
    Regex(Regex),
    LessThan(f64),
    LessThanOrEqual(f64),
    GreaterThan(f64),
    GreaterThanOrEqual(f64),
    Equal(String),
    Ascii,
    Email,
    Url,
    Uuid,
    Slugid,
    Match(String),
    Enumerated(Vec<String>),
    Numeric,
    Integer,
    Alphabetical,
    Alphanumeric,
    AllowNull,
}

impl Rule {
    /// Build the rule named by `descriptor` for `field`.
    ///
    /// Fails with a configuration error for an unknown rule name, an unknown
    /// `type:` subtype, a malformed regex, or a missing or non-numeric
    /// parameter. Parameters on rules that take none are ignored.
    pub fn compile(field: &str, descriptor: &RuleDescriptor) -> FieldcheckResult<Rule> {
        let kind: RuleKind = descriptor
            .name
            .parse()
            .map_err(|_| FieldcheckError::UnknownRule {
                field: field.to_string(),
                name: descriptor.name.clone(),
            })?;

        let param = || {
            descriptor
                .value()
                .ok_or_else(|| FieldcheckError::InvalidRuleValue {
                    field: field.to_string(),
                    rule: kind.to_string(),
                    reason: "a parameter is required (name:value)".to_string(),
                })
        };
        let number = || -> FieldcheckResult<f64> {
            let raw = param()?;
            let n = string_to_number(raw);
            if n.is_nan() {
                return Err(FieldcheckError::InvalidRuleValue {
                    field: field.to_string(),
                    rule: kind.to_string(),
                    reason: format!("'{raw}' is not a number"),
                });
            }
            Ok(n)
        };

        let rule = match kind {
            RuleKind::Any => Rule::Any,
            RuleKind::Type => {
                let raw = param()?;
                let type_kind = raw
                    .parse::<TypeKind>()
                    .map_err(|kind| FieldcheckError::UnknownType {
                        field: field.to_string(),
                        kind,
                    })?;
                Rule::Type(type_kind)
            }
            RuleKind::Required => Rule::Required,
            RuleKind::IllegalField => Rule::IllegalField,
            RuleKind::MinimumLength => Rule::MinimumLength(number()?),
            RuleKind::MaximumLength => Rule::MaximumLength(number()?),
            RuleKind::Regex => Rule::Regex(compile_regex(field, param()?)?),
            RuleKind::LessThan => Rule::LessThan(number()?),
            RuleKind::LessThanOrEqual => Rule::LessThanOrEqual(number()?),
            RuleKind::GreaterThan => Rule::GreaterThan(number()?),
            RuleKind::GreaterThanOrEqual => Rule::GreaterThanOrEqual(number()?),
            RuleKind::Equal => Rule::Equal(param()?.to_string()),
            RuleKind::Ascii => Rule::Ascii,
            RuleKind::Email => Rule::Email,
            RuleKind::Url => Rule::Url,
            RuleKind::Uuid => Rule::Uuid,
            RuleKind::Slugid => Rule::Slugid,
            RuleKind::Match => {
                let target = param()?;
                if target.is_empty() {
                    return Err(FieldcheckError::InvalidRuleValue {
                        field: field.to_string(),
                        rule: kind.to_string(),
                        reason: "match needs the name of another field".to_string(),
                    });
                }
                Rule::Match(target.to_string())
            }
            RuleKind::Enumerated => {
                Rule::Enumerated(param()?.split(',').map(str::to_string).collect())
            }
            RuleKind::Numeric => Rule::Numeric,
            RuleKind::Integer => Rule::Integer,
            RuleKind::Alphabetical => Rule::Alphabetical,
            RuleKind::Alphanumeric => Rule::Alphanumeric,
            RuleKind::AllowNull => Rule::AllowNull,
        };
        Ok(rule)
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Any => RuleKind::Any,
            Rule::Type(_) => RuleKind::Type,
            Rule::Required => RuleKind::Required,
            Rule::IllegalField => RuleKind::IllegalField,
            Rule::MinimumLength(_) => RuleKind::MinimumLength,
            Rule::MaximumLength(_) => RuleKind::MaximumLength,
            Rule::Regex(_) => RuleKind::Regex,
            Rule::LessThan(_) => RuleKind::LessThan,
            Rule::LessThanOrEqual(_) => RuleKind::LessThanOrEqual,
            Rule::GreaterThan(_) => RuleKind::GreaterThan,
            Rule::GreaterThanOrEqual(_) => RuleKind::GreaterThanOrEqual,
            Rule::Equal(_) => RuleKind::Equal,
            Rule::Ascii => RuleKind::Ascii,
            Rule::Email => RuleKind::Email,
            Rule::Url => RuleKind::Url,
            Rule::Uuid => RuleKind::Uuid,
            Rule::Slugid => RuleKind::Slugid,
            Rule::Match(_) => RuleKind::Match,
            Rule::Enumerated(_) => RuleKind::Enumerated,
            Rule::Numeric => RuleKind::Numeric,
            Rule::Integer => RuleKind::Integer,
            Rule::Alphabetical => RuleKind::Alphabetical,
            Rule::Alphanumeric => RuleKind::Alphanumeric,
            Rule::AllowNull => RuleKind::AllowNull,
        }
    }

    /// Return true when `value` satisfies the rule.
    ///
    /// `value` is `None` when the field is absent from `record`. `AllowNull`
    /// is a modifier for the engine and always passes here.
    pub fn test(&self, value: Option<&Value>, record: &Map<String, Value>) -> bool {
        match self {
            Rule::Any | Rule::AllowNull => true,
            Rule::Type(kind) => is_type(value, *kind),
            Rule::Required => !matches!(value, None | Some(Value::Null))
                && value.and_then(Value::as_str) != Some(""),
            Rule::IllegalField => value.is_none(),
            Rule::MinimumLength(n) => length(value).is_some_and(|len| len as f64 >= *n),
            Rule::MaximumLength(n) => length(value).is_some_and(|len| len as f64 <= *n),
            Rule::Regex(re) => re.is_match(&to_js_string(value)),
            Rule::LessThan(n) => to_number(value) < *n,
            Rule::LessThanOrEqual(n) => to_number(value) <= *n,
            Rule::GreaterThan(n) => to_number(value) > *n,
            Rule::GreaterThanOrEqual(n) => to_number(value) >= *n,
            Rule::Equal(expected) => loose_eq_str(value, expected),
            Rule::Ascii => to_js_string(value).is_ascii(),
            Rule::Email => EMAIL_RE.is_match(&to_js_string(value)),
            Rule::Url => URL_RE.is_match(&to_js_string(value)),
            Rule::Uuid => UUID_RE.is_match(&to_js_string(value)),
            Rule::Slugid => SLUGID_RE.is_match(&to_js_string(value)),
            Rule::Match(other) => loose_eq(value, record.get(other)),
            Rule::Enumerated(members) => members.iter().any(|m| loose_eq_str(value, m)),
            Rule::Numeric => NUMERIC_RE.is_match(&to_js_string(value)),
            Rule::Integer => INTEGER_RE.is_match(&to_js_string(value)),
            Rule::Alphabetical => ALPHABETICAL_RE.is_match(&to_js_string(value)),
            Rule::Alphanumeric => ALPHANUMERIC_RE.is_match(&to_js_string(value)),
        }
    }
}

fn is_type(value: Option<&Value>, kind: TypeKind) -> bool {
    let Some(value) = value else {
        return false;
    };
    match kind {
        TypeKind::Number => value.is_number(),
        TypeKind::String => value.is_string(),
        TypeKind::Boolean => value.is_boolean(),
        TypeKind::Object => value.is_object(),
        TypeKind::Array => value.is_array(),
        TypeKind::Null => value.is_null(),
        TypeKind::Function | TypeKind::Regex | TypeKind::Date => false,
    }
}

/// Length of strings (in UTF-16 code units) and arrays; other values have none.
fn length(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::String(s) => Some(s.encode_utf16().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Build a regex from `/pattern/flags`.
///
/// Everything between the first and the last slash is the pattern, so
/// escaped slashes inside it round-trip. Supported flags are `i`, `m` and
/// `s`; `g`, `u` and `y` are accepted and have no effect on a match test.
/// The class escapes `\d`, `\w` and `\b` stay ASCII-only, see
/// [`translate_pattern`].
fn compile_regex(field: &str, source: &str) -> FieldcheckResult<Regex> {
    let invalid = |reason: String| FieldcheckError::InvalidRegex {
        field: field.to_string(),
        pattern: source.to_string(),
        reason,
    };

    let (pattern, flags) = source
        .strip_prefix('/')
        .and_then(|rest| rest.rsplit_once('/'))
        .ok_or_else(|| invalid("expected the form /pattern/flags".to_string()))?;

    let mut builder = RegexBuilder::new(&translate_pattern(pattern));
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'g' | 'u' | 'y' => &mut builder,
            other => return Err(invalid(format!("unsupported flag '{other}'"))),
        };
    }
    let re = builder.build().map_err(|e| invalid(e.to_string()))?;
    debug!(field, pattern, flags, "compiled regex rule");
    Ok(re)
}

/// Rewrite a slash-delimited pattern for the `regex` crate.
///
/// `\/` loses its backslash. `\d`, `\D`, `\w` and `\W` become ASCII classes
/// and `\b`, `\B` become ASCII word boundaries, since the `regex` crate reads
/// all of them as Unicode-aware. Inside a bracket class the positive escapes
/// are spliced in as ranges, the negated ones as nested classes, and `\b`
/// means backspace.
fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut in_class = false;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {}
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                continue;
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
                continue;
            }
            _ => {
                out.push(c);
                continue;
            }
        }
        match (chars.next(), in_class) {
            (Some('/'), _) => out.push('/'),
            (Some('d'), false) => out.push_str("[0-9]"),
            (Some('d'), true) => out.push_str("0-9"),
            (Some('D'), _) => out.push_str("[^0-9]"),
            (Some('w'), false) => out.push_str("[0-9A-Za-z_]"),
            (Some('w'), true) => out.push_str("0-9A-Za-z_"),
            (Some('W'), _) => out.push_str("[^0-9A-Za-z_]"),
            (Some('b'), false) => out.push_str(r"(?-u:\b)"),
            (Some('b'), true) => out.push_str(r"\x08"),
            (Some('B'), false) => out.push_str(r"(?-u:\B)"),
            (Some(next), _) => {
                out.push('\\');
                out.push(next);
            }
            (None, _) => out.push('\\'),
        }
    }
    out
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// The registry's message for a failed `kind` rule.
///
/// `name` is the field's display name and `value` the descriptor parameter.
pub fn default_message(kind: RuleKind, name: &str, value: Option<&str>) -> String {
    let v = value.unwrap_or_default();
    match kind {
        RuleKind::Any => format!("{name} is invalid"),
        RuleKind::Type => format!("{name} must be of type {v}"),
        RuleKind::Required => format!("{name} is required"),
        RuleKind::IllegalField => format!("{name} is an illegal field"),
        RuleKind::MinimumLength => format!("{name} must be at least {v} characters long"),
        RuleKind::MaximumLength => format!("{name} cannot exceed a length of {v} characters"),
        RuleKind::Regex => format!("{name} is not properly formatted"),
        RuleKind::LessThan => format!("{name} must be less than {v}"),
        RuleKind::LessThanOrEqual => format!("{name} must be less than or equal to {v}"),
        RuleKind::GreaterThan => format!("{name} must be greater than {v}"),
        RuleKind::GreaterThanOrEqual => format!("{name} must be greater than or equal to {v}"),
        RuleKind::Equal => format!("{name} must be equal to {v}"),
        RuleKind::Ascii => format!("{name} must contain only ascii characters"),
        RuleKind::Email => format!("{name} must be an email address"),
        RuleKind::Url => format!("{name} must be an URL address"),
        RuleKind::Uuid => format!("{name} must be a uuid"),
        RuleKind::Slugid => format!("{name} must be a slugid"),
        RuleKind::Match => format!("{name} must have matching values"),
        RuleKind::Enumerated => format!("invalid value for {name}"),
        RuleKind::Numeric => format!("{name} must be a number"),
        RuleKind::Integer => format!("{name} must be an integer"),
        RuleKind::Alphabetical => format!("{name} must contain alphabetic letters only"),
        RuleKind::Alphanumeric => format!("{name} must contain letters and numbers only"),
        RuleKind::AllowNull => format!("{name} may be null"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
