//! Rule and type identifiers.
//!
//! `RuleKind` is the closed set of rule names a schema may use. It keys both
//! registry dispatch and message overrides, so a misspelled name is caught
//! once at compile time instead of being looked up as a string on every call.

use std::fmt;
use std::str::FromStr;

/// Every rule name understood by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    Any,
    Type,
    Required,
    IllegalField,
    MinimumLength,
    MaximumLength,
    Regex,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Equal,
    Ascii,
    Email,
    Url,
    Uuid,
    Slugid,
    Match,
    Enumerated,
    Numeric,
    Integer,
    Alphabetical,
    Alphanumeric,
    AllowNull,
}

impl RuleKind {
    /// All rule kinds in registry order.
    pub const ALL: [RuleKind; 24] = [
        RuleKind::Any,
        RuleKind::Type,
        RuleKind::Required,
        RuleKind::IllegalField,
        RuleKind::MinimumLength,
        RuleKind::MaximumLength,
        RuleKind::Regex,
        RuleKind::LessThan,
        RuleKind::LessThanOrEqual,
        RuleKind::GreaterThan,
        RuleKind::GreaterThanOrEqual,
        RuleKind::Equal,
        RuleKind::Ascii,
        RuleKind::Email,
        RuleKind::Url,
        RuleKind::Uuid,
        RuleKind::Slugid,
        RuleKind::Match,
        RuleKind::Enumerated,
        RuleKind::Numeric,
        RuleKind::Integer,
        RuleKind::Alphabetical,
        RuleKind::Alphanumeric,
        RuleKind::AllowNull,
    ];

    /// The name used for this rule in schema descriptors.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Any => "any",
            RuleKind::Type => "type",
            RuleKind::Required => "required",
            RuleKind::IllegalField => "illegalField",
            RuleKind::MinimumLength => "minimumLength",
            RuleKind::MaximumLength => "maximumLength",
            RuleKind::Regex => "regex",
            RuleKind::LessThan => "<",
            RuleKind::LessThanOrEqual => "<=",
            RuleKind::GreaterThan => ">",
            RuleKind::GreaterThanOrEqual => ">=",
            RuleKind::Equal => "==",
            RuleKind::Ascii => "ascii",
            RuleKind::Email => "email",
            RuleKind::Url => "url",
            RuleKind::Uuid => "uuid",
            RuleKind::Slugid => "slugid",
            RuleKind::Match => "match",
            RuleKind::Enumerated => "enumerated",
            RuleKind::Numeric => "numeric",
            RuleKind::Integer => "integer",
            RuleKind::Alphabetical => "alphabetical",
            RuleKind::Alphanumeric => "alphanumeric",
            RuleKind::AllowNull => "allowNull",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRuleName(pub String);

impl FromStr for RuleKind {
    type Err = UnknownRuleName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownRuleName(s.to_string()))
    }
}

/// The value kinds a `type:<k>` rule can ask for.
///
/// `Function`, `Regex` and `Date` are accepted for schema compatibility but
/// no JSON value has those kinds, so they never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Number,
    String,
    Boolean,
    Object,
    Array,
    Function,
    Regex,
    Date,
    Null,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Number => "number",
            TypeKind::String => "string",
            TypeKind::Boolean => "boolean",
            TypeKind::Object => "object",
            TypeKind::Array => "array",
            TypeKind::Function => "function",
            TypeKind::Regex => "regex",
            TypeKind::Date => "date",
            TypeKind::Null => "null",
        }
    }
}

impl FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(TypeKind::Number),
            "string" => Ok(TypeKind::String),
            "boolean" => Ok(TypeKind::Boolean),
            "object" => Ok(TypeKind::Object),
            "array" => Ok(TypeKind::Array),
            "function" => Ok(TypeKind::Function),
            "regex" => Ok(TypeKind::Regex),
            "date" => Ok(TypeKind::Date),
            "null" => Ok(TypeKind::Null),
            other => Err(other.to_string()),
        }
    }
}
