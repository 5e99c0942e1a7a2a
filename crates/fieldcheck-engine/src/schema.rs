//! Schema compilation.
//!
//! A raw schema maps each field to its rules in any of these shapes:
//!
//! ```json
//! {
//!   "username": ["required", "minimumLength:3", { "regex:/^[a-z]*$/": "lowercase only" }],
//!   "email": "email",
//!   "nickname": { "maximumLength:20": "too long" }
//! }
//! ```
//!
//! Compilation normalizes every entry into an ordered list of
//! [`CompiledRule`]s so nothing downstream cares which shape was written.
//! A compiled [`Schema`] is immutable.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use fieldcheck_contracts::{FieldcheckError, FieldcheckResult, RuleKind};
use fieldcheck_rules::{display_name, Rule, RuleDescriptor};

/// Where a rule's failure message comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMessage {
    /// Written by the schema author; used verbatim.
    Literal(String),
    /// Rendered from the registry template (or an override) on failure.
    Generated,
}

/// One rule of a field, ready to evaluate.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub descriptor: RuleDescriptor,
    pub rule: Rule,
    pub message: RuleMessage,
}

impl CompiledRule {
    pub fn kind(&self) -> RuleKind {
        self.rule.kind()
    }
}

/// The compiled rules of a single field.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: String,
    display_name: String,
    rules: Vec<CompiledRule>,
}

impl FieldSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Humanized name used in generated messages.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// True if any rule of this field is a `kind` rule.
    pub fn has(&self, kind: RuleKind) -> bool {
        self.rules.iter().any(|r| r.kind() == kind)
    }

    /// A field is tested when it is present, or when `required` or
    /// `illegalField` makes its absence meaningful.
    pub fn is_in_scope(&self, value: Option<&Value>) -> bool {
        value.is_some() || self.has(RuleKind::Required) || self.has(RuleKind::IllegalField)
    }

    pub fn allows_null(&self) -> bool {
        self.has(RuleKind::AllowNull)
    }
}

/// A compiled schema: field name → rules, iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, FieldSchema>,
}

impl Schema {
    /// Compile a schema document.
    ///
    /// Returns `MalformedSchema` for unsupported shapes and the rule
    /// registry's configuration errors for bad descriptors.
    pub fn from_value(raw: &Value) -> FieldcheckResult<Self> {
        let entries = raw
            .as_object()
            .ok_or_else(|| FieldcheckError::MalformedSchema {
                reason: format!("expected an object of fields, found {}", kind_of(raw)),
            })?;

        let mut fields = BTreeMap::new();
        for (name, entry) in entries {
            let field = compile_field(name, entry)?;
            debug!(
                field = %name,
                rules = field.rules.len(),
                "compiled field"
            );
            fields.insert(name.clone(), field);
        }
        Ok(Self { fields })
    }

    /// Parse `s` as JSON and compile it.
    pub fn from_json_str(s: &str) -> FieldcheckResult<Self> {
        let raw: Value = serde_json::from_str(s).map_err(|e| FieldcheckError::MalformedSchema {
            reason: format!("failed to parse schema JSON: {}", e),
        })?;
        Self::from_value(&raw)
    }

    /// Read the file at `path` and compile it as a JSON schema document.
    pub fn from_file(path: &Path) -> FieldcheckResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FieldcheckError::ConfigError {
            reason: format!("failed to read schema file '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn compile_field(name: &str, entry: &Value) -> FieldcheckResult<FieldSchema> {
    let elements: Vec<&Value> = match entry {
        Value::Array(items) => items.iter().collect(),
        single @ (Value::String(_) | Value::Object(_)) => vec![single],
        other => {
            return Err(FieldcheckError::MalformedSchema {
                reason: format!(
                    "field '{name}': rules must be a string, an object, or an array, found {}",
                    kind_of(other)
                ),
            })
        }
    };

    let rules = elements
        .into_iter()
        .map(|element| compile_element(name, element))
        .collect::<FieldcheckResult<Vec<_>>>()?;

    Ok(FieldSchema {
        name: name.to_string(),
        display_name: display_name(name),
        rules,
    })
}

fn compile_element(field: &str, element: &Value) -> FieldcheckResult<CompiledRule> {
    let (text, message) = match element {
        Value::String(text) => (text.as_str(), RuleMessage::Generated),
        Value::Object(map) => {
            let mut pairs = map.iter();
            match (pairs.next(), pairs.next()) {
                (Some((text, Value::String(message))), None) => {
                    (text.as_str(), RuleMessage::Literal(message.clone()))
                }
                (Some((text, other)), None) => {
                    return Err(FieldcheckError::MalformedSchema {
                        reason: format!(
                            "field '{field}': message for '{text}' must be a string, found {}",
                            kind_of(other)
                        ),
                    })
                }
                _ => {
                    return Err(FieldcheckError::MalformedSchema {
                        reason: format!(
                            "field '{field}': a message object must have exactly one key, found {}",
                            map.len()
                        ),
                    })
                }
            }
        }
        other => {
            return Err(FieldcheckError::MalformedSchema {
                reason: format!(
                    "field '{field}': rule must be a string or a one-key object, found {}",
                    kind_of(other)
                ),
            })
        }
    };

    let descriptor = RuleDescriptor::parse(text);
    let rule = Rule::compile(field, &descriptor)?;
    Ok(CompiledRule {
        descriptor,
        rule,
        message,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
