//! The evaluation engine.
//!
//! `Validator` pairs a compiled [`Schema`] with [`ValidatorOptions`] and
//! evaluates records against it. Per field:
//!
//! 1. Look up the field's value (it may be absent).
//! 2. Skip the field unless it is present or declares `required` or
//!    `illegalField`.
//! 3. Skip the field when it declares `allowNull` and the value is `null`.
//! 4. Run every other rule; each failure appends its message. There is no
//!    short-circuit, so one field can report several failures.
//!
//! Under `strict`, every record key without a schema field is reported as an
//! illegal field afterwards.
//!
//! Evaluation is pure: the schema and the record are only read, so a single
//! `Validator` can be shared across threads.

use serde_json::{Map, Value};
use tracing::debug;

use fieldcheck_contracts::{
    ErrorMap, FieldcheckError, FieldcheckResult, RuleKind, ValidatorOptions,
};
use fieldcheck_rules::{default_message, display_name};

use crate::schema::{CompiledRule, FieldSchema, RuleMessage, Schema};

/// A compiled schema plus the options it is evaluated with.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
    options: ValidatorOptions,
}

impl Validator {
    pub fn new(schema: Schema, options: ValidatorOptions) -> Self {
        debug!(
            fields = schema.len(),
            strict = options.strict,
            overrides = options.messages.len(),
            "validator ready"
        );
        Self { schema, options }
    }

    /// Compile `raw` and build a validator from it.
    pub fn from_value(raw: &Value, options: ValidatorOptions) -> FieldcheckResult<Self> {
        Ok(Self::new(Schema::from_value(raw)?, options))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Evaluate `record` and return the failures per field.
    ///
    /// An empty map means the record passed.
    pub fn test(&self, record: &Map<String, Value>) -> ErrorMap {
        let mut errors = ErrorMap::new();

        for field in self.schema.fields() {
            let value = record.get(field.name());

            if !field.is_in_scope(value) {
                continue;
            }
            if field.allows_null() && matches!(value, Some(Value::Null)) {
                continue;
            }

            for compiled in field.rules() {
                if compiled.kind() == RuleKind::AllowNull {
                    continue;
                }
                if compiled.rule.test(value, record) {
                    continue;
                }
                let message = self.message(field, compiled);
                debug!(
                    field = %field.name(),
                    rule = %compiled.descriptor,
                    %message,
                    "rule failed"
                );
                errors.push(field.name(), message);
            }
        }

        if self.options.strict {
            for key in record.keys() {
                if self.schema.field(key).is_none() {
                    let message = self.generated(RuleKind::IllegalField, &display_name(key), None);
                    debug!(field = %key, "unexpected field in strict mode");
                    errors.push(key.as_str(), message);
                }
            }
        }

        debug!(
            failed_fields = errors.len(),
            passed = errors.is_empty(),
            "evaluation complete"
        );
        errors
    }

    /// Evaluate an arbitrary JSON value, which must be an object.
    pub fn test_value(&self, record: &Value) -> FieldcheckResult<ErrorMap> {
        match record {
            Value::Object(map) => Ok(self.test(map)),
            other => Err(FieldcheckError::InvalidRecord {
                reason: format!("expected a JSON object, found {other}"),
            }),
        }
    }

    fn message(&self, field: &FieldSchema, compiled: &CompiledRule) -> String {
        match &compiled.message {
            RuleMessage::Literal(text) => text.clone(),
            RuleMessage::Generated => self.generated(
                compiled.kind(),
                field.display_name(),
                compiled.descriptor.value(),
            ),
        }
    }

    fn generated(&self, kind: RuleKind, name: &str, value: Option<&str>) -> String {
        match self.options.messages.get(kind) {
            Some(f) => f(name, value),
            None => default_message(kind, name, value),
        }
    }
}
