//! # fieldcheck-engine
//!
//! Schema compilation and record evaluation for the fieldcheck validator.
//!
//! ## Overview
//!
//! A schema maps field names to rule descriptors. [`Schema`] compiles it once;
//! [`Validator`] evaluates any number of records against it and returns an
//! [`ErrorMap`](fieldcheck_contracts::ErrorMap) of failure messages per field.
//! Options (strict mode, message templates) can be built in code or loaded
//! from TOML through [`ValidatorConfig`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use fieldcheck_contracts::ValidatorOptions;
//! use fieldcheck_engine::Validator;
//! use serde_json::json;
//!
//! let validator = Validator::from_value(
//!     &json!({ "username": ["required", "minimumLength:3"] }),
//!     ValidatorOptions::new(),
//! )?;
//! let errors = validator.test_value(&json!({ "username": "ab" }))?;
//! assert_eq!(
//!     errors.get("username").unwrap(),
//!     &["Username must be at least 3 characters long".to_string()]
//! );
//! ```

pub mod config;
pub mod schema;
pub mod validator;

pub use config::{with_custom_messages, ValidatorConfig};
pub use schema::{CompiledRule, FieldSchema, RuleMessage, Schema};
pub use validator::Validator;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Map, Value};

    use fieldcheck_contracts::{ErrorMap, FieldcheckError, RuleKind, ValidatorOptions};

    use crate::{Validator, ValidatorConfig};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn validator(schema: Value) -> Validator {
        Validator::from_value(&schema, ValidatorOptions::new()).unwrap()
    }

    fn strict_validator(schema: Value) -> Validator {
        Validator::from_value(&schema, ValidatorOptions::new().strict(true)).unwrap()
    }

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("test record must be an object, got {other}"),
        }
    }

    fn check(v: &Validator, value: Value) -> ErrorMap {
        v.test(&record(value))
    }

    fn messages(errors: &ErrorMap, field: &str) -> Vec<String> {
        errors.get(field).map(<[String]>::to_vec).unwrap_or_default()
    }

    fn username_schema() -> Value {
        json!({
            "username": [
                "required",
                "minimumLength:3",
                "maximumLength:10",
                { "regex:/^[a-zA-Z0-9]*$/": "alphanumeric only" }
            ]
        })
    }

    /// Literal messages throughout, plus optional fields exercising each rule.
    fn signup_schema() -> Value {
        json!({
            "username": [
                { "required": "username required" },
                { "minimumLength:3": "3 minimum" },
                { "maximumLength:10": "10 maximum" },
                { "regex:/^[a-zA-Z0-9]*$/": "alphanumeric only" }
            ],
            "sometimes": [{ "minimumLength:3": "3 minimum" }],
            "illegalField": [{ "illegalField": "illegal field" }],
            "lessThan": { "<:0": "must be less than zero" },
            "lessThanOrEqualTo": { "<=:0": "must be less than or equal to zero" },
            "greaterThan": { ">:0": "must be greater than zero" },
            "greaterThanOrEqualTo": { ">=:0": "must be greater than or equal to zero" },
            "equalTo": { "==:0": "must be equal to zero" },
            "colonOnly": { "==::": "must be a colon" },
            "email": { "email": "bad email format" },
            "password": "type:string",
            "confirm": { "match:password": "values must match" },
            "enumerated": { "enumerated:a,b": "value not in enumerated set" }
        })
    }

    /// Validate `extra` merged over a passing username.
    fn check_signup(extra: Value) -> ErrorMap {
        let v = validator(signup_schema());
        let mut data = record(json!({ "username": "pass" }));
        data.extend(record(extra));
        v.test(&data)
    }

    // ── 1. generated messages ─────────────────────────────────────────────────

    #[test]
    fn test_username_passes() {
        let v = validator(username_schema());
        assert!(check(&v, json!({ "username": "user" })).is_empty());
    }

    /// An absent required field is in scope, so every rule runs and every
    /// failure is reported. The pattern sees "undefined" and passes.
    #[test]
    fn test_absent_required_field_accumulates() {
        let v = validator(username_schema());
        let errors = check(&v, json!({}));

        assert_eq!(
            messages(&errors, "username"),
            vec![
                "Username is required",
                "Username must be at least 3 characters long",
                "Username cannot exceed a length of 10 characters",
            ]
        );
    }

    #[test]
    fn test_empty_string_fails_required() {
        let v = validator(username_schema());
        let errors = check(&v, json!({ "username": "" }));

        assert_eq!(
            messages(&errors, "username"),
            vec![
                "Username is required",
                "Username must be at least 3 characters long",
            ]
        );
    }

    #[test]
    fn test_username_length_and_pattern() {
        let v = validator(username_schema());

        assert_eq!(
            messages(&check(&v, json!({ "username": "ab" })), "username"),
            vec!["Username must be at least 3 characters long"]
        );
        assert_eq!(
            messages(&check(&v, json!({ "username": "f@il" })), "username"),
            vec!["alphanumeric only"]
        );
        assert_eq!(
            messages(&check(&v, json!({ "username": "12345678901" })), "username"),
            vec!["Username cannot exceed a length of 10 characters"]
        );
        assert!(check(&v, json!({ "username": "1234567890" })).is_empty());
    }

    #[test]
    fn test_single_string_entry() {
        let v = validator(json!({ "foo": "required" }));
        assert_eq!(messages(&check(&v, json!({})), "foo"), vec!["Foo is required"]);
        assert!(check(&v, json!({ "foo": "x" })).is_empty());
    }

    #[test]
    fn test_required_satisfied_leaves_other_failures() {
        let v = validator(json!({ "code": ["required", "numeric"] }));
        let errors = check(&v, json!({ "code": "x" }));
        assert_eq!(messages(&errors, "code"), vec!["Code must be a number"]);
    }

    #[test]
    fn test_rule_accumulation() {
        let v = validator(json!({ "name": ["minimumLength:3", "alphabetical"] }));
        let errors = check(&v, json!({ "name": "1" }));
        assert_eq!(
            messages(&errors, "name"),
            vec![
                "Name must be at least 3 characters long",
                "Name must contain alphabetic letters only",
            ]
        );
    }

    // ── 2. literal messages ───────────────────────────────────────────────────

    #[test]
    fn test_literal_messages_for_username() {
        let v = validator(signup_schema());
        assert_eq!(
            messages(&check(&v, json!({})), "username"),
            vec!["username required", "3 minimum", "10 maximum"]
        );
        assert_eq!(
            messages(&check(&v, json!({ "username": "" })), "username"),
            vec!["username required", "3 minimum"]
        );
    }

    #[test]
    fn test_optional_field_skipped_when_absent() {
        assert!(check_signup(json!({})).is_empty());
    }

    /// Present values are always in scope, including values without a length.
    #[test]
    fn test_optional_field_checked_when_present() {
        for value in [json!(0), json!(1), json!("ab"), json!("")] {
            let errors = check_signup(json!({ "sometimes": value.clone() }));
            assert_eq!(messages(&errors, "sometimes"), vec!["3 minimum"], "value {value}");
        }
        assert!(check_signup(json!({ "sometimes": "abc" })).is_empty());
    }

    #[test]
    fn test_illegal_field() {
        let errors = check_signup(json!({ "illegalField": "" }));
        assert_eq!(messages(&errors, "illegalField"), vec!["illegal field"]);
    }

    #[test]
    fn test_comparisons() {
        assert!(check_signup(json!({ "lessThan": -1 })).is_empty());
        assert_eq!(
            messages(&check_signup(json!({ "lessThan": 0 })), "lessThan"),
            vec!["must be less than zero"]
        );
        assert!(check_signup(json!({ "lessThanOrEqualTo": 0 })).is_empty());
        assert_eq!(
            messages(&check_signup(json!({ "lessThanOrEqualTo": 1 })), "lessThanOrEqualTo"),
            vec!["must be less than or equal to zero"]
        );
        assert!(check_signup(json!({ "greaterThan": 1 })).is_empty());
        assert!(check_signup(json!({ "greaterThan": 0 })).contains("greaterThan"));
        assert!(check_signup(json!({ "greaterThanOrEqualTo": "0" })).is_empty());
        assert!(check_signup(json!({ "greaterThanOrEqualTo": -1 })).contains("greaterThanOrEqualTo"));
    }

    #[test]
    fn test_equality_and_colon_values() {
        assert!(check_signup(json!({ "equalTo": "0" })).is_empty());
        assert_eq!(
            messages(&check_signup(json!({ "equalTo": 1 })), "equalTo"),
            vec!["must be equal to zero"]
        );
        assert!(check_signup(json!({ "colonOnly": ":" })).is_empty());
    }

    #[test]
    fn test_email() {
        assert!(check_signup(json!({ "email": "email@email.com" })).is_empty());
        assert_eq!(
            messages(&check_signup(json!({ "email": "wrong" })), "email"),
            vec!["bad email format"]
        );
    }

    #[test]
    fn test_match_against_other_field() {
        assert!(check_signup(json!({ "password": "10", "confirm": 10 })).is_empty());
        assert_eq!(
            messages(&check_signup(json!({ "password": "a", "confirm": "b" })), "confirm"),
            vec!["values must match"]
        );
        // The target being absent is a mismatch, not a configuration error.
        assert!(check_signup(json!({ "confirm": "b" })).contains("confirm"));
    }

    #[test]
    fn test_enumerated() {
        assert!(check_signup(json!({ "enumerated": "a" })).is_empty());
        assert!(check_signup(json!({ "enumerated": "b" })).is_empty());
        assert_eq!(
            messages(&check_signup(json!({ "enumerated": "c" })), "enumerated"),
            vec!["value not in enumerated set"]
        );
    }

    // ── 3. allowNull ──────────────────────────────────────────────────────────

    #[test]
    fn test_allow_null() {
        let v = validator(json!({ "foo": ["type:number", "allowNull"] }));

        assert!(check(&v, json!({})).is_empty());
        assert!(check(&v, json!({ "foo": null })).is_empty());
        assert!(check(&v, json!({ "foo": 5 })).is_empty());
        assert_eq!(
            messages(&check(&v, json!({ "foo": "5" })), "foo"),
            vec!["Foo must be of type number"]
        );
    }

    /// allowNull exempts null even when the field is required.
    #[test]
    fn test_allow_null_overrides_required() {
        let v = validator(json!({ "foo": ["required", "allowNull", "minimumLength:2"] }));
        assert!(check(&v, json!({ "foo": null })).is_empty());
        assert!(check(&v, json!({})).contains("foo"));
    }

    #[test]
    fn test_null_without_allow_null_is_tested() {
        let v = validator(json!({ "foo": ["type:number"] }));
        assert_eq!(
            messages(&check(&v, json!({ "foo": null })), "foo"),
            vec!["Foo must be of type number"]
        );
    }

    // ── 4. strict mode ────────────────────────────────────────────────────────

    #[test]
    fn test_strict_reports_unknown_keys() {
        let v = strict_validator(json!({ "a": "any" }));
        let errors = check(&v, json!({ "a": 1, "b": 2 }));

        assert_eq!(errors.len(), 1);
        assert_eq!(messages(&errors, "b"), vec!["B is an illegal field"]);
    }

    #[test]
    fn test_strict_uses_display_name() {
        let v = strict_validator(json!({}));
        let errors = check(&v, json!({ "extraField": true, "x-y": 1 }));

        assert_eq!(
            messages(&errors, "extraField"),
            vec!["Extra Field is an illegal field"]
        );
        assert_eq!(messages(&errors, "x-y"), vec!["X Y is an illegal field"]);
    }

    #[test]
    fn test_non_strict_ignores_unknown_keys() {
        let v = validator(json!({ "a": "any" }));
        assert!(check(&v, json!({ "a": 1, "b": 2 })).is_empty());
    }

    // ── 5. message overrides ──────────────────────────────────────────────────

    #[test]
    fn test_override_applies_to_generated_messages_only() {
        let options = ValidatorOptions::new().with_message(RuleKind::Required, |name, _| {
            format!("please fill in {name}")
        });
        let v = Validator::from_value(
            &json!({
                "firstName": "required",
                "lastName": { "required": "last name missing" }
            }),
            options,
        )
        .unwrap();

        let errors = check(&v, json!({}));
        assert_eq!(
            messages(&errors, "firstName"),
            vec!["please fill in First Name"]
        );
        assert_eq!(messages(&errors, "lastName"), vec!["last name missing"]);
    }

    #[test]
    fn test_override_receives_rule_value() {
        let options = ValidatorOptions::new().with_message(RuleKind::MaximumLength, |name, value| {
            format!("{name} <= {}", value.unwrap_or_default())
        });
        let v = Validator::from_value(&json!({ "bio": "maximumLength:4" }), options).unwrap();

        assert_eq!(
            messages(&check(&v, json!({ "bio": "hello" })), "bio"),
            vec!["Bio <= 4"]
        );
    }

    #[test]
    fn test_override_changes_strict_message() {
        let options = ValidatorOptions::new()
            .strict(true)
            .with_message(RuleKind::IllegalField, |name, _| format!("{name} not allowed"));
        let v = Validator::from_value(&json!({}), options).unwrap();

        assert_eq!(
            messages(&check(&v, json!({ "zip": 1 })), "zip"),
            vec!["Zip not allowed"]
        );
    }

    #[test]
    fn test_options_from_toml() {
        let config = ValidatorConfig::from_toml_str(
            r#"
            strict = true

            [messages]
            required = "{name} must be provided"
            unknownRule = "ignored"
            "#,
        )
        .unwrap();
        let v = Validator::from_value(&json!({ "username": "required" }), config.into_options())
            .unwrap();

        let errors = check(&v, json!({ "other": 1 }));
        assert_eq!(
            messages(&errors, "username"),
            vec!["Username must be provided"]
        );
        assert_eq!(messages(&errors, "other"), vec!["Other is an illegal field"]);
    }

    // ── 6. purity ─────────────────────────────────────────────────────────────

    #[test]
    fn test_idempotent_and_non_mutating() {
        let v = validator(signup_schema());
        let data = record(json!({ "username": "f@il", "lessThanOrEqualTo": 0, "email": "x" }));
        let snapshot = data.clone();

        let first = v.test(&data);
        let second = v.test(&data);

        assert_eq!(first, second);
        assert_eq!(data, snapshot);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();

        let v = Arc::new(validator(username_schema()));
        std::thread::scope(|scope| {
            for i in 0..4 {
                let v = Arc::clone(&v);
                scope.spawn(move || {
                    let name = "x".repeat(i + 1);
                    let errors = v.test(&record(json!({ "username": name })));
                    assert_eq!(errors.is_empty(), i + 1 >= 3, "length {}", i + 1);
                });
            }
        });
    }

    // ── 7. record shape ───────────────────────────────────────────────────────

    #[test]
    fn test_value_requires_an_object() {
        let v = validator(username_schema());

        assert!(v.test_value(&json!({ "username": "user" })).unwrap().is_empty());
        match v.test_value(&json!(["username"])) {
            Err(FieldcheckError::InvalidRecord { reason }) => {
                assert!(reason.contains("expected a JSON object"), "got: {reason}");
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_configuration_errors_surface_at_construction() {
        let err = Validator::from_value(&json!({ "a": "regex:/(/" }), ValidatorOptions::new())
            .unwrap_err();
        assert!(matches!(err, FieldcheckError::InvalidRegex { .. }), "got {err:?}");
    }
}
