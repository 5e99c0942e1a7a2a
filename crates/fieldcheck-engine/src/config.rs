//! Validator options loaded from TOML, and custom message maps.
//!
//! ```toml
//! strict = true
//!
//! [messages]
//! required = "{name} must be provided"
//! minimumLength = "{name} needs at least {value} characters"
//! ```
//!
//! `{name}` expands to the field's display name and `{value}` to the rule
//! parameter (empty when the descriptor has none).

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use fieldcheck_contracts::{
    FieldcheckError, FieldcheckResult, MessageFn, RuleKind, ValidatorOptions,
};

/// The top-level structure deserialized from a TOML options file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Reject record keys that the schema does not declare.
    pub strict: bool,

    /// Message templates keyed by rule name.
    pub messages: BTreeMap<String, String>,
}

impl ValidatorConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `FieldcheckError::ConfigError` if the TOML is malformed or does
    /// not match `ValidatorConfig`.
    pub fn from_toml_str(s: &str) -> FieldcheckResult<Self> {
        toml::from_str(s).map_err(|e| FieldcheckError::ConfigError {
            reason: format!("failed to parse options TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as TOML options.
    pub fn from_file(path: &Path) -> FieldcheckResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FieldcheckError::ConfigError {
            reason: format!("failed to read options file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Build validator options, turning each template into a message function.
    ///
    /// Templates for unknown rule names are skipped with a warning.
    pub fn into_options(self) -> ValidatorOptions {
        let maps = self.messages.into_iter().map(|(rule, template)| {
            let f: MessageFn =
                Arc::new(move |name: &str, value: Option<&str>| render(&template, name, value));
            (rule, f)
        });
        with_custom_messages(ValidatorOptions::new().strict(self.strict), maps)
    }
}

/// Register message functions keyed by rule name.
///
/// Names the registry does not know are not an error: they are logged and
/// the default template stays in effect.
pub fn with_custom_messages<I, K>(mut options: ValidatorOptions, maps: I) -> ValidatorOptions
where
    I: IntoIterator<Item = (K, MessageFn)>,
    K: AsRef<str>,
{
    for (name, f) in maps {
        let name = name.as_ref();
        match name.parse::<RuleKind>() {
            Ok(kind) => options.messages.insert(kind, f),
            Err(_) => warn!(rule = %name, "ignoring message override for unknown rule"),
        }
    }
    options
}

/// Expand `{name}` and `{value}` in `template`.
pub fn render(template: &str, name: &str, value: Option<&str>) -> String {
    template
        .replace("{name}", name)
        .replace("{value}", value.unwrap_or_default())
}
