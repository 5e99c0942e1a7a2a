//! Error types for the fieldcheck validator.
//!
//! Validation failures are data and live in an `ErrorMap`; they never show up
//! here. `FieldcheckError` is reserved for defects in the schema, the options,
//! or the caller's input shape.

use thiserror::Error;

/// The unified error type for the fieldcheck crates.
#[derive(Debug, Error)]
pub enum FieldcheckError {
    /// A descriptor names a rule the registry does not know.
    #[error("field '{field}': unknown rule '{name}'")]
    UnknownRule { field: String, name: String },

    /// A `type:` descriptor names an unsupported kind.
    #[error("field '{field}': invalid type '{kind}'")]
    UnknownType { field: String, kind: String },

    /// A rule parameter is missing or cannot be interpreted.
    #[error("field '{field}': invalid value for rule '{rule}': {reason}")]
    InvalidRuleValue {
        field: String,
        rule: String,
        reason: String,
    },

    /// A `regex:` descriptor is not `/pattern/flags` or fails to compile.
    #[error("field '{field}': regular expression error in '{pattern}': {reason}")]
    InvalidRegex {
        field: String,
        pattern: String,
        reason: String,
    },

    /// The raw schema document does not have a supported shape.
    #[error("malformed schema: {reason}")]
    MalformedSchema { reason: String },

    /// The value handed to the engine is not a string-keyed record.
    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// Options or files could not be read or parsed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the fieldcheck crates.
pub type FieldcheckResult<T> = Result<T, FieldcheckError>;
