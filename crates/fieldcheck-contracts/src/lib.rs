//! # fieldcheck-contracts
//!
//! Shared types, options, and errors for the fieldcheck validator.
//!
//! All crates in the workspace import from here. No validation logic lives in
//! this crate, only data definitions and error types.

pub mod error;
pub mod options;
pub mod report;
pub mod rule;

pub use error::{FieldcheckError, FieldcheckResult};
pub use options::{MessageFn, MessageOverrides, ValidatorOptions};
pub use report::ErrorMap;
pub use rule::{RuleKind, TypeKind, UnknownRuleName};
