//! # fieldcheck-rules
//!
//! The rule catalog behind the fieldcheck validator.
//!
//! - [`descriptor`] parses `name:value` descriptors.
//! - [`registry`] compiles descriptors into typed [`Rule`]s, tests values
//!   against them and renders the default failure messages.
//! - [`display`] turns raw field keys into the names used in messages.
//! - [`coerce`] holds the loose number/string/equality coercions the rules
//!   are defined in terms of.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use fieldcheck_rules::{Rule, RuleDescriptor};
//!
//! let rule = Rule::compile("age", &RuleDescriptor::parse(">=:18"))?;
//! assert!(rule.test(Some(&serde_json::json!(21)), &serde_json::Map::new()));
//! ```

pub mod coerce;
pub mod descriptor;
pub mod display;
pub mod registry;

pub use descriptor::RuleDescriptor;
pub use display::display_name;
pub use registry::{default_message, Rule};
