//! Rule descriptor parsing.
//!
//! A descriptor is the compact `name:value` text that names a rule and its
//! parameter. Only the first colon separates the two, so parameters that
//! themselves contain colons (`regex:/^a:b$/`, `==::`) survive untouched.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A parsed `name:value` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Text before the first colon.
    pub name: String,
    /// Text after the first colon, or `None` when there is no colon.
    pub value: Option<String>,
}

impl RuleDescriptor {
    /// Split `text` on its first colon.
    pub fn parse(text: &str) -> Self {
        match text.split_once(':') {
            Some((name, value)) => Self {
                name: name.to_string(),
                value: Some(value.to_string()),
            },
            None => Self {
                name: text.to_string(),
                value: None,
            },
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl FromStr for RuleDescriptor {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}:{}", self.name, value),
            None => f.write_str(&self.name),
        }
    }
}
