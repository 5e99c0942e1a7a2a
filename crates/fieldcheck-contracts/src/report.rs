//! The per-field failure report produced by an evaluation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name → ordered failure messages.
///
/// A field is present only when at least one message was recorded for it,
/// so an empty map means the record passed. Serializes as a plain JSON
/// object; deserializing rejects a field with an empty message list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct ErrorMap {
    inner: BTreeMap<String, Vec<String>>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to the list for `field`, creating it on first use.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.inner
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.inner.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.inner.contains_key(field)
    }

    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterate failing fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.inner
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for ErrorMap {
    type Error = String;

    fn try_from(inner: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        if let Some((field, _)) = inner.iter().find(|(_, messages)| messages.is_empty()) {
            return Err(format!("field '{field}' has no messages"));
        }
        Ok(Self { inner })
    }
}

impl From<ErrorMap> for BTreeMap<String, Vec<String>> {
    fn from(errors: ErrorMap) -> Self {
        errors.inner
    }
}
