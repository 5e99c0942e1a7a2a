//! Options accepted by the validator at construction time.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::rule::RuleKind;

/// Generates a failure message from the field's display name and the rule's
/// parameter (`None` when the descriptor had no `:value` part).
pub type MessageFn = Arc<dyn Fn(&str, Option<&str>) -> String + Send + Sync>;

/// Per-rule message generators that replace the registry defaults.
///
/// Overrides only apply to generated messages. A literal message written in
/// the schema is always used verbatim.
#[derive(Clone, Default)]
pub struct MessageOverrides {
    inner: HashMap<RuleKind, MessageFn>,
}

impl MessageOverrides {
    pub fn insert(&mut self, kind: RuleKind, f: MessageFn) {
        self.inner.insert(kind, f);
    }

    pub fn get(&self, kind: RuleKind) -> Option<&MessageFn> {
        self.inner.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl fmt::Debug for MessageOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.inner.keys().collect();
        kinds.sort();
        f.debug_struct("MessageOverrides")
            .field("rules", &kinds)
            .finish()
    }
}

/// Evaluation options for a validator.
#[derive(Debug, Clone, Default)]
pub struct ValidatorOptions {
    /// Reject record keys that have no schema field.
    pub strict: bool,
    /// Replacement message templates keyed by rule.
    pub messages: MessageOverrides,
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Override the generated message for `kind`.
    pub fn with_message<F>(mut self, kind: RuleKind, f: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> String + Send + Sync + 'static,
    {
        self.messages.insert(kind, Arc::new(f));
        self
    }
}
