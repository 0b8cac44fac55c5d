//! Message definitions and checker registration metadata.
//!
//! The table here is immutable static data: one entry per message the
//! checker can emit, plus the metadata a host needs to register the checker.

use serde::Serialize;

/// Placeholder substituted by [`MessageDefinition::render`].
const SITE_PLACEHOLDER: &str = "{site}";

/// A message the checker can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageDefinition {
    /// Stable message code (e.g. `E3107`).
    pub msgid: &'static str,
    /// Symbolic name hosts use to enable or disable the message.
    pub symbol: &'static str,
    /// Human message with a `{site}` placeholder.
    pub template: &'static str,
    /// Longer help text for documentation.
    pub description: &'static str,
}

impl MessageDefinition {
    /// Render the template with the given site text.
    pub fn render(&self, site: &str) -> String {
        self.template.replace(SITE_PLACEHOLDER, site)
    }
}

/// The `no-type-hints` message.
pub const NO_TYPE_HINTS: MessageDefinition = MessageDefinition {
    msgid: "E3107",
    symbol: "no-type-hints",
    template: "Type hints are banned in {site}",
    description: "Type hints are banned, walk like a duck",
};

/// Registration metadata for a checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckerInfo {
    /// Checker name, also the host's configuration section name.
    pub name: &'static str,
    /// Ordering hint; lower runs later.
    pub priority: i32,
    /// Every message the checker may emit.
    pub messages: &'static [MessageDefinition],
}

impl CheckerInfo {
    /// Look up a message by symbol or msgid.
    pub fn message(&self, key: &str) -> Option<&'static MessageDefinition> {
        self.messages
            .iter()
            .find(|m| m.symbol == key || m.msgid == key)
    }
}

/// The quacking checker: bans PEP 484 type hints.
pub const QUACKING: CheckerInfo = CheckerInfo {
    name: "quacking",
    priority: -1,
    messages: &[NO_TYPE_HINTS],
};
