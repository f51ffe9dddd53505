//! Sender trust and blacklist classification.
//!
//! [`classify`] is a pure function of the message, the trust domain and the
//! rule set. Nothing is cached: callers classify against whatever
//! configuration is current when they ask.

use serde::Serialize;
use tracing::debug;

use crate::message::Message;
use crate::rules::{BlacklistRule, RuleKind, RuleSet};

/// Derived security status of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Sender is outside the trust domain, or the address is malformed.
    pub is_external: bool,
    /// Every matching rule, in rule-set order.
    pub matched_rules: Vec<BlacklistRule>,
    /// At least one rule matched.
    pub is_blacklisted: bool,
    /// External or blacklisted.
    pub is_flagged: bool,
}

impl Classification {
    /// Highest severity among the matched rules.
    #[must_use]
    pub fn highest_severity(&self) -> Option<crate::rules::Severity> {
        self.matched_rules.iter().map(|r| r.severity).max()
    }
}

/// A message together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedMessage {
    /// The message.
    #[serde(flatten)]
    pub message: Message,
    /// Its security status under the configuration used for the query.
    #[serde(flatten)]
    pub classification: Classification,
}

impl ClassifiedMessage {
    /// Classify `message` and pair it with the result.
    #[must_use]
    pub fn new(message: Message, domain: &str, rules: &RuleSet) -> Self {
        let classification = classify(&message, domain, rules);
        Self {
            message,
            classification,
        }
    }
}

/// Classify a message against a trust domain and rule set.
///
/// - A malformed sender address (not exactly one `@`, or nothing after it)
///   is external and matches no domain rule.
/// - An empty trust domain makes every sender external.
/// - All comparisons are case-insensitive.
#[must_use]
pub fn classify(message: &Message, domain: &str, rules: &RuleSet) -> Classification {
    let sender_domain = message.sender.domain().map(str::to_lowercase);
    if sender_domain.is_none() {
        debug!(
            id = %message.id,
            address = %message.sender.address,
            "Malformed sender address, treating as external"
        );
    }

    let is_external = match &sender_domain {
        Some(sender_domain) => domain.is_empty() || *sender_domain != domain.to_lowercase(),
        None => true,
    };

    let subject = MatchSubject {
        address: message.sender.address.to_lowercase(),
        domain: sender_domain,
        content: format!("{} {}", message.subject, message.body).to_lowercase(),
    };

    let matched_rules: Vec<BlacklistRule> = rules
        .iter()
        .filter(|rule| subject.matches(rule))
        .cloned()
        .collect();

    let is_blacklisted = !matched_rules.is_empty();

    Classification {
        is_external,
        matched_rules,
        is_blacklisted,
        is_flagged: is_external || is_blacklisted,
    }
}

/// Lowercased message fields the rules are tested against.
struct MatchSubject {
    address: String,
    domain: Option<String>,
    content: String,
}

impl MatchSubject {
    fn matches(&self, rule: &BlacklistRule) -> bool {
        let value = rule.value.to_lowercase();
        match rule.kind {
            RuleKind::Domain => self.domain.as_deref() == Some(value.as_str()),
            RuleKind::Address => self.address == value,
            RuleKind::Keyword => self.content.contains(&value),
        }
    }
}
