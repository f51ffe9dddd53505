//! Blacklist rule model types.

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;
use crate::{Error, Result};

/// Unique identifier for a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What part of a message a rule is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Exact match on the sender domain.
    Domain,
    /// Exact match on the full sender address.
    #[serde(rename = "email", alias = "address")]
    Address,
    /// Substring match on subject and body.
    Keyword,
}

impl RuleKind {
    /// Storage string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Address => "email",
            Self::Keyword => "keyword",
        }
    }

    /// Human-readable label for a match of this kind.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Domain => "Suspicious domain",
            Self::Address => "Blocked sender",
            Self::Keyword => "Suspicious content",
        }
    }
}

impl std::str::FromStr for RuleKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "domain" => Ok(Self::Domain),
            "address" | "email" => Ok(Self::Address),
            "keyword" => Ok(Self::Keyword),
            _ => Err(ValidationError::UnknownRuleKind(s.to_string())),
        }
    }
}

/// How serious a match is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low severity.
    Low,
    /// Medium severity.
    Medium,
    /// High severity. Removing these needs confirmation.
    High,
}

impl Severity {
    /// Storage string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::UnknownSeverity(s.to_string())),
        }
    }
}

/// A blocking rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistRule {
    /// Unique identifier.
    pub id: RuleId,
    /// What the value is compared against.
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// Pattern value, compared case-insensitively.
    pub value: String,
    /// Severity of a match.
    pub severity: Severity,
    /// Why the rule exists.
    pub description: String,
}

/// A rule as entered by an administrator, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRule {
    /// Rule kind.
    pub kind: RuleKind,
    /// Pattern value.
    pub value: String,
    /// Severity.
    pub severity: Severity,
    /// Description.
    pub description: String,
}

/// Ordered set of blacklist rules with unique ids.
///
/// Editing methods return a new set; install it with
/// [`crate::RuleStore::replace_rules`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BlacklistRule>", into = "Vec<BlacklistRule>")]
pub struct RuleSet {
    rules: Vec<BlacklistRule>,
}

impl RuleSet {
    /// Empty rule set.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build a set from rules in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateRuleId`] if two rules share an id.
    pub fn from_rules(rules: Vec<BlacklistRule>) -> std::result::Result<Self, ValidationError> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.id == rule.id) {
                return Err(ValidationError::DuplicateRuleId(rule.id.0.clone()));
            }
        }
        Ok(Self { rules })
    }

    /// Rules in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, BlacklistRule> {
        self.rules.iter()
    }

    /// Number of rules.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by id.
    #[must_use]
    pub fn get(&self, id: &RuleId) -> Option<&BlacklistRule> {
        self.rules.iter().find(|r| &r.id == id)
    }

    /// Rules ordered highest severity first, ties kept in insertion order.
    #[must_use]
    pub fn by_severity(&self) -> Vec<&BlacklistRule> {
        let mut rules: Vec<_> = self.rules.iter().collect();
        rules.sort_by(|a, b| b.severity.cmp(&a.severity));
        rules
    }

    /// Whether removing this rule needs confirmation.
    #[must_use]
    pub fn requires_confirmation(&self, id: &RuleId) -> bool {
        self.get(id).is_some_and(|r| r.severity == Severity::High)
    }

    /// A copy of this set with `rule` appended under the next free id.
    ///
    /// # Errors
    ///
    /// Returns an error if the value or description is blank.
    pub fn with_rule(&self, rule: NewRule) -> std::result::Result<Self, ValidationError> {
        if rule.value.trim().is_empty() {
            return Err(ValidationError::EmptyRuleValue);
        }
        if rule.description.trim().is_empty() {
            return Err(ValidationError::EmptyRuleDescription);
        }

        let mut rules = self.rules.clone();
        rules.push(BlacklistRule {
            id: self.next_id(),
            kind: rule.kind,
            value: rule.value.trim().to_string(),
            severity: rule.severity,
            description: rule.description.trim().to_string(),
        });
        Ok(Self { rules })
    }

    /// A copy of this set without the rule `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RuleNotFound`] for an unknown id and
    /// [`Error::ConfirmationRequired`] when a high-severity rule is removed
    /// without `confirmed`.
    pub fn without_rule(&self, id: &RuleId, confirmed: bool) -> Result<Self> {
        if self.get(id).is_none() {
            return Err(Error::RuleNotFound(id.0.clone()));
        }
        if self.requires_confirmation(id) && !confirmed {
            return Err(Error::ConfirmationRequired(id.0.clone()));
        }

        let rules = self.rules.iter().filter(|r| &r.id != id).cloned().collect();
        Ok(Self { rules })
    }

    /// One past the largest numeric id. If that overflows, the smallest
    /// positive number not already taken.
    fn next_id(&self) -> RuleId {
        let max = self
            .rules
            .iter()
            .filter_map(|r| r.id.0.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        if let Some(next) = max.checked_add(1) {
            return RuleId(next.to_string());
        }

        // At most `len` ids are taken, so this stops within `len + 1` steps.
        let mut n: u64 = 1;
        loop {
            let id = RuleId(n.to_string());
            if self.get(&id).is_none() {
                return id;
            }
            n = n.saturating_add(1);
        }
    }
}

impl TryFrom<Vec<BlacklistRule>> for RuleSet {
    type Error = ValidationError;

    fn try_from(rules: Vec<BlacklistRule>) -> std::result::Result<Self, Self::Error> {
        Self::from_rules(rules)
    }
}

impl From<RuleSet> for Vec<BlacklistRule> {
    fn from(set: RuleSet) -> Self {
        set.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a BlacklistRule;
    type IntoIter = std::slice::Iter<'a, BlacklistRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
