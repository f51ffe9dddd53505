//! Organization trust settings.

use serde::{Deserialize, Serialize};

use super::model::RuleSet;

/// Default trust domain for a fresh installation.
pub const DEFAULT_DOMAIN: &str = "safecorp.com";

/// Default organization display name for a fresh installation.
pub const DEFAULT_ORGANIZATION: &str = "SafeCorp";

/// The organization's trust boundary.
///
/// The domain is taken verbatim. An empty domain is valid and makes every
/// sender external.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConfig {
    /// Trust domain senders are compared against.
    pub domain: String,
    /// Display name, informational only.
    #[serde(default)]
    pub organization: String,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
        }
    }
}

/// Immutable snapshot of everything classification depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Trust boundary.
    pub organization: OrganizationConfig,
    /// Blacklist rules in insertion order.
    pub rules: RuleSet,
}

impl SecurityConfig {
    /// Create a snapshot.
    #[must_use]
    pub const fn new(organization: OrganizationConfig, rules: RuleSet) -> Self {
        Self {
            organization,
            rules,
        }
    }

    /// The trust domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.organization.domain
    }
}
