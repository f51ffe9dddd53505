//! Shared holder for the current [`SecurityConfig`] snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::config::SecurityConfig;
use super::model::RuleSet;

/// Holds the current security configuration.
///
/// The snapshot lives behind a single `Arc`. Writers build a replacement and
/// swap the pointer; readers clone the `Arc` and keep a consistent view for as
/// long as they hold it.
#[derive(Debug, Default)]
pub struct RuleStore {
    current: RwLock<Arc<SecurityConfig>>,
}

impl RuleStore {
    /// Create a store with an initial configuration.
    #[must_use]
    pub fn new(config: SecurityConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<SecurityConfig> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// The current rule set.
    #[must_use]
    pub fn rules(&self) -> RuleSet {
        self.snapshot().rules.clone()
    }

    /// The current trust domain.
    #[must_use]
    pub fn domain(&self) -> String {
        self.snapshot().domain().to_string()
    }

    /// Replace the whole rule set.
    pub fn replace_rules(&self, rules: RuleSet) {
        self.update(None, Some(rules));
    }

    /// Replace the trust domain. Accepted verbatim, including empty.
    pub fn set_domain(&self, domain: impl Into<String>) {
        self.update(Some(domain.into()), None);
    }

    /// Replace the domain, the rules, or both in one swap.
    pub fn update(&self, domain: Option<String>, rules: Option<RuleSet>) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);

        let mut next = SecurityConfig::clone(&guard);
        if let Some(domain) = domain {
            info!(%domain, "Trust domain updated");
            next.organization.domain = domain;
        }
        if let Some(rules) = rules {
            info!(count = rules.len(), "Blacklist rules replaced");
            next.rules = rules;
        }

        *guard = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{BlacklistRule, OrganizationConfig, RuleId, RuleKind, Severity};

    fn rules(values: &[&str]) -> RuleSet {
        RuleSet::from_rules(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| BlacklistRule {
                    id: RuleId::new((i + 1).to_string()),
                    kind: RuleKind::Domain,
                    value: (*v).to_string(),
                    severity: Severity::Medium,
                    description: "test".into(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let store = RuleStore::default();
        assert_eq!(store.domain(), "safecorp.com");
        assert!(store.rules().is_empty());
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_swap() {
        let store = RuleStore::new(SecurityConfig::new(
            OrganizationConfig::default(),
            rules(&["a.com"]),
        ));

        let before = store.snapshot();
        store.replace_rules(rules(&["b.com", "c.com"]));

        assert_eq!(before.rules.len(), 1);
        assert_eq!(store.rules().len(), 2);
    }

    #[test]
    fn test_readers_never_see_partial_rule_swap() {
        let one = rules(&["a.com"]);
        let three = rules(&["b.com", "c.com", "d.com"]);
        let store = RuleStore::new(SecurityConfig::new(
            OrganizationConfig::default(),
            one.clone(),
        ));

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..500 {
                    store.replace_rules(three.clone());
                    store.replace_rules(one.clone());
                }
            });

            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..500 {
                        let seen = store.rules();
                        assert!(seen == one || seen == three);
                    }
                });
            }
        });
    }

    #[test]
    fn test_update_keeps_untouched_half() {
        let store = RuleStore::new(SecurityConfig::new(
            OrganizationConfig::default(),
            rules(&["a.com"]),
        ));

        store.set_domain("");
        assert_eq!(store.domain(), "");
        assert_eq!(store.rules().len(), 1);

        store.update(Some("corp.example".into()), Some(RuleSet::new()));
        assert_eq!(store.domain(), "corp.example");
        assert!(store.rules().is_empty());
    }
}
