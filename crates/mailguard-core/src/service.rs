//! The host-facing facade.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::Result;
use crate::classify::{ClassifiedMessage, classify};
use crate::message::{MessageId, MessageStore};
use crate::query::{QuerySpec, query};
use crate::rules::{OrganizationConfig, RuleSet, RuleStore, SecurityConfig};
use crate::seed;
use crate::storage::{self, KeyValueStore};

/// Message counts for the current configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InboxSummary {
    /// All messages.
    pub total: usize,
    /// Unread messages.
    pub unread: usize,
    /// Messages from outside the trust domain.
    pub external: usize,
    /// Messages matching at least one rule.
    pub blacklisted: usize,
    /// External or blacklisted.
    pub flagged: usize,
}

/// Classified inbox over a message store and a rule store.
///
/// Classification happens on every read, so configuration updates show up
/// on the next call without any invalidation.
#[derive(Debug, Default)]
pub struct MailGuard {
    messages: MessageStore,
    rules: RuleStore,
}

impl MailGuard {
    /// Create a facade from its two stores.
    #[must_use]
    pub const fn new(messages: MessageStore, rules: RuleStore) -> Self {
        Self { messages, rules }
    }

    /// Load messages and configuration from a key-value store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or holds a corrupt document.
    pub async fn load<S: KeyValueStore>(store: &S) -> Result<Self> {
        let config = storage::load_security_config(store).await?;
        let messages = storage::load_messages(store).await?;
        info!(
            messages = messages.len(),
            rules = config.rules.len(),
            domain = %config.domain(),
            "Loaded inbox"
        );
        Ok(Self::new(MessageStore::new(messages), RuleStore::new(config)))
    }

    /// Write messages and configuration back to a key-value store.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store fails.
    pub async fn flush<S: KeyValueStore>(&self, store: &S) -> Result<()> {
        let config = self.rules.snapshot();
        let messages = self.messages.messages();
        storage::save_security_config(store, &config).await?;
        storage::save_messages(store, &messages).await?;
        debug!(messages = messages.len(), "Flushed inbox");
        Ok(())
    }

    /// Write the sample rules and messages to a key-value store.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the store fails.
    pub async fn seed<S: KeyValueStore>(store: &S, now: DateTime<Utc>) -> Result<()> {
        let config = SecurityConfig::new(OrganizationConfig::default(), seed::default_rules()?);
        storage::save_security_config(store, &config).await?;
        storage::save_messages(store, &seed::sample_messages(now)).await?;
        info!("Seeded sample inbox");
        Ok(())
    }

    /// Classified, filtered and sorted messages.
    #[must_use]
    pub fn query(&self, spec: &QuerySpec) -> Vec<ClassifiedMessage> {
        let config = self.rules.snapshot();
        self.messages
            .with_messages(|messages| query(messages, config.domain(), &config.rules, spec))
    }

    /// A single classified message.
    #[must_use]
    pub fn get_by_id(&self, id: &MessageId) -> Option<ClassifiedMessage> {
        let config = self.rules.snapshot();
        self.messages
            .get(id)
            .map(|m| ClassifiedMessage::new(m, config.domain(), &config.rules))
    }

    /// Mark a message as read. Unknown ids are a no-op.
    ///
    /// Returns `true` when the message changed from unread to read.
    pub fn mark_read(&self, id: &MessageId) -> bool {
        self.messages.mark_read(id)
    }

    /// Replace the trust domain, the rule set, or both, atomically.
    ///
    /// Nothing is reclassified here; the next read uses the new values.
    pub fn update_security_config(&self, domain: Option<String>, rules: Option<RuleSet>) {
        self.rules.update(domain, rules);
    }

    /// The current configuration snapshot.
    #[must_use]
    pub fn security_config(&self) -> Arc<SecurityConfig> {
        self.rules.snapshot()
    }

    /// Counts over the whole collection.
    #[must_use]
    pub fn summary(&self) -> InboxSummary {
        let config = self.rules.snapshot();
        self.messages.with_messages(|messages| {
            messages
                .iter()
                .fold(InboxSummary::default(), |mut summary, message| {
                    let c = classify(message, config.domain(), &config.rules);
                    summary.total += 1;
                    summary.unread += usize::from(!message.read);
                    summary.external += usize::from(c.is_external);
                    summary.blacklisted += usize::from(c.is_blacklisted);
                    summary.flagged += usize::from(c.is_flagged);
                    summary
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{BlacklistRule, NewRule, RuleId, RuleKind, Severity};
    use crate::storage::MemoryStore;

    fn sample() -> MailGuard {
        MailGuard::new(
            MessageStore::new(seed::sample_messages(Utc::now())),
            RuleStore::new(SecurityConfig::new(
                OrganizationConfig::default(),
                seed::default_rules().unwrap(),
            )),
        )
    }

    #[test]
    fn test_rule_update_changes_next_query() {
        let guard = sample();
        let id = MessageId::new("7");

        assert!(!guard.get_by_id(&id).unwrap().classification.is_blacklisted);

        let rules = guard
            .security_config()
            .rules
            .with_rule(NewRule {
                kind: RuleKind::Domain,
                value: "TECH-UPDATES.com".into(),
                severity: Severity::Low,
                description: "Unwanted newsletter".into(),
            })
            .unwrap();
        guard.update_security_config(None, Some(rules));

        assert!(guard.get_by_id(&id).unwrap().classification.is_blacklisted);
    }

    #[test]
    fn test_domain_update_changes_next_query() {
        let guard = sample();
        let internal = QuerySpec::default().external_only(true);
        assert_eq!(guard.query(&internal).len(), 5);

        guard.update_security_config(Some(String::new()), None);
        assert_eq!(guard.query(&internal).len(), 8);

        guard.update_security_config(Some("partner-company.com".into()), None);
        assert_eq!(guard.query(&internal).len(), 7);
    }

    #[test]
    fn test_queries_see_whole_config_during_concurrent_updates() {
        let guard = sample();
        let id = MessageId::new("7");
        let rule = |id: &str| BlacklistRule {
            id: RuleId::new(id),
            kind: RuleKind::Address,
            value: "news@tech-updates.com".into(),
            severity: Severity::Low,
            description: "newsletter".into(),
        };
        let internal = RuleSet::from_rules(vec![rule("a")]).unwrap();
        let external = RuleSet::from_rules(vec![rule("b")]).unwrap();
        let newsletter = QuerySpec::default().with_search("tech-updates");

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..500 {
                    guard.update_security_config(
                        Some("tech-updates.com".into()),
                        Some(internal.clone()),
                    );
                    guard.update_security_config(
                        Some("safecorp.com".into()),
                        Some(external.clone()),
                    );
                }
            });

            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..500 {
                        let by_query = guard.query(&newsletter);
                        let by_id = guard.get_by_id(&id).unwrap();
                        for c in by_query.iter().chain(std::iter::once(&by_id)) {
                            let matched: Vec<_> = c
                                .classification
                                .matched_rules
                                .iter()
                                .map(|r| r.id.0.as_str())
                                .collect();
                            if c.classification.is_external {
                                assert_eq!(matched, ["b"]);
                            } else {
                                assert_eq!(matched, ["a"]);
                            }
                        }
                    }
                });
            }
        });
    }

    #[test]
    fn test_get_by_id_unknown() {
        assert!(sample().get_by_id(&MessageId::new("99")).is_none());
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let guard = sample();
        let id = MessageId::new("1");

        assert!(guard.mark_read(&id));
        let after_once = guard.query(&QuerySpec::default());
        assert!(!guard.mark_read(&id));
        assert_eq!(guard.query(&QuerySpec::default()), after_once);
        assert!(!guard.mark_read(&MessageId::new("missing")));
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(
            summary,
            InboxSummary {
                total: 8,
                unread: 5,
                external: 5,
                blacklisted: 3,
                flagged: 5,
            }
        );
    }

    #[tokio::test]
    async fn test_seed_load_flush() {
        let store = MemoryStore::new();
        MailGuard::seed(&store, Utc::now()).await.unwrap();

        let guard = MailGuard::load(&store).await.unwrap();
        assert_eq!(guard.summary().total, 8);
        guard.mark_read(&MessageId::new("4"));
        guard.update_security_config(Some("corp.example".into()), None);
        guard.flush(&store).await.unwrap();

        let reloaded = MailGuard::load(&store).await.unwrap();
        assert!(reloaded.get_by_id(&MessageId::new("4")).unwrap().message.read);
        assert_eq!(reloaded.security_config().domain(), "corp.example");
        assert_eq!(reloaded.security_config().rules.len(), 5);
    }
}
