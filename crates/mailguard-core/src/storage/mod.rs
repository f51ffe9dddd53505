//! Key-value persistence boundary.
//!
//! The core never touches disk during a query. State crosses this boundary
//! only when the host loads or flushes it. Values are JSON documents stored
//! under fixed keys.

mod memory;
mod sqlite;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::Result;
use crate::message::Message;
use crate::rules::{OrganizationConfig, RuleSet, SecurityConfig};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key holding the message collection.
pub const MESSAGES_KEY: &str = "emails";
/// Key holding the blacklist rules.
pub const RULES_KEY: &str = "blacklistRules";
/// Key holding the organization settings.
pub const SETTINGS_KEY: &str = "userSettings";

/// String key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Read and decode a JSON document, `None` when the key is absent.
///
/// # Errors
///
/// Returns an error if the store fails or the document is not valid JSON for
/// `T`.
pub async fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore,
{
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => {
            debug!(key, "Key not present, using default");
            Ok(None)
        }
    }
}

/// Encode and store a JSON document.
///
/// # Errors
///
/// Returns an error if encoding or the store fails.
pub async fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + Sync,
    S: KeyValueStore,
{
    let raw = serde_json::to_string(value)?;
    store.put(key, &raw).await
}

/// Load the security configuration, falling back to defaults for missing keys.
///
/// # Errors
///
/// Returns an error if the store fails or a stored document is corrupt.
pub async fn load_security_config<S: KeyValueStore>(store: &S) -> Result<SecurityConfig> {
    let organization: OrganizationConfig = load_json(store, SETTINGS_KEY)
        .await?
        .unwrap_or_default();
    let rules: RuleSet = load_json(store, RULES_KEY).await?.unwrap_or_default();
    Ok(SecurityConfig::new(organization, rules))
}

/// Store the security configuration.
///
/// # Errors
///
/// Returns an error if encoding or the store fails.
pub async fn save_security_config<S: KeyValueStore>(
    store: &S,
    config: &SecurityConfig,
) -> Result<()> {
    save_json(store, SETTINGS_KEY, &config.organization).await?;
    save_json(store, RULES_KEY, &config.rules).await
}

/// Load the message collection; empty when nothing is stored.
///
/// # Errors
///
/// Returns an error if the store fails or the document is corrupt.
pub async fn load_messages<S: KeyValueStore>(store: &S) -> Result<Vec<Message>> {
    Ok(load_json(store, MESSAGES_KEY).await?.unwrap_or_default())
}

/// Store the message collection.
///
/// # Errors
///
/// Returns an error if encoding or the store fails.
pub async fn save_messages<S: KeyValueStore>(store: &S, messages: &[Message]) -> Result<()> {
    save_json(store, MESSAGES_KEY, &messages).await
}
