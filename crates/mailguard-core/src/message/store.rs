//! In-memory message collection with read-state mutation.

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::model::{Message, MessageId};

/// Holds the message collection.
///
/// Readers and the mark-read writer are serialized by one lock, so a reader
/// always sees the whole collection in a single state.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: RwLock<Vec<Message>>,
}

impl MessageStore {
    /// Create a store holding the given messages in ingestion order.
    #[must_use]
    pub const fn new(messages: Vec<Message>) -> Self {
        Self {
            messages: RwLock::new(messages),
        }
    }

    /// Run `f` against the collection while holding the read lock.
    pub fn with_messages<R>(&self, f: impl FnOnce(&[Message]) -> R) -> R {
        let guard = self.messages.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Copy of every message.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.with_messages(<[Message]>::to_vec)
    }

    /// Look up a message by id.
    #[must_use]
    pub fn get(&self, id: &MessageId) -> Option<Message> {
        self.with_messages(|messages| messages.iter().find(|m| &m.id == id).cloned())
    }

    /// Number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.with_messages(<[Message]>::len)
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark a message as read.
    ///
    /// Returns `true` only when the flag moved from unread to read. Unknown
    /// ids and already-read messages are left alone.
    pub fn mark_read(&self, id: &MessageId) -> bool {
        let mut guard = self
            .messages
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match guard.iter_mut().find(|m| &m.id == id) {
            Some(message) if !message.read => {
                message.read = true;
                debug!(%id, "Marked message as read");
                true
            }
            Some(_) => false,
            None => {
                debug!(%id, "mark_read on unknown message ignored");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::message::Sender;

    fn message(id: &str, read: bool) -> Message {
        Message {
            id: MessageId::new(id),
            sender: Sender::new("John", "john@safecorp.com"),
            recipient: "jane@safecorp.com".into(),
            subject: "Hello".into(),
            body: "Body".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 24, 10, 0, 0).unwrap(),
            read,
            attachments: None,
        }
    }

    #[test]
    fn test_mark_read_transitions_once() {
        let store = MessageStore::new(vec![message("1", false)]);
        let id = MessageId::new("1");

        assert!(store.mark_read(&id));
        assert!(!store.mark_read(&id));
        assert!(store.get(&id).unwrap().read);
    }

    #[test]
    fn test_mark_read_twice_equals_once() {
        let once = MessageStore::new(vec![message("1", false), message("2", false)]);
        let twice = MessageStore::new(vec![message("1", false), message("2", false)]);
        let id = MessageId::new("2");

        once.mark_read(&id);
        twice.mark_read(&id);
        twice.mark_read(&id);

        assert_eq!(once.messages(), twice.messages());
    }

    #[test]
    fn test_mark_read_unknown_is_noop() {
        let store = MessageStore::new(vec![message("1", false)]);
        let before = store.messages();

        assert!(!store.mark_read(&MessageId::new("missing")));
        assert_eq!(store.messages(), before);
    }

    #[test]
    fn test_empty_store() {
        let store = MessageStore::default();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.get(&MessageId::new("1")).is_none());
    }
}
