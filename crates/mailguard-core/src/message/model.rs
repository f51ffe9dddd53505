//! Message model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    /// Create a new message ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who sent a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// Display name.
    pub name: String,
    /// Email address as received (not validated).
    #[serde(rename = "email")]
    pub address: String,
    /// Organization the sender claims to belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Sender {
    /// Creates a sender without an organization.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            organization: None,
        }
    }

    /// Returns the domain part of the address.
    ///
    /// `None` when the address does not contain exactly one `@` or the part
    /// after it is empty.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        let (_, domain) = self.address.split_once('@')?;
        if domain.is_empty() || domain.contains('@') {
            return None;
        }
        Some(domain)
    }
}

/// Attachment metadata. Content is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment identifier.
    pub id: String,
    /// Original filename.
    pub filename: String,
    /// Declared size, e.g. `"1.2 MB"`.
    pub size: String,
    /// MIME-like type string.
    #[serde(rename = "type")]
    pub content_type: String,
}

impl Attachment {
    /// Whether the declared type looks executable.
    #[must_use]
    pub fn is_potentially_unsafe(&self) -> bool {
        self.content_type.to_lowercase().contains("exe")
    }
}

/// An ingested message.
///
/// Everything except `read` is fixed after ingestion. Security status is
/// never stored here; see [`crate::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier.
    pub id: MessageId,
    /// Sender details.
    pub sender: Sender,
    /// Recipient address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub body: String,
    /// When the message was received.
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    /// Whether the message has been read.
    #[serde(default)]
    pub read: bool,
    /// Attachment list, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Message {
    /// Attachments whose type looks executable.
    pub fn unsafe_attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments
            .iter()
            .flatten()
            .filter(|a| a.is_potentially_unsafe())
    }

    /// Whether the free-text search term appears in the subject, sender name,
    /// sender address or body.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.subject.to_lowercase().contains(needle)
            || self.sender.name.to_lowercase().contains(needle)
            || self.sender.address.to_lowercase().contains(needle)
            || self.body.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender(address: &str) -> Sender {
        Sender::new("Test", address)
    }

    #[test]
    fn test_sender_domain() {
        assert_eq!(sender("john@safecorp.com").domain(), Some("safecorp.com"));
        assert_eq!(sender("not-an-email").domain(), None);
        assert_eq!(sender("a@b@c.com").domain(), None);
        assert_eq!(sender("john@").domain(), None);
    }

    #[test]
    fn test_attachment_unsafe_type() {
        let exe = Attachment {
            id: "a1".into(),
            filename: "password_reset.exe".into(),
            size: "1.2 MB".into(),
            content_type: "application/EXE".into(),
        };
        let pdf = Attachment {
            content_type: "application/pdf".into(),
            ..exe.clone()
        };
        assert!(exe.is_potentially_unsafe());
        assert!(!pdf.is_potentially_unsafe());
    }

    #[test]
    fn test_deserialize_original_layout() {
        let json = r#"{
            "id": "4",
            "sender": {"name": "Security Alert", "email": "no-reply@suspicious-mail.com"},
            "recipient": "jane.doe@safecorp.com",
            "subject": "Your Account Password Has Expired",
            "body": "Reset now",
            "date": "2026-01-24T10:00:00Z",
            "read": false,
            "isExternal": true,
            "attachments": [
                {"id": "a1", "filename": "x.exe", "size": "1 MB", "type": "application/exe"}
            ]
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.id, MessageId::new("4"));
        assert_eq!(message.sender.address, "no-reply@suspicious-mail.com");
        assert_eq!(message.unsafe_attachments().count(), 1);
    }
}
