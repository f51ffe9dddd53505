//! # mailguard-core
//!
//! Security classification and query engine for the `MailGuard` inbox.
//!
//! This crate provides:
//! - **Classification**: external-sender detection against the organization's
//!   trust domain, and blacklist matching on sender domain, sender address
//!   and message content
//! - **Query pipeline**: free-text search, read/unread and external filters,
//!   and stable sorting over the classified collection
//! - **Stores**: shared message and rule stores with snapshot semantics
//! - **Storage boundary**: a key-value contract with `SQLite` and in-memory
//!   implementations
//!
//! ## Example
//!
//! ```ignore
//! use mailguard_core::{MailGuard, QuerySpec, SqliteStore};
//!
//! let store = SqliteStore::new("mailguard.db").await?;
//! let inbox = MailGuard::load(&store).await?;
//!
//! for item in inbox.query(&QuerySpec::default().external_only(true)) {
//!     println!("{} flagged={}", item.message.subject, item.classification.is_flagged);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod classify;
mod error;
pub mod message;
pub mod query;
pub mod rules;
pub mod seed;
mod service;
pub mod storage;
mod validation;

pub use classify::{Classification, ClassifiedMessage, classify};
pub use error::{Error, Result};
pub use message::{Attachment, Message, MessageId, MessageStore, Sender};
pub use query::{QuerySpec, SortField, SortOrder, query};
pub use rules::{
    BlacklistRule, NewRule, OrganizationConfig, RuleId, RuleKind, RuleSet, RuleStore,
    SecurityConfig, Severity,
};
pub use service::{InboxSummary, MailGuard};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use validation::ValidationError;
