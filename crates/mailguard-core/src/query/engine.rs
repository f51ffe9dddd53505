//! The query pipeline.

use std::cmp::Ordering;

use super::spec::{QuerySpec, SortField, SortOrder};
use crate::classify::ClassifiedMessage;
use crate::message::Message;
use crate::rules::RuleSet;

/// Classify, filter and sort a message collection.
///
/// Stages run in order: classification, search, read state, external only,
/// then a stable sort. When `show_read` and `show_unread` are both off the
/// read-state stage passes everything through, same as when both are on.
#[must_use]
pub fn query(
    messages: &[Message],
    domain: &str,
    rules: &RuleSet,
    spec: &QuerySpec,
) -> Vec<ClassifiedMessage> {
    let needle = spec.search.to_lowercase();

    let mut results: Vec<ClassifiedMessage> = messages
        .iter()
        .map(|m| ClassifiedMessage::new(m.clone(), domain, rules))
        .filter(|c| needle.is_empty() || c.message.matches_search(&needle))
        .filter(|c| match (spec.show_read, spec.show_unread) {
            (true, false) => c.message.read,
            (false, true) => !c.message.read,
            _ => true,
        })
        .filter(|c| !spec.show_external_only || c.classification.is_external)
        .collect();

    results.sort_by(|a, b| {
        let ordering = compare(&a.message, &b.message, spec.sort_field);
        match spec.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    results
}

// Sender names compare as plain strings; no locale collation.
fn compare(a: &Message, b: &Message, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.timestamp.cmp(&b.timestamp),
        SortField::Sender => a.sender.name.cmp(&b.sender.name),
        SortField::Subject => a.subject.cmp(&b.subject),
    }
}
