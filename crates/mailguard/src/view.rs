//! Plain text rendering.

use mailguard_core::{BlacklistRule, ClassifiedMessage, InboxSummary};

/// One line per message.
pub fn message_line(item: &ClassifiedMessage) -> String {
    let message = &item.message;
    let c = &item.classification;

    let mut flags = String::new();
    flags.push(if message.read { ' ' } else { '*' });
    flags.push(if c.is_external { 'E' } else { '-' });
    flags.push(if c.is_blacklisted { 'B' } else { '-' });

    format!(
        "{flags} {:>4}  {}  {:<24}  {}",
        message.id.0,
        message.timestamp.format("%Y-%m-%d %H:%M"),
        truncate(&message.sender.name, 24),
        message.subject
    )
}

/// Full message with security details.
pub fn message_detail(item: &ClassifiedMessage) -> String {
    let message = &item.message;
    let c = &item.classification;

    let mut out = format!(
        "From:    {} <{}>\nTo:      {}\nDate:    {}\nSubject: {}\n",
        message.sender.name,
        message.sender.address,
        message.recipient,
        message.timestamp.to_rfc3339(),
        message.subject
    );

    if c.is_flagged {
        out.push_str("\nSecurity:\n");
        if let Some(severity) = c.highest_severity() {
            out.push_str(&format!("  Highest severity: {}\n", severity.as_str()));
        }
        if c.is_external {
            out.push_str("  External sender\n");
        }
        for rule in &c.matched_rules {
            out.push_str(&format!(
                "  [{}] {}: {:?} ({})\n",
                rule.severity.as_str(),
                rule.kind.display_name(),
                rule.value,
                rule.description
            ));
        }
    }

    if let Some(attachments) = &message.attachments {
        let unsafe_count = message.unsafe_attachments().count();
        out.push_str(&format!(
            "\nAttachments ({}, {unsafe_count} potentially unsafe):\n",
            attachments.len()
        ));
        for attachment in attachments {
            let warning = if attachment.is_potentially_unsafe() {
                "  POTENTIALLY UNSAFE"
            } else {
                ""
            };
            out.push_str(&format!(
                "  {} ({}){warning}\n",
                attachment.filename, attachment.size
            ));
        }
    }

    out.push('\n');
    out.push_str(&message.body);
    out
}

/// One line per rule.
pub fn rule_line(rule: &BlacklistRule) -> String {
    format!(
        "{:>4}  {:<8} {:<7} {:<28} {}",
        rule.id.0,
        rule.kind.as_str(),
        rule.severity.as_str(),
        rule.value,
        rule.description
    )
}

/// Counts summary.
pub fn summary(summary: &InboxSummary) -> String {
    format!(
        "total: {}\nunread: {}\nexternal: {}\nblacklisted: {}\nflagged: {}",
        summary.total, summary.unread, summary.external, summary.blacklisted, summary.flagged
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mailguard_core::{MessageId, seed};

    use super::*;

    #[test]
    fn test_message_detail_security_and_attachments() {
        let rules = seed::default_rules().unwrap();
        let message = seed::sample_messages(Utc::now())
            .into_iter()
            .find(|m| m.id == MessageId::new("4"))
            .unwrap();
        let detail = message_detail(&ClassifiedMessage::new(message, "safecorp.com", &rules));

        assert!(detail.contains("Highest severity: high"));
        assert!(detail.contains("External sender"));
        assert!(detail.contains("1 potentially unsafe"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 24), "short");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
