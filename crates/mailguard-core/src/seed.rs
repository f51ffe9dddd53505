//! Sample rules and messages for a fresh installation.

use chrono::{DateTime, Duration, Utc};

use crate::message::{Attachment, Message, MessageId, Sender};
use crate::rules::{BlacklistRule, RuleId, RuleKind, RuleSet, Severity};
use crate::validation::ValidationError;

const RECIPIENT: &str = "jane.doe@safecorp.com";

/// The starter rule set.
///
/// # Errors
///
/// Returns `ValidationError::DuplicateRuleId` if two starter rules share an id.
pub fn default_rules() -> std::result::Result<RuleSet, ValidationError> {
    let rule = |id: &str, kind, value: &str, severity, description: &str| BlacklistRule {
        id: RuleId::new(id),
        kind,
        value: value.to_string(),
        severity,
        description: description.to_string(),
    };

    RuleSet::from_rules(vec![
        rule(
            "1",
            RuleKind::Domain,
            "suspicious-mail.com",
            Severity::High,
            "Known phishing domain",
        ),
        rule(
            "2",
            RuleKind::Domain,
            "malware-news.org",
            Severity::High,
            "Associated with malware distribution",
        ),
        rule(
            "3",
            RuleKind::Address,
            "ceo@competitor.com",
            Severity::Medium,
            "Competitor company",
        ),
        rule(
            "4",
            RuleKind::Keyword,
            "urgent wire transfer",
            Severity::Medium,
            "Common in financial scams",
        ),
        rule(
            "5",
            RuleKind::Keyword,
            "password expired",
            Severity::Medium,
            "Common in credential phishing",
        ),
    ])
}

/// Eight sample messages received in the days before `now`.
#[must_use]
pub fn sample_messages(now: DateTime<Utc>) -> Vec<Message> {
    let at = |hours: i64| now - Duration::hours(hours);

    vec![
        message(
            "1",
            sender("John Smith", "john.smith@safecorp.com", Some("SafeCorp")),
            "Team Meeting Notes",
            "Hi Jane,\n\nHere are the notes from yesterday's team meeting:\n\n\
             - Project Alpha is on track for Q3 release\n\
             - New security protocols to be implemented next week\n\
             - Budget review scheduled for Friday\n\nBest,\nJohn",
            at(3),
            false,
        ),
        message(
            "2",
            sender("Marketing Team", "marketing@safecorp.com", Some("SafeCorp")),
            "New Campaign Materials",
            "Hello team,\n\nThe new marketing materials for the summer campaign are now \
             available in the shared drive.\n\nPlease review by EOD.\n\nThanks,\nMarketing Team",
            at(27),
            true,
        ),
        message(
            "3",
            sender(
                "Michael Johnson",
                "michael@partner-company.com",
                Some("Partner Company"),
            ),
            "Partnership Opportunity",
            "Dear Jane,\n\nI wanted to discuss a potential partnership opportunity between \
             our companies.\n\nCould we schedule a call next week?\n\n\
             Best regards,\nMichael Johnson",
            at(30),
            false,
        ),
        Message {
            attachments: Some(vec![Attachment {
                id: "a1".to_string(),
                filename: "password_reset.exe".to_string(),
                size: "1.2 MB".to_string(),
                content_type: "application/exe".to_string(),
            }]),
            ..message(
                "4",
                sender("Security Alert", "no-reply@suspicious-mail.com", None),
                "Your Account Password Has Expired",
                "URGENT: Your account password has expired. Click the link below to reset \
                 your password immediately to avoid account suspension.\n\n\
                 https://safecorp-account-verify.suspicious-mail.com/reset?token=a1b2c3d4e5f6\n\n\
                 Security Department\nSafeCorp IT Team",
                at(5),
                false,
            )
        },
        message(
            "5",
            sender("CEO", "ceo@competitor.com", Some("Competitor Inc.")),
            "Urgent Business Proposal",
            "Hello,\n\nI have an urgent business matter to discuss with you.\n\n\
             Please contact me at your earliest convenience.\n\nRegards,\nCEO",
            at(50),
            false,
        ),
        message(
            "6",
            sender("IT Department", "it@safecorp.com", Some("SafeCorp")),
            "System Maintenance",
            "All employees,\n\nWe will be performing system maintenance this weekend.\n\n\
             Please save your work and log out before leaving on Friday.\n\n\
             Thank you,\nIT Department",
            at(75),
            true,
        ),
        message(
            "7",
            sender("Newsletter", "news@tech-updates.com", None),
            "Weekly Tech News",
            "This Week in Tech:\n\n- New cybersecurity threats emerging\n\
             - Industry updates and trends\n- Upcoming technology conferences",
            at(100),
            true,
        ),
        message(
            "8",
            sender("Jane Wilson", "jane.wilson@malware-news.org", None),
            "Urgent Wire Transfer Needed",
            "Dear Colleague,\n\nI need your assistance with an urgent wire transfer.\n\n\
             Please let me know if you can help with this confidential matter.\n\n\
             Regards,\nJane Wilson",
            at(8),
            false,
        ),
    ]
}

fn sender(name: &str, address: &str, organization: Option<&str>) -> Sender {
    Sender {
        name: name.to_string(),
        address: address.to_string(),
        organization: organization.map(ToString::to_string),
    }
}

fn message(
    id: &str,
    sender: Sender,
    subject: &str,
    body: &str,
    timestamp: DateTime<Utc>,
    read: bool,
) -> Message {
    Message {
        id: MessageId::new(id),
        sender,
        recipient: RECIPIENT.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
        timestamp,
        read,
        attachments: None,
    }
}
