//! Command line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mailguard_core::{RuleKind, Severity, SortField, SortOrder};

/// Classify and browse a security-filtered inbox.
#[derive(Debug, Parser)]
#[command(name = "mailguard", version, about)]
pub struct Cli {
    /// Database path (defaults to the user data directory).
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the sample rules and messages.
    Seed,
    /// List messages.
    List(ListArgs),
    /// Show one message with its security details.
    Show {
        /// Message id.
        id: String,
    },
    /// Mark a message as read.
    Read {
        /// Message id.
        id: String,
    },
    /// Set the organization trust domain. An empty string marks every sender external.
    Domain {
        /// New trust domain.
        domain: String,
    },
    /// Manage blacklist rules.
    #[command(subcommand)]
    Rules(RulesCommand),
    /// Show message counts.
    Summary,
}

/// Filter and sort options for `list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Free-text search over subject, sender and body.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Include read messages.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub show_read: bool,

    /// Include unread messages.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub show_unread: bool,

    /// Only messages from outside the trust domain.
    #[arg(long)]
    pub external_only: bool,

    /// Sort field: date, sender or subject.
    #[arg(long, default_value = "date")]
    pub sort: SortField,

    /// Sort order: asc or desc.
    #[arg(long, default_value = "desc")]
    pub order: SortOrder,
}

/// Rule management commands.
#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// List rules, highest severity first.
    List,
    /// Add a rule.
    Add {
        /// Rule kind: domain, address or keyword.
        kind: RuleKind,
        /// Value to match.
        value: String,
        /// Severity: low, medium or high.
        severity: Severity,
        /// Why the rule exists.
        description: String,
    },
    /// Remove a rule.
    Remove {
        /// Rule id.
        id: String,
        /// Confirm removal of a high-severity rule.
        #[arg(long)]
        confirm: bool,
    },
}
