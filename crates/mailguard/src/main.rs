//! `MailGuard` - security-filtered inbox on the command line.
//!
//! Loads the inbox from a local `SQLite` database, runs one command, and
//! writes any changes back.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod view;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use mailguard_core::{
    Error as CoreError, MailGuard, MessageId, NewRule, QuerySpec, RuleId, SqliteStore,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command, ListArgs, RulesCommand};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailguard=info,mailguard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };
    let store = SqliteStore::new(&db_path.to_string_lossy())
        .await
        .with_context(|| format!("opening database {}", db_path.display()))?;

    if matches!(cli.command, Command::Seed) {
        MailGuard::seed(&store, chrono::Utc::now()).await?;
        println!("Seeded sample inbox into {}", db_path.display());
        return Ok(());
    }

    let inbox = MailGuard::load(&store).await?;

    match cli.command {
        // Seeding returns before the inbox is loaded.
        Command::Seed => {}
        Command::List(args) => list(&inbox, args),
        Command::Show { id } => {
            let id = MessageId::new(id);
            let Some(item) = inbox.get_by_id(&id) else {
                bail!("no message with id {id}");
            };
            println!("{}", view::message_detail(&item));
            if inbox.mark_read(&id) {
                inbox.flush(&store).await?;
            }
        }
        Command::Read { id } => {
            if inbox.mark_read(&MessageId::new(id)) {
                inbox.flush(&store).await?;
            }
        }
        Command::Domain { domain } => {
            inbox.update_security_config(Some(domain), None);
            inbox.flush(&store).await?;
        }
        Command::Rules(command) => rules(&inbox, &store, command).await?,
        Command::Summary => println!("{}", view::summary(&inbox.summary())),
    }

    Ok(())
}

fn list(inbox: &MailGuard, args: ListArgs) {
    let spec = QuerySpec::default()
        .with_search(args.search)
        .with_read_state(args.show_read, args.show_unread)
        .external_only(args.external_only)
        .sorted_by(args.sort, args.order);

    let results = inbox.query(&spec);
    for item in &results {
        println!("{}", view::message_line(item));
    }
    info!(count = results.len(), "Listed messages");
}

async fn rules(inbox: &MailGuard, store: &SqliteStore, command: RulesCommand) -> Result<()> {
    let current = inbox.security_config().rules.clone();

    let updated = match command {
        RulesCommand::List => {
            for rule in current.by_severity() {
                println!("{}", view::rule_line(rule));
            }
            return Ok(());
        }
        RulesCommand::Add {
            kind,
            value,
            severity,
            description,
        } => {
            let rule = NewRule {
                kind,
                value,
                severity,
                description,
            };
            match current.with_rule(rule) {
                Ok(rules) => rules,
                Err(e) => bail!("invalid rule {}: {e}", e.field()),
            }
        }
        RulesCommand::Remove { id, confirm } => {
            match current.without_rule(&RuleId::new(id), confirm) {
                Ok(rules) => rules,
                Err(CoreError::ConfirmationRequired(id)) => {
                    bail!(
                        "rule {id} is high severity; removing it may expose the organization. \
                         Re-run with --confirm to proceed"
                    )
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    inbox.update_security_config(None, Some(updated));
    inbox.flush(store).await?;
    Ok(())
}

/// Default database location under the user data directory.
fn default_db_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailguard");

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;

    Ok(data_dir.join("mailguard.db"))
}
