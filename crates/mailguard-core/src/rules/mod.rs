//! Blacklist rules and the organization's trust domain.
//!
//! The rule set and domain are read together as one immutable
//! [`SecurityConfig`] snapshot. Updates build a new snapshot and swap it in
//! whole, so a reader never observes half of an edit.

mod config;
mod model;
mod store;

pub use config::{OrganizationConfig, SecurityConfig};
pub use model::{BlacklistRule, NewRule, RuleId, RuleKind, RuleSet, Severity};
pub use store::RuleStore;
