//! Error types for the core library.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Caller-supplied value was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Blacklist rule not found.
    #[error("Rule not found: {0}")]
    RuleNotFound(String),

    /// Removing a high-severity rule needs explicit confirmation.
    #[error("Removing high-severity rule {0} requires confirmation")]
    ConfirmationRequired(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
