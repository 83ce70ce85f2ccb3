//! Error types for subdivision sessions
//!
//! Provides error handling for:
//! - Structural lot edits
//! - Blocked submissions
//! - Commit failures reported by the collaborator
//! - Configuration loading

use lotsplit_core::LotSetError;
use lotsplit_validation::ValidationError;

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Lot edit rejected
    #[error("lot edit rejected: {0}")]
    Lot(#[from] LotSetError),

    /// Submission refused by the validation gate
    #[error("submission blocked: {0}")]
    Blocked(#[from] ValidationError),

    /// Committer failed
    #[error("commit failed: {0}")]
    Commit(#[from] CommitError),

    /// The lot set has already been committed
    #[error("subdivision already committed")]
    AlreadyCommitted,
}

impl SessionError {
    /// Whether the user can fix the problem by editing lots
    #[inline]
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        matches!(self, Self::Lot(_) | Self::Blocked(_))
    }
}

/// Failure reported by a [`SubdivisionCommitter`](crate::SubdivisionCommitter)
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// The parent property no longer exists
    #[error("parent property not found: {0}")]
    ParentNotFound(String),

    /// The collaborator refused the request
    #[error("commit rejected: {0}")]
    Rejected(String),

    /// Request could not be encoded
    #[error("failed to encode subdivision request: {0}")]
    Encode(#[from] serde_json::Error),

    /// Output could not be written
    #[error("failed to write subdivision request: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed TOML
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed but out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
