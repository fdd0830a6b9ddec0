//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// MessageText validation error
    #[error("MessageText cannot be empty")]
    MessageTextEmpty,
}

/// Errors reported by a message log backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageLogError {
    /// The storage backend rejected or failed the operation
    #[error("message log backend error: {0}")]
    Backend(String),

    /// A message could not be serialized for storage
    #[error("failed to encode message for the log: {0}")]
    Encode(String),

    /// The blocking storage task panicked or was cancelled
    #[error("message log task failed: {0}")]
    TaskJoin(String),
}
