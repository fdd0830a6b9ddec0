//! Persistence contract for the chat history.
//!
//! The domain only needs an append-only ordered list of serialized messages
//! per key. Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::error::MessageLogError;

/// Key of the single list that holds the chat history.
pub const HISTORY_KEY: &str = "messages";

/// Append-only ordered log of serialized messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// Whether any entry has ever been appended under `key`.
    async fn exists(&self, key: &str) -> Result<bool, MessageLogError>;

    /// Append one serialized item to the end of the list under `key`.
    async fn append(&self, key: &str, item: String) -> Result<(), MessageLogError>;

    /// Read the whole list under `key` in insertion order.
    ///
    /// A missing key reads as an empty list.
    async fn read_all(&self, key: &str) -> Result<Vec<String>, MessageLogError>;
}
