//! Core domain model for the chat relay.

use super::{error::ValueObjectError, value_object::MessageText};

/// Represents one chat message.
///
/// Immutable once built. The username is whatever the sender supplied and may
/// be empty; the text is guaranteed non-empty by [`MessageText`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Sender-supplied display name
    pub username: String,
    /// Message text
    pub text: MessageText,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(username: String, text: MessageText) -> Self {
        Self { username, text }
    }

    /// Build a message from raw fields.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::MessageTextEmpty` if `text` is empty
    pub fn try_from_parts(username: String, text: String) -> Result<Self, ValueObjectError> {
        Ok(Self::new(username, MessageText::new(text)?))
    }
}
