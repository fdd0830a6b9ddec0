//! Domain layer for the chat relay.
//!
//! This module contains the message model and the persistence contract,
//! independent of the WebSocket transport and of any storage backend.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::ChatMessage;
pub use error::{MessageLogError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use repository::{HISTORY_KEY, MessageLog};
pub use value_object::{ConnectionId, MessageText, Timestamp};
