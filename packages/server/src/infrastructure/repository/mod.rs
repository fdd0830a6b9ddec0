//! MessageLog implementations.
//!
//! The domain layer defines the `MessageLog` trait; the use cases depend on the
//! trait only, and `ui::runner` picks one of these backends at startup.

pub mod inmemory;
pub mod sqlite;

pub use inmemory::InMemoryMessageLog;
pub use sqlite::SqliteMessageLog;
