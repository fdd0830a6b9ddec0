//! WebSocket chat relay library.
//!
//! Clients connect to `/websocket`, publish `{"username", "text"}` messages and
//! receive every message published by any connected client, in one global
//! order. With a history backend configured, new clients are first replayed
//! the stored history.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
