//! WebSocket chat relay server implementation.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_state, open_message_log, router, run};
