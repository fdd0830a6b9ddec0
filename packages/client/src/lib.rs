//! Terminal client for the Hiroba chat relay.

pub mod error;
pub mod session;

pub use error::ClientError;
pub use session::{format_message, run_client};
