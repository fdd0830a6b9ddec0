//! Startup and serving errors.

use std::io;

use thiserror::Error;

use crate::domain::MessageLogError;

/// Errors that stop the server process
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The HTTP server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[source] io::Error),

    /// The history backend could not be opened
    #[error("failed to open message log: {0}")]
    MessageLog(#[from] MessageLogError),
}
