//! Client error definitions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connecting to or talking with the server failed
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// A message could not be encoded
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
