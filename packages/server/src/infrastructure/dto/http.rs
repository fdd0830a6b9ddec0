//! HTTP API response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

/// Registered connection entry for the client list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSummaryDto {
    pub connection_id: String,
    pub connected_at: String, // ISO 8601
}
