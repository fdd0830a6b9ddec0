//! Server state shared by all connection flows.

use std::sync::Arc;

use crate::{
    domain::MessageLog, infrastructure::registry::ConnectionRegistry, usecase::BroadcastQueue,
};

/// Shared application state
pub struct AppState {
    /// Currently connected clients (shared with the fan-out dispatcher)
    pub registry: Arc<ConnectionRegistry>,
    /// History backend; `None` when persistence is disabled
    pub message_log: Option<Arc<dyn MessageLog>>,
    /// Producer side of the broadcast queue
    pub queue: BroadcastQueue,
}
