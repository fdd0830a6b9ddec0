//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use hiroba_shared::time::timestamp_to_jst_rfc3339;

use crate::{infrastructure::dto::http::ClientSummaryDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint listing registered connections, oldest first
pub async fn list_clients(State(state): State<Arc<AppState>>) -> Json<Vec<ClientSummaryDto>> {
    let mut handles = state.registry.snapshot().await;
    handles.sort_by_key(|h| (h.connected_at(), h.id()));

    let clients = handles
        .iter()
        .map(|h| ClientSummaryDto {
            connection_id: h.id().to_string(),
            connected_at: timestamp_to_jst_rfc3339(h.connected_at().value()),
        })
        .collect();

    Json(clients)
}
