//! Server assembly and startup.

use std::{path::Path, sync::Arc};

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::{HistoryBackend, ServerConfig},
    domain::MessageLog,
    error::ServerError,
    infrastructure::{
        registry::ConnectionRegistry,
        repository::{InMemoryMessageLog, SqliteMessageLog},
    },
    usecase::{BroadcastQueue, FanOutDispatcher},
};

use super::{
    handler::{health_check, list_clients, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Open the configured history backend.
pub fn open_message_log(
    backend: &HistoryBackend,
) -> Result<Option<Arc<dyn MessageLog>>, ServerError> {
    let log: Option<Arc<dyn MessageLog>> = match backend {
        HistoryBackend::Disabled => None,
        HistoryBackend::InMemory => Some(Arc::new(InMemoryMessageLog::new())),
        HistoryBackend::Sqlite(path) => Some(Arc::new(SqliteMessageLog::open(path)?)),
    };
    Ok(log)
}

/// Create the shared state and the dispatcher that drains its queue.
///
/// The caller must spawn [`FanOutDispatcher::run`]; until then broadcasts
/// accumulate in the queue.
pub fn build_state(message_log: Option<Arc<dyn MessageLog>>) -> (Arc<AppState>, FanOutDispatcher) {
    let registry = Arc::new(ConnectionRegistry::new());
    let (queue, rx) = BroadcastQueue::new();
    let dispatcher = FanOutDispatcher::new(rx, registry.clone());
    let state = Arc::new(AppState {
        registry,
        message_log,
        queue,
    });
    (state, dispatcher)
}

/// Build the router: WebSocket endpoint, HTTP API and static assets.
pub fn router(state: Arc<AppState>, public_dir: &Path) -> Router {
    Router::new()
        .route("/websocket", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/clients", get(list_clients))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let backend = config.history_backend();
    let message_log = open_message_log(&backend)?;
    match &backend {
        HistoryBackend::Disabled => tracing::info!("History disabled"),
        HistoryBackend::InMemory => tracing::info!("History kept in memory"),
        HistoryBackend::Sqlite(path) => tracing::info!("History stored in {}", path.display()),
    }

    let (state, dispatcher) = build_state(message_log);
    tokio::spawn(dispatcher.run());

    let app = router(state, &config.public_dir);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Start {} server", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}
