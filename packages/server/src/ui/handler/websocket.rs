//! WebSocket connection handler.
//!
//! One flow per client: register, replay history, then read frames until the
//! socket fails or closes. Outbound frames (replay excepted) go through the
//! handle's channel and a writer task, so the fan-out dispatcher never waits
//! on a socket.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::ChatMessageDto,
    ui::state::AppState,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, ReplayError, SendMessageUseCase,
        SendOutcome,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Channel the dispatcher writes into for this client
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let connect_usecase =
        ConnectClientUseCase::new(state.registry.clone(), state.message_log.clone());
    let connection_id = connect_usecase.execute(tx).await;
    tracing::info!("Client '{}' connected and registered", connection_id);

    // Replay history straight to the socket; live broadcasts wait in `rx`
    if let Err(e) = replay_history(&connect_usecase, &mut sender, connection_id).await {
        tracing::warn!("History replay to '{}' aborted: {}", connection_id, e);
        disconnect(&state, connection_id).await;
        let _ = sender.close().await;
        return;
    }

    // Spawn a task to write broadcast frames to this client
    let writer_id = connection_id;
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.into())).await {
                tracing::warn!("Failed to write to client '{}': {}", writer_id, e);
                return;
            }
        }
        // The handle left the registry
        let _ = sender.send(Message::Close(None)).await;
    });

    // Spawn a task to read messages from this client
    let send_usecase = SendMessageUseCase::new(state.message_log.clone(), state.queue.clone());
    let reader_id = connection_id;
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("WebSocket read error from '{}': {}", reader_id, e);
                    break;
                }
            };

            let decoded = match frame {
                Message::Text(text) => ChatMessageDto::from_json(text.as_str()),
                Message::Binary(bytes) => ChatMessageDto::from_json_bytes(&bytes),
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", reader_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => continue,
            };

            let inbound = match decoded {
                Ok(inbound) => inbound,
                Err(e) => {
                    tracing::warn!("Malformed message from '{}': {}", reader_id, e);
                    break;
                }
            };

            match send_usecase.execute(inbound).await {
                Ok(SendOutcome::Queued(message)) => {
                    tracing::debug!(
                        "Queued message from '{}' ({}): {}",
                        reader_id,
                        message.username,
                        message.text
                    );
                }
                Ok(SendOutcome::Discarded) => {
                    tracing::debug!("Discarded empty message from '{}'", reader_id);
                }
                Err(e) => {
                    // Persistence and queue failures end this connection only
                    tracing::error!("Closing '{}': {}", reader_id, e);
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    disconnect(&state, connection_id).await;
}

/// Write the stored history to a freshly registered client.
async fn replay_history(
    connect_usecase: &ConnectClientUseCase,
    sender: &mut SplitSink<WebSocket, Message>,
    connection_id: ConnectionId,
) -> Result<(), ReplayError> {
    let history = connect_usecase.load_history().await?;
    if history.is_empty() {
        return Ok(());
    }

    for message in &history {
        let frame = ChatMessageDto::from(message).to_json()?;
        sender.send(Message::Text(frame.into())).await?;
    }
    tracing::info!(
        "Replayed {} history message(s) to '{}'",
        history.len(),
        connection_id
    );
    Ok(())
}

async fn disconnect(state: &AppState, connection_id: ConnectionId) {
    let disconnect_usecase = DisconnectClientUseCase::new(state.registry.clone());
    if disconnect_usecase.execute(&connection_id).await {
        tracing::info!(
            "Client '{}' disconnected and removed from registry ({} remaining)",
            connection_id,
            disconnect_usecase.count_remaining_clients().await
        );
    } else {
        tracing::info!("Client '{}' disconnected (already removed)", connection_id);
    }
}
