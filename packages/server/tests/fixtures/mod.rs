//! Test fixtures: an in-process server on an ephemeral port plus WebSocket helpers.

#![allow(dead_code)]

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{domain::MessageLog, ui};
use tokio::{net::TcpStream, sync::oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(3);

pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a server without history.
    pub async fn start() -> Self {
        Self::start_with_log(None).await
    }

    /// Start a server with the given history backend.
    pub async fn start_with_log(message_log: Option<Arc<dyn MessageLog>>) -> Self {
        Self::start_with_public_dir(message_log, PathBuf::from("./public")).await
    }

    pub async fn start_with_public_dir(
        message_log: Option<Arc<dyn MessageLog>>,
        public_dir: PathBuf,
    ) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let (state, dispatcher) = ui::build_state(message_log);
        tokio::spawn(dispatcher.run());
        let app = ui::router(state, &public_dir);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/websocket", self.addr)
    }

    /// Connect a WebSocket client and wait until the server has registered it.
    pub async fn connect(&self) -> WsClient {
        let before = self.client_count().await;
        let (ws, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        self.wait_for_clients(before + 1).await;
        ws
    }

    /// Connect a WebSocket client without waiting for registration.
    pub async fn connect_unregistered(&self) -> WsClient {
        let (ws, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        ws
    }

    pub async fn client_count(&self) -> usize {
        let body: serde_json::Value = reqwest::get(format!("{}/api/clients", self.base_url()))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        body.as_array().map(|a| a.len()).unwrap_or(0)
    }

    /// Poll the client list until it has exactly `expected` entries.
    pub async fn wait_for_clients(&self, expected: usize) {
        for _ in 0..100 {
            if self.client_count().await == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Timed out waiting for {expected} registered client(s)");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn send_chat(ws: &mut WsClient, username: &str, text: &str) {
    let json = serde_json::json!({ "username": username, "text": text }).to_string();
    ws.send(Message::Text(json.into()))
        .await
        .expect("Failed to send message");
}

/// Receive the next chat frame as JSON, failing after a timeout.
pub async fn recv_chat(ws: &mut WsClient) -> serde_json::Value {
    loop {
        let frame = tokio::time::timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Connection closed")
            .expect("WebSocket error");
        match frame {
            Message::Text(text) => {
                return serde_json::from_str(text.as_str()).expect("Failed to parse JSON");
            }
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Unexpected frame: {other:?}"),
        }
    }
}

/// Assert that no chat frame arrives within `wait`.
pub async fn assert_silent(ws: &mut WsClient, wait: Duration) {
    if let Ok(Some(Ok(Message::Text(text)))) = tokio::time::timeout(wait, ws.next()).await {
        panic!("Expected no message, got {}", text.as_str());
    }
}

/// Wait until the server closes the connection.
pub async fn expect_closed(ws: &mut WsClient) {
    loop {
        match tokio::time::timeout(RECV_TIMEOUT, ws.next()).await {
            Ok(None) | Ok(Some(Err(_))) | Ok(Some(Ok(Message::Close(_)))) => return,
            Ok(Some(Ok(_))) => continue,
            Err(_) => panic!("Timed out waiting for the server to close the connection"),
        }
    }
}
