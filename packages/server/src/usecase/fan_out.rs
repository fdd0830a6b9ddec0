//! UseCase: ブロードキャストキューと配信ディスパッチャ
//!
//! 全接続の受信フローが `BroadcastQueue` に送り込み、単一の
//! `FanOutDispatcher` がキューから順に取り出してレジストリ内の全ハンドルへ配る。
//! キューの取り出し順がそのまま全クライアント共通の配信順になる。

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::ChatMessage,
    infrastructure::{dto::websocket::ChatMessageDto, registry::ConnectionRegistry},
};

use super::error::SendMessageError;

/// Receiving end of the broadcast queue, owned by the dispatcher.
pub type BroadcastReceiver = mpsc::UnboundedReceiver<ChatMessage>;

/// Multi-producer side of the broadcast queue.
///
/// Unbounded: `send` never waits.
#[derive(Clone)]
pub struct BroadcastQueue {
    tx: mpsc::UnboundedSender<ChatMessage>,
}

impl BroadcastQueue {
    pub fn new() -> (Self, BroadcastReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Append a message to the tail of the queue.
    pub fn send(&self, message: ChatMessage) -> Result<(), SendMessageError> {
        self.tx
            .send(message)
            .map_err(|_| SendMessageError::QueueClosed)
    }
}

/// Outcome of fanning out one message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handles the frame was queued to
    pub delivered: usize,
    /// Handles that failed and were removed from the registry
    pub dropped: usize,
}

/// 配信ディスパッチャ（プロセス内に 1 つ）
pub struct FanOutDispatcher {
    rx: BroadcastReceiver,
    registry: Arc<ConnectionRegistry>,
}

impl FanOutDispatcher {
    pub fn new(rx: BroadcastReceiver, registry: Arc<ConnectionRegistry>) -> Self {
        Self { rx, registry }
    }

    /// Dispatch messages until every `BroadcastQueue` clone is dropped.
    pub async fn run(mut self) {
        tracing::info!("Fan-out dispatcher started");
        while let Some(message) = self.rx.recv().await {
            self.dispatch(&message).await;
        }
        tracing::info!("Broadcast queue closed, fan-out dispatcher stopped");
    }

    /// Deliver one message to every registered handle, including its sender.
    ///
    /// A handle whose outbound channel is closed is removed; delivery to the
    /// remaining handles continues.
    pub async fn dispatch(&self, message: &ChatMessage) -> DispatchReport {
        let frame = match ChatMessageDto::from(message).to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode message for broadcast: {}", e);
                return DispatchReport::default();
            }
        };

        let mut report = DispatchReport::default();
        let mut failed = Vec::new();
        self.registry
            .for_each(|handle| match handle.send(frame.clone()) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!("Failed to deliver message: {}", e);
                    failed.push(handle.id());
                }
            })
            .await;

        for id in failed {
            // the owning connection flow may have removed it already
            if self.registry.remove(&id).await.is_some() {
                tracing::info!("Removed connection '{}' after failed delivery", id);
            }
            report.dropped += 1;
        }

        tracing::debug!(
            "Broadcast message from '{}' to {} client(s), {} dropped",
            message.username,
            report.delivered,
            report.dropped
        );
        report
    }
}
