//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 受信したメッセージの破棄判定・永続化・ブロードキャストキュー投入
//!
//! ### なぜこのテストが必要か
//! - 本文が空のメッセージは永続化も配信もされないことを保証
//! - 永続化の失敗が接続単位のエラーとして返り、配信されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：永続化ありでの送信、永続化なしでの送信
//! - 異常系：永続化の失敗、キューの終了
//! - エッジケース：本文が空のメッセージ

use std::sync::Arc;

use crate::{
    domain::{ChatMessage, HISTORY_KEY, MessageLog, MessageLogError},
    infrastructure::dto::websocket::ChatMessageDto,
};

use super::{error::SendMessageError, fan_out::BroadcastQueue};

/// What happened to an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Persisted (when enabled) and queued for broadcast
    Queued(ChatMessage),
    /// Empty text, silently dropped
    Discarded,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// 履歴の永続化先（None なら永続化しない）
    message_log: Option<Arc<dyn MessageLog>>,
    /// ブロードキャストキュー
    queue: BroadcastQueue,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(message_log: Option<Arc<dyn MessageLog>>, queue: BroadcastQueue) -> Self {
        Self { message_log, queue }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `inbound` - クライアントから受信してデコードしたメッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(SendOutcome::Queued)` - 永続化とキュー投入に成功
    /// * `Ok(SendOutcome::Discarded)` - 本文が空のため破棄
    /// * `Err(SendMessageError)` - 永続化またはキュー投入に失敗
    pub async fn execute(&self, inbound: ChatMessageDto) -> Result<SendOutcome, SendMessageError> {
        // 1. 本文が空なら破棄
        let message = match ChatMessage::try_from(inbound) {
            Ok(message) => message,
            Err(_) => return Ok(SendOutcome::Discarded),
        };

        // 2. 永続化（有効な場合のみ）
        if let Some(log) = &self.message_log {
            let item = ChatMessageDto::from(&message)
                .to_json()
                .map_err(|e| MessageLogError::Encode(e.to_string()))?;
            log.append(HISTORY_KEY, item).await?;
        }

        // 3. ブロードキャストキューへ投入
        self.queue.send(message.clone())?;

        Ok(SendOutcome::Queued(message))
    }
}
