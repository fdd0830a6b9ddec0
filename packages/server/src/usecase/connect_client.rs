//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド（レジストリへの登録）
//! - ConnectClientUseCase::load_history() メソッド（履歴の読み出し）
//!
//! ### なぜこのテストが必要か
//! - 新規接続がブロードキャスト対象として登録されることを保証
//! - 履歴が挿入順で再生されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴ありでの接続
//! - エッジケース：永続化無効、履歴が空、デコードできない履歴エントリ
//! - 異常系：履歴の読み出し失敗

use std::sync::Arc;

use hiroba_shared::time::get_jst_timestamp;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    domain::{ChatMessage, ConnectionId, ConnectionIdFactory, HISTORY_KEY, MessageLog, Timestamp},
    infrastructure::{
        dto::websocket::ChatMessageDto,
        registry::{ClientHandle, ConnectionRegistry},
    },
};

use super::error::ReplayError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// 接続レジストリ
    registry: Arc<ConnectionRegistry>,
    /// 履歴の読み出し元（None なら再生しない）
    message_log: Option<Arc<dyn MessageLog>>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        message_log: Option<Arc<dyn MessageLog>>,
    ) -> Self {
        Self {
            registry,
            message_log,
        }
    }

    /// クライアント接続を実行
    ///
    /// 新しい ConnectionId を発行し、`sender` を持つハンドルをレジストリに登録する。
    /// 登録した時点からブロードキャスト対象になる。
    pub async fn execute(&self, sender: UnboundedSender<String>) -> ConnectionId {
        let id = ConnectionIdFactory::generate();
        let handle = ClientHandle::new(id, sender, Timestamp::new(get_jst_timestamp()));
        self.registry.add(handle).await;
        id
    }

    /// 再生する履歴を読み出す
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ChatMessage>)` - 挿入順の履歴（永続化無効・履歴なしなら空）
    /// * `Err(ReplayError)` - 履歴の読み出し失敗
    pub async fn load_history(&self) -> Result<Vec<ChatMessage>, ReplayError> {
        let Some(log) = &self.message_log else {
            return Ok(Vec::new());
        };

        if !log.exists(HISTORY_KEY).await? {
            return Ok(Vec::new());
        }

        let entries = log.read_all(HISTORY_KEY).await?;
        let history = entries
            .iter()
            .filter_map(|entry| {
                match ChatMessageDto::from_json(entry).map(ChatMessage::try_from) {
                    Ok(Ok(message)) => Some(message),
                    Ok(Err(e)) => {
                        tracing::warn!("Skipping history entry {}: {}", entry, e);
                        None
                    }
                    Err(e) => {
                        tracing::warn!("Skipping undecodable history entry {}: {}", entry, e);
                        None
                    }
                }
            })
            .collect();

        Ok(history)
    }
}
