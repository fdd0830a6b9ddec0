//! UseCase: クライアント切断処理

use std::sync::Arc;

use crate::{domain::ConnectionId, infrastructure::registry::ConnectionRegistry};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// 接続レジストリ
    registry: Arc<ConnectionRegistry>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// クライアント切断を実行
    ///
    /// ハンドルをレジストリから外し、送信チャンネルを閉じる。
    /// ディスパッチャ側が先に外していた場合は何もしない。
    ///
    /// # Returns
    ///
    /// * `true` - この呼び出しで削除した
    /// * `false` - 既に削除されていた
    pub async fn execute(&self, id: &ConnectionId) -> bool {
        self.registry.remove(id).await.is_some()
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_clients(&self) -> usize {
        self.registry.len().await
    }
}
