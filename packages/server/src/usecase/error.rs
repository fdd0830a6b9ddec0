//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::MessageLogError;

/// メッセージ送信処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// メッセージログへの追記に失敗
    #[error("failed to persist message: {0}")]
    Persist(#[from] MessageLogError),

    /// ブロードキャストキューの受信側が終了している
    #[error("broadcast queue is closed")]
    QueueClosed,
}

/// 履歴再生処理のエラー
#[derive(Debug, Error)]
pub enum ReplayError {
    /// 履歴の読み出しに失敗
    #[error("failed to load history: {0}")]
    History(#[from] MessageLogError),

    /// 履歴メッセージのエンコードに失敗
    #[error("failed to encode history message: {0}")]
    Encode(#[from] serde_json::Error),

    /// 履歴フレームのソケット書き込みに失敗
    #[error("failed to write history frame: {0}")]
    Transport(#[from] axum::Error),
}
