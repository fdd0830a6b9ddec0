//! InMemory MessageLog 実装
//!
//! プロセス内の HashMap をリストストアとして使用します。
//! プロセス終了とともに履歴は失われるため、開発用・テスト用です。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessageLog, MessageLogError};

/// インメモリ MessageLog 実装
#[derive(Default)]
pub struct InMemoryMessageLog {
    /// key ごとのシリアライズ済みメッセージ列（挿入順）
    lists: Mutex<HashMap<String, Vec<String>>>,
}

impl InMemoryMessageLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn exists(&self, key: &str) -> Result<bool, MessageLogError> {
        let lists = self.lists.lock().await;
        Ok(lists.get(key).is_some_and(|items| !items.is_empty()))
    }

    async fn append(&self, key: &str, item: String) -> Result<(), MessageLogError> {
        let mut lists = self.lists.lock().await;
        lists.entry(key.to_string()).or_default().push(item);
        Ok(())
    }

    async fn read_all(&self, key: &str) -> Result<Vec<String>, MessageLogError> {
        let lists = self.lists.lock().await;
        Ok(lists.get(key).cloned().unwrap_or_default())
    }
}
