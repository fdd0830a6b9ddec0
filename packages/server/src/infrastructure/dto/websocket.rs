//! WebSocket message DTOs for the chat relay.
//!
//! The same JSON shape is used on the wire and in the message log, so a stored
//! entry decodes exactly like a live frame.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, ValueObjectError};

/// Chat message as sent and received by clients: `{"username": .., "text": ..}`
///
/// Missing fields decode as empty strings and unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatMessageDto {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub text: String,
}

impl ChatMessageDto {
    pub fn new(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
        }
    }

    /// Decode a JSON text frame or log entry.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Decode a binary frame carrying UTF-8 JSON.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&ChatMessage> for ChatMessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            username: message.username.clone(),
            text: message.text.as_str().to_string(),
        }
    }
}

impl TryFrom<ChatMessageDto> for ChatMessage {
    type Error = ValueObjectError;

    fn try_from(dto: ChatMessageDto) -> Result<Self, Self::Error> {
        ChatMessage::try_from_parts(dto.username, dto.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_username_and_text_fields() {
        // テスト項目: エンコード結果は username と text のみを持つ JSON になる
        // given (前提条件):
        let dto = ChatMessageDto::new("alice", "hi");

        // when (操作):
        let json = dto.to_json().unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"username":"alice","text":"hi"}"#);
    }

    #[test]
    fn test_encode_then_decode_is_identical() {
        // テスト項目: エンコードしてデコードすると同じ構造に戻る
        // given (前提条件):
        let dto = ChatMessageDto::new("alice", "hi");

        // when (操作):
        let decoded = ChatMessageDto::from_json(&dto.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(decoded, dto);
    }

    #[test]
    fn test_decode_missing_fields_default_to_empty() {
        // テスト項目: 欠けたフィールドは空文字列としてデコードされる
        // when (操作):
        let dto = ChatMessageDto::from_json(r#"{"username":"bob"}"#).unwrap();

        // then (期待する結果):
        assert_eq!(dto, ChatMessageDto::new("bob", ""));
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        // テスト項目: 未知のフィールドは無視される
        // when (操作):
        let dto =
            ChatMessageDto::from_json(r#"{"username":"bob","text":"yo","color":"red"}"#).unwrap();

        // then (期待する結果):
        assert_eq!(dto, ChatMessageDto::new("bob", "yo"));
    }

    #[test]
    fn test_decode_malformed_fails() {
        // テスト項目: 不正な JSON はデコードエラーになる
        // then (期待する結果):
        assert!(ChatMessageDto::from_json("not json").is_err());
        assert!(ChatMessageDto::from_json(r#"{"text": 42}"#).is_err());
        assert!(ChatMessageDto::from_json_bytes(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_dto_to_domain_rejects_empty_text() {
        // テスト項目: 本文が空の DTO はドメインモデルに変換できない
        // when (操作):
        let result = ChatMessage::try_from(ChatMessageDto::new("alice", ""));

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::MessageTextEmpty));
    }

    #[test]
    fn test_domain_to_dto_keeps_fields() {
        // テスト項目: ドメインモデルから DTO への変換でフィールドが保たれる
        // given (前提条件):
        let message = ChatMessage::try_from_parts("alice".to_string(), "hi".to_string()).unwrap();

        // when (操作):
        let dto = ChatMessageDto::from(&message);

        // then (期待する結果):
        assert_eq!(dto, ChatMessageDto::new("alice", "hi"));
    }
}
