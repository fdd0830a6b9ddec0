//! Interactive chat session.
//!
//! Lines typed at the prompt are sent as `{"username", "text"}` frames; every
//! frame received from the server (history first, then live traffic) is
//! printed as it arrives.

use futures_util::{SinkExt, StreamExt};
use hiroba_server::infrastructure::dto::websocket::ChatMessageDto;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::error::ClientError;

/// Render one received message for the terminal.
pub fn format_message(message: &ChatMessageDto) -> String {
    let name = if message.username.is_empty() {
        "anonymous"
    } else {
        message.username.as_str()
    };
    format!("[{}] {}", name, message.text)
}

/// Connect to `url` and chat as `username` until Ctrl+D / Ctrl+C or the
/// server closes the connection.
pub async fn run_client(url: &str, username: String) -> Result<(), ClientError> {
    let (ws, _) = connect_async(url).await?;
    tracing::info!("Connected to {}", url);
    let (mut write, mut read) = ws.split();

    // rustyline blocks, so it gets its own thread
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::error!("Failed to start line editor: {}", e);
                return;
            }
        };
        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    break;
                }
            }
        }
    });

    loop {
        tokio::select! {
            line = line_rx.recv() => match line {
                Some(text) if text.is_empty() => continue,
                Some(text) => {
                    let json = ChatMessageDto::new(username.clone(), text).to_json()?;
                    write.send(Message::Text(json.into())).await?;
                }
                None => {
                    let _ = write.send(Message::Close(None)).await;
                    break;
                }
            },
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => match ChatMessageDto::from_json(text.as_str()) {
                    Ok(message) => println!("{}", format_message(&message)),
                    Err(e) => tracing::warn!("Ignoring malformed frame: {}", e),
                },
                Some(Ok(Message::Close(_))) | None => {
                    println!("Connection closed by server");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        // テスト項目: ユーザー名と本文が表示用に整形される
        // when (操作):
        let line = format_message(&ChatMessageDto::new("alice", "hi"));

        // then (期待する結果):
        assert_eq!(line, "[alice] hi");
    }

    #[test]
    fn test_format_message_without_username() {
        // テスト項目: ユーザー名が空なら anonymous と表示される
        // when (操作):
        let line = format_message(&ChatMessageDto::new("", "hi"));

        // then (期待する結果):
        assert_eq!(line, "[anonymous] hi");
    }
}
