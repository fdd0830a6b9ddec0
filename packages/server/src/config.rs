//! Server configuration, read once at startup from flags or environment.

use std::path::PathBuf;

use clap::Parser;

/// Value of `--history` selecting the in-process log.
pub const IN_MEMORY_HISTORY: &str = "memory";

/// Where chat history is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryBackend {
    /// No persistence and no replay
    Disabled,
    /// Kept in process memory, lost on restart
    InMemory,
    /// SQLite database file
    Sqlite(PathBuf),
}

#[derive(Debug, Clone, Parser)]
#[command(name = "hiroba-server", version, about = "WebSocket chat relay server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HIROBA_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "HIROBA_PORT", default_value_t = 4040)]
    pub port: u16,

    /// Directory of web client assets served at `/`
    #[arg(long, env = "HIROBA_PUBLIC_DIR", default_value = "./public")]
    pub public_dir: PathBuf,

    /// History backend: `memory`, or a SQLite file path. Unset disables history.
    #[arg(long, env = "HIROBA_HISTORY")]
    pub history: Option<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn history_backend(&self) -> HistoryBackend {
        match self.history.as_deref().map(str::trim) {
            None | Some("") => HistoryBackend::Disabled,
            Some(IN_MEMORY_HISTORY) => HistoryBackend::InMemory,
            Some(path) => HistoryBackend::Sqlite(PathBuf::from(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: 引数なしではデフォルト値が使われる
        // when (操作):
        let config = ServerConfig::try_parse_from(["hiroba-server"]).unwrap();

        // then (期待する結果):
        assert_eq!(config.port, 4040);
        assert_eq!(config.public_dir, PathBuf::from("./public"));
        assert_eq!(config.bind_addr(), "0.0.0.0:4040");
    }

    #[test]
    fn test_history_backend_selection() {
        // テスト項目: --history の値で履歴バックエンドが選ばれる
        // when (操作):
        let memory =
            ServerConfig::try_parse_from(["hiroba-server", "--history", "memory"]).unwrap();
        let sqlite =
            ServerConfig::try_parse_from(["hiroba-server", "--history", "data/chat.db"]).unwrap();
        let blank = ServerConfig::try_parse_from(["hiroba-server", "--history", " "]).unwrap();

        // then (期待する結果):
        assert_eq!(memory.history_backend(), HistoryBackend::InMemory);
        assert_eq!(
            sqlite.history_backend(),
            HistoryBackend::Sqlite(PathBuf::from("data/chat.db"))
        );
        assert_eq!(blank.history_backend(), HistoryBackend::Disabled);
    }

    #[test]
    fn test_port_flag() {
        // テスト項目: --port でポートを指定できる
        // when (操作):
        let config =
            ServerConfig::try_parse_from(["hiroba-server", "--port", "9000", "--host", "127.0.0.1"])
                .unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }
}
