//! SQLite-backed MessageLog.
//!
//! One table holds every list; `id` is the insertion order. rusqlite is
//! blocking, so each call runs on the blocking thread pool.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{Connection, params};

use crate::domain::{MessageLog, MessageLogError};

pub struct SqliteMessageLog {
    conn: Arc<Mutex<Connection>>,
}

fn backend_error(e: rusqlite::Error) -> MessageLogError {
    MessageLogError::Backend(e.to_string())
}

impl SqliteMessageLog {
    /// Open (or create) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MessageLogError> {
        let conn = Connection::open(path).map_err(backend_error)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self, MessageLogError> {
        let conn = Connection::open_in_memory().map_err(backend_error)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, MessageLogError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS message_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key TEXT NOT NULL,
                item TEXT NOT NULL
            )",
            [],
        )
        .map_err(backend_error)?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_message_log_key ON message_log(key, id)",
            [],
        )
        .map_err(backend_error)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, MessageLogError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| MessageLogError::Backend(format!("connection lock poisoned: {e}")))?;
            f(&conn).map_err(backend_error)
        })
        .await
        .map_err(|e| MessageLogError::TaskJoin(e.to_string()))?
    }
}

#[async_trait]
impl MessageLog for SqliteMessageLog {
    async fn exists(&self, key: &str) -> Result<bool, MessageLogError> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM message_log WHERE key = ?1)",
                params![key],
                |row| row.get::<_, bool>(0),
            )
        })
        .await
    }

    async fn append(&self, key: &str, item: String) -> Result<(), MessageLogError> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO message_log (key, item) VALUES (?1, ?2)",
                params![key, item],
            )
            .map(|_| ())
        })
        .await
    }

    async fn read_all(&self, key: &str) -> Result<Vec<String>, MessageLogError> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare("SELECT item FROM message_log WHERE key = ?1 ORDER BY id")?;
            let items = stmt
                .query_map(params![key], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(items)
        })
        .await
    }
}
