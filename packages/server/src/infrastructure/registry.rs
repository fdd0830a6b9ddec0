//! Connection registry: the set of live client handles.
//!
//! Every connection flow adds its own handle and removes it when its socket
//! read side ends. The fan-out dispatcher iterates the registry and removes
//! handles whose outbound channel is gone. All access goes through one mutex;
//! iteration runs on a snapshot taken under the lock, so callbacks may freely
//! add or remove entries.

use std::{collections::HashMap, fmt};

use thiserror::Error;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{ConnectionId, Timestamp};

/// Outbound side of one connected client.
///
/// Frames pushed with [`ClientHandle::send`] are written to the socket by the
/// connection's writer task. When the last sender clone is dropped, the writer
/// closes the socket.
#[derive(Clone)]
pub struct ClientHandle {
    id: ConnectionId,
    sender: UnboundedSender<String>,
    connected_at: Timestamp,
}

/// The writer task of this handle has stopped; the frame was not delivered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("connection '{0}' is closed")]
pub struct HandleClosed(pub ConnectionId);

impl ClientHandle {
    pub fn new(id: ConnectionId, sender: UnboundedSender<String>, connected_at: Timestamp) -> Self {
        Self {
            id,
            sender,
            connected_at,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    /// Queue one encoded frame for this client.
    pub fn send(&self, frame: String) -> Result<(), HandleClosed> {
        self.sender.send(frame).map_err(|_| HandleClosed(self.id))
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("id", &self.id)
            .field("connected_at", &self.connected_at)
            .field("sender_closed", &self.sender.is_closed())
            .finish()
    }
}

/// Registry of currently connected clients
#[derive(Default)]
pub struct ConnectionRegistry {
    clients: Mutex<HashMap<ConnectionId, ClientHandle>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle. Identifiers are unique per connection, so an
    /// existing entry with the same id is replaced.
    pub async fn add(&self, handle: ClientHandle) {
        let mut clients = self.clients.lock().await;
        clients.insert(handle.id(), handle);
    }

    /// Remove a handle if present.
    ///
    /// Returns the removed handle; `None` when another flow already removed it.
    /// Dropping the returned handle releases the registry's sender.
    pub async fn remove(&self, id: &ConnectionId) -> Option<ClientHandle> {
        let mut clients = self.clients.lock().await;
        clients.remove(id)
    }

    /// Apply `f` to every handle registered at the time of the call.
    ///
    /// The lock is released before `f` runs. No ordering is guaranteed.
    pub async fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&ClientHandle),
    {
        for handle in self.snapshot().await.iter() {
            f(handle);
        }
    }

    /// Clone the current set of handles.
    pub async fn snapshot(&self) -> Vec<ClientHandle> {
        let clients = self.clients.lock().await;
        clients.values().cloned().collect()
    }

    pub async fn contains(&self, id: &ConnectionId) -> bool {
        let clients = self.clients.lock().await;
        clients.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        let clients = self.clients.lock().await;
        clients.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
