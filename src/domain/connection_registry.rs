//! Concurrent set of live connections.
//!
//! [`ConnectionRegistry`] keeps every registered [`Connection`] in a
//! `HashMap` keyed by [`ConnectionId`] behind a single
//! [`tokio::sync::RwLock`]. Mutations take the write half; snapshots copy
//! the membership out under the read half so callers iterate without
//! holding the lock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use super::{Connection, ConnectionId};

/// Authoritative set of currently live connections.
///
/// # Invariants
///
/// - A connection appears at most once (keyed by id).
/// - A removed connection is marked closed and is never re-admitted.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, Arc<Connection>>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection.
    ///
    /// Returns `true` if the connection was inserted, `false` if it was
    /// already present or has already been removed once.
    pub async fn add(&self, connection: Arc<Connection>) -> bool {
        let id = connection.id();
        let mut map = self.connections.write().await;
        if connection.is_closed() || map.contains_key(&id) {
            return false;
        }
        map.insert(id, connection);
        tracing::info!(connection_id = %id, total = map.len(), "client connected");
        true
    }

    /// Forgets a connection. Absent ids are a no-op.
    ///
    /// Returns `true` if the connection was present.
    pub async fn remove(&self, id: ConnectionId) -> bool {
        let mut map = self.connections.write().await;
        let Some(connection) = map.remove(&id) else {
            return false;
        };
        connection.mark_closed();
        let connected_secs = (Utc::now() - connection.connected_at()).num_seconds();
        tracing::info!(
            connection_id = %id,
            total = map.len(),
            connected_secs,
            "client disconnected"
        );
        true
    }

    /// Returns a point-in-time copy of the membership.
    pub async fn snapshot(&self) -> Vec<Arc<Connection>> {
        self.connections.read().await.values().cloned().collect()
    }

    /// Returns `true` if a connection with the given id is registered.
    pub async fn contains(&self, id: ConnectionId) -> bool {
        self.connections.read().await.contains_key(&id)
    }

    /// Returns the number of live connections.
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Returns `true` if no connection is registered.
    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}
