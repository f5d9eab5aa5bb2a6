//! Handle to one live streaming client.
//!
//! A [`Connection`] does not own the socket. It owns the sending half of a
//! bounded outbound queue; the WebSocket task that owns the socket drains
//! the queue and writes each frame. Dropping every handle closes the queue,
//! which ends that task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendTimeoutError;

use super::ConnectionId;

/// Why a write to a connection was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The socket task has exited and no longer drains the queue.
    #[error("connection closed")]
    Closed,

    /// The queue stayed full for the whole write timeout.
    #[error("write timed out after {0:?}")]
    TimedOut(Duration),
}

/// A registered streaming client.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    outbound: mpsc::Sender<String>,
    connected_at: DateTime<Utc>,
    closed: AtomicBool,
}

impl Connection {
    /// Creates a connection together with the receiving end of its
    /// outbound queue. `capacity` is clamped to at least one frame.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (outbound, rx) = mpsc::channel(capacity.max(1));
        let connection = Self {
            id: ConnectionId::new(),
            outbound,
            connected_at: Utc::now(),
            closed: AtomicBool::new(false),
        };
        (connection, rx)
    }

    /// Returns the connection identity.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Returns when the handshake completed.
    #[must_use]
    pub const fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Returns `true` once the connection has been removed from a registry.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub(crate) fn mark_closed(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Queues one text frame for the socket writer.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Closed`] if the socket task is gone and
    /// [`ConnectionError::TimedOut`] if the queue stayed full for `timeout`.
    pub async fn send(&self, frame: String, timeout: Duration) -> Result<(), ConnectionError> {
        self.outbound
            .send_timeout(frame, timeout)
            .await
            .map_err(|err| match err {
                SendTimeoutError::Closed(_) => ConnectionError::Closed,
                SendTimeoutError::Timeout(_) => ConnectionError::TimedOut(timeout),
            })
    }
}
