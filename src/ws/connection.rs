//! WebSocket connection lifecycle.
//!
//! Each upgraded socket is split in two halves that run concurrently:
//! the outbound half forwards frames queued by the dispatcher, the inbound
//! half reads and discards client frames only to notice when the peer goes
//! away. Whichever half finishes first ends the connection and it is
//! removed from the registry.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;

use crate::config::RelayConfig;
use crate::domain::{Connection, ConnectionRegistry};

/// Per-connection transport settings.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSettings {
    /// Depth of the outbound queue.
    pub queue_capacity: usize,
    /// Upper bound on flushing one frame to the socket.
    pub write_timeout: Duration,
}

impl From<&RelayConfig> for ConnectionSettings {
    fn from(config: &RelayConfig) -> Self {
        Self {
            queue_capacity: config.outbound_queue_capacity,
            write_timeout: config.write_timeout,
        }
    }
}

/// Why a connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The client sent a close frame or the stream ended.
    ClientClosed,
    /// Reading from the socket failed.
    ReadFailed,
    /// Writing to the socket failed.
    WriteFailed,
    /// Writing to the socket took longer than the write timeout.
    WriteTimedOut,
    /// The registry dropped the connection after a failed broadcast.
    Pruned,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ClientClosed => "client closed",
            Self::ReadFailed => "read failed",
            Self::WriteFailed => "write failed",
            Self::WriteTimedOut => "write timed out",
            Self::Pruned => "pruned",
        };
        f.write_str(s)
    }
}

/// Registers the socket, runs it until either side gives up, then
/// deregisters it.
pub async fn run_connection(
    socket: WebSocket,
    registry: Arc<ConnectionRegistry>,
    settings: ConnectionSettings,
) {
    let (ws_tx, ws_rx) = socket.split();
    let (connection, outbound_rx) = Connection::channel(settings.queue_capacity);
    let id = connection.id();

    // The registry holds the only sender, so pruning closes the queue.
    registry.add(Arc::new(connection)).await;

    let reason = tokio::select! {
        reason = forward_outbound(ws_tx, outbound_rx, settings.write_timeout) => reason,
        reason = drain_inbound(ws_rx) => reason,
    };

    registry.remove(id).await;
    tracing::debug!(connection_id = %id, %reason, "ws connection closed");
}

/// Writes queued frames to the socket in order.
///
/// Returns once the queue is closed (the connection was pruned) or a write
/// fails or exceeds `write_timeout`.
pub async fn forward_outbound<S>(
    mut sink: S,
    mut outbound: mpsc::Receiver<String>,
    write_timeout: Duration,
) -> CloseReason
where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
{
    while let Some(frame) = outbound.recv().await {
        match tokio::time::timeout(write_timeout, sink.send(Message::text(frame))).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "ws write failed");
                return CloseReason::WriteFailed;
            }
            Err(_) => {
                tracing::warn!(timeout = ?write_timeout, "ws write timed out");
                return CloseReason::WriteTimedOut;
            }
        }
    }

    if let Err(err) = sink.close().await {
        tracing::debug!(error = %err, "ws close failed");
    }
    CloseReason::Pruned
}

/// Reads and discards client frames until the peer closes or errors.
pub async fn drain_inbound<S, E>(mut stream: S) -> CloseReason
where
    S: Stream<Item = Result<Message, E>> + Unpin,
    E: fmt::Display,
{
    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Close(_)) => return CloseReason::ClientClosed,
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(error = %err, "ws read failed");
                return CloseReason::ReadFailed;
            }
        }
    }
    CloseReason::ClientClosed
}
