//! Broadcast dispatcher: fans a command out to every live connection.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;

use crate::domain::{CommandMessage, ConnectionRegistry};

/// Outcome of one [`BroadcastDispatcher::broadcast`] call.
///
/// Only used for logging and for echoing the message back to the submitter;
/// individual delivery failures are never reported as errors.
#[derive(Debug, Clone)]
pub struct BroadcastReport {
    /// The message that was sent (shared timestamp included).
    pub message: CommandMessage,
    /// Connections that accepted the frame.
    pub delivered: usize,
    /// Connections that rejected the frame and were removed.
    pub pruned: usize,
}

impl BroadcastReport {
    /// Returns the number of connections the broadcast was attempted on.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.delivered + self.pruned
    }
}

/// Best-effort fan-out over a [`ConnectionRegistry`].
///
/// Every call takes one snapshot of the registry, attempts a write on each
/// member, and afterwards removes the members whose write failed. Failed
/// connections are never retried; the client has to reconnect.
#[derive(Debug, Clone)]
pub struct BroadcastDispatcher {
    registry: Arc<ConnectionRegistry>,
    write_timeout: Duration,
}

impl BroadcastDispatcher {
    /// Creates a dispatcher over `registry`. Each write may wait at most
    /// `write_timeout` for room in a connection's outbound queue.
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>, write_timeout: Duration) -> Self {
        Self {
            registry,
            write_timeout,
        }
    }

    /// Returns the registry this dispatcher reads from.
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Sends `command` to every registered connection.
    ///
    /// Never fails: an empty registry, an encoding failure and per-connection
    /// write failures are all logged and reflected in the report only.
    pub async fn broadcast(&self, command: &str) -> BroadcastReport {
        let message = CommandMessage::now(command);
        let mut report = BroadcastReport {
            message,
            delivered: 0,
            pruned: 0,
        };

        let targets = self.registry.snapshot().await;
        if targets.is_empty() {
            tracing::info!(command, "no clients connected to receive command");
            return report;
        }

        let frame = match report.message.to_frame() {
            Ok(frame) => frame,
            Err(err) => {
                tracing::error!(error = %err, command, "failed to encode command message");
                return report;
            }
        };

        tracing::info!(command, clients = targets.len(), "broadcasting command");

        let timeout = self.write_timeout;
        let writes = targets.iter().map(|conn| {
            let frame = frame.clone();
            async move { (conn.id(), conn.send(frame, timeout).await) }
        });

        let mut failed = Vec::new();
        for (id, outcome) in join_all(writes).await {
            match outcome {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    tracing::warn!(
                        connection_id = %id,
                        error = %err,
                        "dropping client after failed write"
                    );
                    failed.push(id);
                }
            }
        }

        for id in failed {
            self.registry.remove(id).await;
            report.pruned += 1;
        }

        report
    }
}
