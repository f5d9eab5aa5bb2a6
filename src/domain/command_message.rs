//! Wire format of a broadcast command.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Text frame pushed to every connected client.
///
/// Serialized as `{"command": "...", "timestamp": "<RFC 3339>"}` in that
/// field order. Built once per broadcast so every recipient sees the same
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommandMessage {
    /// The command exactly as submitted.
    pub command: String,
    /// When the broadcast was issued (UTC).
    pub timestamp: DateTime<Utc>,
}

impl CommandMessage {
    /// Creates a message stamped with the current wall-clock time.
    #[must_use]
    pub fn now(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timestamp: Utc::now(),
        }
    }

    /// Encodes the message as a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if encoding fails.
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
