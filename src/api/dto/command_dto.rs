//! Command submission DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /send-command`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendCommandRequest {
    /// Command to broadcast to every connected client.
    pub command: String,
}

/// Response body for `POST /send-command`.
///
/// `status` is always `"success"` once the command passes validation; it
/// confirms the broadcast was attempted, not that any client received it.
#[derive(Debug, Serialize, ToSchema)]
pub struct SendCommandResponse {
    /// Always `"success"`.
    pub status: String,
    /// The command as broadcast.
    pub command: String,
    /// Timestamp carried by the broadcast message.
    pub timestamp: DateTime<Utc>,
}
