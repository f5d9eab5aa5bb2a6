//! Health and service identification DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Response body for `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    /// Number of live WebSocket connections.
    pub connections: usize,
    /// Current server time (RFC 3339).
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// Response body for `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfoResponse {
    /// Service name.
    pub message: String,
    /// Always `"running"`.
    pub status: String,
    /// Crate version.
    pub version: String,
}
