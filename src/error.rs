//! Relay error types with HTTP status code mapping.
//!
//! [`RelayError`] covers everything that can go wrong before a command
//! reaches the dispatcher. Delivery failures are not errors and never show
//! up here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid command: 5000 bytes exceeds limit of 4096"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Request validation failures. Each maps to `400 Bad Request` with a code
/// in the 1000–1999 range.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Request body could not be decoded into the expected shape.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The command string exceeds the configured limit.
    #[error("invalid command: {len} bytes exceeds limit of {max}")]
    CommandTooLong {
        /// Length of the submitted command in bytes.
        len: usize,
        /// Configured maximum length in bytes.
        max: usize,
    },
}

impl RelayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::CommandTooLong { .. } => 1002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::CommandTooLong { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "request rejected");
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
