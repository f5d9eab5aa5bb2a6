//! System endpoints: service identification and health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{HealthResponse, ServiceInfoResponse};
use crate::app_state::AppState;

/// Name reported by `GET /`.
pub const SERVICE_NAME: &str = "Command Relay";

/// `GET /` — Static service identification.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Service identification",
    responses(
        (status = 200, description = "Service is running", body = ServiceInfoResponse),
    )
)]
pub async fn root_handler() -> impl IntoResponse {
    Json(ServiceInfoResponse {
        message: SERVICE_NAME.to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /health` — Service health and live connection count.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health, the number of connected WebSocket clients, and the current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            connections: state.registry.len().await,
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::config::RelayConfig;
    use crate::domain::Connection;

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let Ok(request) = Request::get(uri).body(Body::empty()) else {
            panic!("request builder failed");
        };
        let Ok(response) = routes().with_state(state).oneshot(request).await;
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("failed to read body");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("body is not JSON");
        };
        (status, value)
    }

    #[tokio::test]
    async fn root_identifies_service() {
        let (status, body) = get_json(AppState::new(RelayConfig::default()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("message").and_then(|v| v.as_str()), Some(SERVICE_NAME));
        assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("running"));
    }

    #[tokio::test]
    async fn health_reports_live_connections() {
        let state = AppState::new(RelayConfig::default());
        let (status, body) = get_json(state.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("healthy"));
        assert_eq!(body.get("connections").and_then(|v| v.as_u64()), Some(0));

        let (a, _rx_a) = Connection::channel(1);
        let (b, _rx_b) = Connection::channel(1);
        state.registry.add(Arc::new(a)).await;
        state.registry.add(Arc::new(b)).await;

        let (_, body) = get_json(state, "/health").await;
        assert_eq!(body.get("connections").and_then(|v| v.as_u64()), Some(2));
        let Some(ts) = body.get("timestamp").and_then(|v| v.as_str()) else {
            panic!("timestamp missing");
        };
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
