//! Command submission handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{SendCommandRequest, SendCommandResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, RelayError};

/// `POST /send-command` — Broadcast a command to every connected client.
///
/// # Errors
///
/// Returns [`RelayError`] if the body is not `{"command": "<string>"}`, or
/// the command is longer than the configured limit. Delivery
/// failures never produce an error.
#[utoipa::path(
    post,
    path = "/send-command",
    tag = "Commands",
    summary = "Broadcast a command",
    description = "Sends the command to every connected WebSocket client. Success means the broadcast was attempted; there is no delivery confirmation.",
    request_body = SendCommandRequest,
    responses(
        (status = 200, description = "Command broadcast attempted", body = SendCommandResponse),
        (status = 400, description = "Malformed or invalid command", body = ErrorResponse),
    )
)]
pub async fn send_command(
    State(state): State<AppState>,
    payload: Result<Json<SendCommandRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RelayError> {
    let Json(req) =
        payload.map_err(|rejection| RelayError::InvalidRequest(rejection.body_text()))?;
    validate_command(&req.command, state.config.max_command_len)?;

    let report = state.dispatcher.broadcast(&req.command).await;
    tracing::debug!(
        command = %report.message.command,
        delivered = report.delivered,
        pruned = report.pruned,
        "command accepted"
    );

    Ok(Json(SendCommandResponse {
        status: "success".to_string(),
        command: report.message.command,
        timestamp: report.message.timestamp,
    }))
}

/// Rejects commands longer than `max_len` bytes. Any other string,
/// including an empty one, is broadcast as-is.
fn validate_command(command: &str, max_len: usize) -> Result<(), RelayError> {
    if command.len() > max_len {
        return Err(RelayError::CommandTooLong {
            len: command.len(),
            max: max_len,
        });
    }
    Ok(())
}

/// Command routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/send-command", post(send_command))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::config::RelayConfig;
    use crate::domain::Connection;

    fn app(state: AppState) -> Router {
        routes().with_state(state)
    }

    fn post_json(body: &str) -> Request<Body> {
        let Ok(request) = Request::post("/send-command")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("request builder failed");
        };
        request
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("failed to read body");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("body is not JSON");
        };
        value
    }

    #[test]
    fn validation_limits() {
        assert!(validate_command("move_forward", 16).is_ok());
        assert!(validate_command("", 16).is_ok());
        assert!(validate_command("   ", 16).is_ok());
        assert!(matches!(
            validate_command("0123456789abcdefX", 16),
            Err(RelayError::CommandTooLong { len: 17, max: 16 })
        ));
    }

    #[tokio::test]
    async fn succeeds_without_clients() {
        let state = AppState::new(RelayConfig::default());
        let Ok(response) = app(state.clone())
            .oneshot(post_json(r#"{"command":"move_forward"}"#))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("success"));
        assert_eq!(
            body.get("command").and_then(|v| v.as_str()),
            Some("move_forward")
        );
        assert!(body.get("timestamp").and_then(|v| v.as_str()).is_some());
        assert!(state.registry.is_empty().await);
    }

    #[tokio::test]
    async fn broadcasts_to_registered_client_with_same_timestamp() {
        let state = AppState::new(RelayConfig::default());
        let (conn, mut rx) = Connection::channel(4);
        state.registry.add(Arc::new(conn)).await;

        let Ok(response) = app(state)
            .oneshot(post_json(r#"{"command":"wave"}"#))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;

        let Ok(frame) = rx.try_recv() else {
            panic!("client did not receive the command");
        };
        let Ok(wire) = serde_json::from_str::<serde_json::Value>(&frame) else {
            panic!("frame is not JSON");
        };
        assert_eq!(wire.get("command"), body.get("command"));
        assert_eq!(wire.get("timestamp"), body.get("timestamp"));
    }

    #[tokio::test]
    async fn missing_field_is_rejected() {
        let state = AppState::new(RelayConfig::default());
        let Ok(response) = app(state).oneshot(post_json(r#"{"cmd":"x"}"#)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body.pointer("/error/code").and_then(serde_json::Value::as_u64),
            Some(1001)
        );
    }

    #[tokio::test]
    async fn non_string_command_is_rejected() {
        let state = AppState::new(RelayConfig::default());
        let Ok(response) = app(state).oneshot(post_json(r#"{"command":42}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_and_whitespace_commands_are_broadcast() {
        let state = AppState::new(RelayConfig::default());
        let (conn, mut rx) = Connection::channel(4);
        state.registry.add(Arc::new(conn)).await;

        for command in ["", " "] {
            let body = serde_json::json!({ "command": command }).to_string();
            let Ok(response) = app(state.clone()).oneshot(post_json(&body)).await;

            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("success"));
            assert_eq!(body.get("command").and_then(|v| v.as_str()), Some(command));

            let Ok(frame) = rx.try_recv() else {
                panic!("client did not receive {command:?}");
            };
            let Ok(wire) = serde_json::from_str::<serde_json::Value>(&frame) else {
                panic!("frame is not JSON");
            };
            assert_eq!(wire.get("command").and_then(|v| v.as_str()), Some(command));
        }
        assert_eq!(state.registry.len().await, 1);
    }

    #[tokio::test]
    async fn oversized_command_is_rejected() {
        let config = RelayConfig {
            max_command_len: 8,
            ..RelayConfig::default()
        };
        let state = AppState::new(config);
        let Ok(response) = app(state)
            .oneshot(post_json(r#"{"command":"far_too_long"}"#))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body.pointer("/error/code").and_then(serde_json::Value::as_u64),
            Some(1002)
        );
    }
}
