//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::{ConnectionSettings, run_connection};
use crate::app_state::AppState;

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// A failed handshake is logged and never touches the registry.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let registry = Arc::clone(&state.registry);
    let settings = ConnectionSettings::from(state.config.as_ref());

    ws.on_failed_upgrade(|err| tracing::warn!(error = %err, "ws handshake failed"))
        .on_upgrade(move |socket| run_connection(socket, registry, settings))
}
