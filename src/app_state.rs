//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::domain::ConnectionRegistry;
use crate::service::BroadcastDispatcher;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Live WebSocket connections.
    pub registry: Arc<ConnectionRegistry>,
    /// Fan-out over `registry`.
    pub dispatcher: BroadcastDispatcher,
    /// Runtime settings.
    pub config: Arc<RelayConfig>,
}

impl AppState {
    /// Builds a fresh registry and a dispatcher over it.
    #[must_use]
    pub fn new(config: RelayConfig) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = BroadcastDispatcher::new(Arc::clone(&registry), config.write_timeout);
        Self {
            registry,
            dispatcher,
            config: Arc::new(config),
        }
    }
}
