//! Router assembly and middleware stack.

use axum::Router;
use axum::http::{Method, StatusCode, header};
use axum::routing::get;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the full application: REST routes, `/ws`, tracing, request
/// timeout, and CORS restricted to the configured origins.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(state.config.allowed_origins.clone()))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::Body;
    use axum::http::{HeaderValue, Request};
    use tower::ServiceExt;

    use super::*;
    use crate::config::RelayConfig;

    fn preflight(origin: &str) -> Request<Body> {
        let Ok(request) = Request::builder()
            .method(Method::OPTIONS)
            .uri("/send-command")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
        else {
            panic!("request builder failed");
        };
        request
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let app = build_app(AppState::new(RelayConfig::default()));
        let Ok(response) = app.oneshot(preflight("http://localhost:3000")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:3000"))
        );
    }

    #[tokio::test]
    async fn cors_ignores_unknown_origin() {
        let app = build_app(AppState::new(RelayConfig::default()));
        let Ok(response) = app.oneshot(preflight("https://evil.example")).await;

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn health_passes_through_middleware() {
        let app = build_app(AppState::new(RelayConfig::default()));
        let Ok(request) = Request::get("/health").body(Body::empty()) else {
            panic!("request builder failed");
        };
        let Ok(response) = app.oneshot(request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ws_route_requires_upgrade() {
        let app = build_app(AppState::new(RelayConfig::default()));
        let Ok(request) = Request::get("/ws").body(Body::empty()) else {
            panic!("request builder failed");
        };
        let Ok(response) = app.oneshot(request).await;
        assert!(response.status().is_client_error());
    }
}
