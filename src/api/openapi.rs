//! OpenAPI document for the REST surface.

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// Path at which the OpenAPI JSON document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Generated OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "command-relay",
        description = "Submit commands over HTTP and fan them out to WebSocket clients at `/ws`."
    ),
    paths(
        crate::api::handlers::command::send_command,
        crate::api::handlers::system::root_handler,
        crate::api::handlers::system::health_handler,
    ),
    components(schemas(crate::domain::CommandMessage)),
    tags(
        (name = "Commands", description = "Command submission"),
        (name = "System", description = "Identification and health"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document and Swagger UI at `/swagger-ui`.
#[cfg(feature = "swagger-ui")]
pub fn routes() -> Router<AppState> {
    Router::new().merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    )
}

/// Serves the OpenAPI document.
#[cfg(not(feature = "swagger-ui"))]
pub fn routes() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}
