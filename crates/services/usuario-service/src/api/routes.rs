//! Route configuration.

use std::time::Duration;

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health_routes, usuario_routes};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the main router with all routes.
///
/// Requests running longer than `request_timeout` are answered with 408 and
/// their handler future is dropped, which rolls back any open transaction.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/usuarios", usuario_routes())
        // Global middleware
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
