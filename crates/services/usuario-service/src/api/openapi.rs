//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use domain::{CreateUsuario, UpdateUsuario, UsuarioResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::usuario_handler::list_usuarios,
        crate::api::handlers::usuario_handler::get_usuario,
        crate::api::handlers::usuario_handler::create_usuario,
        crate::api::handlers::usuario_handler::update_usuario,
        crate::api::handlers::usuario_handler::delete_usuario,
        crate::api::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            CreateUsuario,
            UpdateUsuario,
            UsuarioResponse,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
        )
    ),
    tags(
        (name = "Usuarios", description = "Usuario management endpoints"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
