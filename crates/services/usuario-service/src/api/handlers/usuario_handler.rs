//! Usuario handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};

use common::{AppError, AppResult, OptionExt};
use domain::{CreateUsuario, UpdateUsuario, UsuarioResponse};

use crate::api::extractors::{PathParam, ValidatedJson};
use crate::api::AppState;

/// Create usuario routes
pub fn usuario_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_usuarios).post(create_usuario))
        .route(
            "/:id",
            get(get_usuario).put(update_usuario).delete(delete_usuario),
        )
}

/// List all usuarios, inactive ones included
#[utoipa::path(
    get,
    path = "/usuarios",
    tag = "Usuarios",
    responses(
        (status = 200, description = "All usuarios", body = Vec<UsuarioResponse>)
    )
)]
pub async fn list_usuarios(State(state): State<AppState>) -> AppResult<Json<Vec<UsuarioResponse>>> {
    let usuarios = state.usuarios.list().await?;
    Ok(Json(usuarios))
}

/// Get usuario by ID
#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    tag = "Usuarios",
    params(
        ("id" = i32, Path, description = "Usuario ID")
    ),
    responses(
        (status = 200, description = "Usuario found", body = UsuarioResponse),
        (status = 404, description = "Usuario not found")
    )
)]
pub async fn get_usuario(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<UsuarioResponse>> {
    let usuario = state.usuarios.get(id).await?.ok_or_not_found()?;
    Ok(Json(usuario))
}

/// Create a usuario
#[utoipa::path(
    post,
    path = "/usuarios",
    tag = "Usuarios",
    request_body = CreateUsuario,
    responses(
        (status = 201, description = "Usuario created", body = UsuarioResponse,
            headers(("Location" = String, description = "URL of the new usuario"))),
        (status = 400, description = "Invalid payload or underage"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_usuario(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUsuario>,
) -> AppResult<Response> {
    let usuario = state.usuarios.create(payload).await?;
    let location = format!("/usuarios/{}", usuario.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(usuario),
    )
        .into_response())
}

/// Update a usuario
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    tag = "Usuarios",
    params(
        ("id" = i32, Path, description = "Usuario ID")
    ),
    request_body = UpdateUsuario,
    responses(
        (status = 200, description = "Usuario updated", body = UsuarioResponse),
        (status = 400, description = "Invalid payload or underage"),
        (status = 404, description = "Usuario not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_usuario(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUsuario>,
) -> AppResult<Json<UsuarioResponse>> {
    let usuario = state.usuarios.update(id, payload).await?;
    Ok(Json(usuario))
}

/// Soft delete a usuario
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    tag = "Usuarios",
    params(
        ("id" = i32, Path, description = "Usuario ID")
    ),
    responses(
        (status = 204, description = "Usuario deactivated"),
        (status = 404, description = "Usuario not found")
    )
)]
pub async fn delete_usuario(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<StatusCode> {
    if state.usuarios.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
