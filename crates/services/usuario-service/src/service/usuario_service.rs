//! Usuario service - business rules for the usuario use cases.
//!
//! Payloads arrive already validated field by field. This layer owns the
//! rules that need storage or the clock: email uniqueness, the minimum age
//! and the soft delete.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{
    ensure_adult, normalize_email, normalize_telefone, today_utc, CreateUsuario, NovoUsuario,
    Password, UpdateUsuario, UsuarioResponse,
};

use crate::infra::UnitOfWork;

/// Usuario service trait for dependency injection.
#[async_trait]
pub trait UsuarioService: Send + Sync {
    /// Every usuario, soft-deleted ones included
    async fn list(&self) -> AppResult<Vec<UsuarioResponse>>;

    async fn get(&self, id: i32) -> AppResult<Option<UsuarioResponse>>;

    async fn create(&self, payload: CreateUsuario) -> AppResult<UsuarioResponse>;

    /// Replace every editable field of an existing usuario
    async fn update(&self, id: i32, payload: UpdateUsuario) -> AppResult<UsuarioResponse>;

    /// Soft delete. `false` when the id is unknown.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn email_exists(&self, email: &str) -> AppResult<bool>;
}

/// Concrete implementation of UsuarioService over a unit of work.
pub struct UsuarioManager {
    uow: Arc<dyn UnitOfWork>,
}

impl UsuarioManager {
    /// Create new usuario service instance
    pub fn new(uow: Arc<dyn UnitOfWork>) -> Self {
        Self { uow }
    }
}

/// A unique violation at commit means another request took the email between
/// our existence check and the commit.
fn duplicate_on_conflict(err: AppError) -> AppError {
    match err {
        AppError::UniqueViolation(constraint) => {
            warn!(%constraint, "Email taken concurrently");
            AppError::DuplicateEmail
        }
        other => other,
    }
}

#[async_trait]
impl UsuarioService for UsuarioManager {
    async fn list(&self) -> AppResult<Vec<UsuarioResponse>> {
        let usuarios = self.uow.usuarios().get_all().await?;
        Ok(usuarios.into_iter().map(UsuarioResponse::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<Option<UsuarioResponse>> {
        let usuario = self.uow.usuarios().get_by_id(id).await?;
        Ok(usuario.map(UsuarioResponse::from))
    }

    async fn create(&self, payload: CreateUsuario) -> AppResult<UsuarioResponse> {
        let mut repo = self.uow.usuarios();
        let email = normalize_email(&payload.email);

        if repo.email_exists(&email).await? {
            warn!(%email, "Create rejected: email already registered");
            return Err(AppError::DuplicateEmail);
        }

        ensure_adult(payload.data_nascimento, today_utc())?;
        let senha = Password::new(&payload.senha)?;

        repo.add(NovoUsuario {
            nome: payload.nome.trim().to_string(),
            email,
            senha_hash: senha.into_string(),
            data_nascimento: payload.data_nascimento,
            telefone: normalize_telefone(payload.telefone),
            ativo: true,
            data_criacao: chrono::Utc::now(),
        });

        let usuario = repo
            .save_changes()
            .await
            .map_err(duplicate_on_conflict)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("Insert committed without returning a row"))?;

        info!(usuario_id = usuario.id, "Usuario created");
        Ok(usuario.into())
    }

    async fn update(&self, id: i32, payload: UpdateUsuario) -> AppResult<UsuarioResponse> {
        let mut repo = self.uow.usuarios();
        let mut usuario = repo.get_by_id(id).await?.ok_or_not_found()?;

        let email = normalize_email(&payload.email);
        if usuario.email.to_lowercase() != email && repo.email_exists(&email).await? {
            warn!(usuario_id = id, %email, "Update rejected: email already registered");
            return Err(AppError::DuplicateEmail);
        }

        ensure_adult(payload.data_nascimento, today_utc())?;

        usuario.apply_update(payload);
        repo.update(usuario);

        let usuario = repo
            .save_changes()
            .await
            .map_err(duplicate_on_conflict)?
            .into_iter()
            .next()
            .ok_or_not_found()?;

        info!(usuario_id = id, "Usuario updated");
        Ok(usuario.into())
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut repo = self.uow.usuarios();
        let Some(mut usuario) = repo.get_by_id(id).await? else {
            return Ok(false);
        };

        usuario.soft_delete();
        repo.remove(usuario);
        repo.save_changes().await?;

        info!(usuario_id = id, "Usuario deactivated");
        Ok(true)
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        self.uow.usuarios().email_exists(&normalize_email(email)).await
    }
}
