//! Usuario repository: trait and SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use super::entities::usuario::{self, ActiveModel, Entity as UsuarioEntity};
use common::{AppError, AppResult};
use domain::{NovoUsuario, Usuario};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Usuario repository session.
///
/// Reads go straight to storage. Writes are staged with `add`, `update` and
/// `remove` and only become visible after `save_changes` commits them as one
/// atomic unit. Email matching is exact; callers normalize first.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    /// All usuarios, active or not, ordered by id
    async fn get_all(&self) -> AppResult<Vec<Usuario>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Usuario>>;

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Usuario>>;

    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    /// Stage an insertion
    fn add(&mut self, usuario: NovoUsuario);

    /// Stage a full update of every column
    fn update(&mut self, usuario: Usuario);

    /// Stage a soft delete. This is an update of the already-deactivated
    /// entity; rows are never physically removed.
    fn remove(&mut self, usuario: Usuario);

    /// Commit staged changes atomically.
    ///
    /// Returns the rows as persisted, in staging order. The staging buffer is
    /// cleared whether the commit succeeds or not.
    async fn save_changes(&mut self) -> AppResult<Vec<Usuario>>;
}

/// A change waiting for `save_changes`.
#[derive(Debug, Clone)]
pub(crate) enum PendingChange {
    Insert(NovoUsuario),
    Update(Usuario),
}

/// SeaORM-backed repository session
pub struct UsuarioStore {
    db: DatabaseConnection,
    pending: Vec<PendingChange>,
}

impl UsuarioStore {
    /// Create new repository session
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            pending: Vec::new(),
        }
    }

    async fn apply(
        txn: &sea_orm::DatabaseTransaction,
        changes: Vec<PendingChange>,
    ) -> Result<Vec<Usuario>, DbErr> {
        let mut saved = Vec::with_capacity(changes.len());
        for change in changes {
            let model = match change {
                PendingChange::Insert(novo) => ActiveModel::from(novo).insert(txn).await?,
                PendingChange::Update(usuario) => ActiveModel::from(usuario).update(txn).await?,
            };
            saved.push(Usuario::from(model));
        }
        Ok(saved)
    }
}

/// Translate commit failures: unique violations and missing rows get their
/// own variants, everything else stays a database error.
fn map_commit_err(err: DbErr) -> AppError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return AppError::unique_violation(detail);
    }
    match err {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => AppError::NotFound,
        other => AppError::Database(other),
    }
}

#[async_trait]
impl UsuarioRepository for UsuarioStore {
    async fn get_all(&self) -> AppResult<Vec<Usuario>> {
        let models = UsuarioEntity::find()
            .order_by_asc(usuario::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Usuario::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Usuario>> {
        let result = UsuarioEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Usuario::from))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Usuario>> {
        let result = UsuarioEntity::find()
            .filter(usuario::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Usuario::from))
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = UsuarioEntity::find()
            .filter(usuario::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    fn add(&mut self, usuario: NovoUsuario) {
        self.pending.push(PendingChange::Insert(usuario));
    }

    fn update(&mut self, usuario: Usuario) {
        self.pending.push(PendingChange::Update(usuario));
    }

    fn remove(&mut self, usuario: Usuario) {
        tracing::debug!(usuario_id = usuario.id, "Staging soft delete");
        self.pending.push(PendingChange::Update(usuario));
    }

    async fn save_changes(&mut self) -> AppResult<Vec<Usuario>> {
        let changes = std::mem::take(&mut self.pending);
        if changes.is_empty() {
            return Ok(Vec::new());
        }

        let txn = self.db.begin().await.map_err(AppError::from)?;

        match Self::apply(&txn, changes).await {
            Ok(saved) => {
                txn.commit().await.map_err(map_commit_err)?;
                Ok(saved)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(map_commit_err(e))
            }
        }
    }
}
