//! Unit of Work pattern implementation.
//!
//! Each service operation asks for a fresh repository session. The session
//! owns its staged changes, so concurrent requests never see each other's
//! pending work, and `save_changes` commits a session inside one database
//! transaction.

use async_trait::async_trait;
use common::{AppError, AppResult};

use super::Database;
use crate::repository::{UsuarioRepository, UsuarioStore};

/// Unit of Work trait for dependency injection.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Open a new usuario repository session
    fn usuarios(&self) -> Box<dyn UsuarioRepository>;

    /// Check that storage is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// SeaORM implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    db: Database,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn usuarios(&self) -> Box<dyn UsuarioRepository> {
        Box::new(UsuarioStore::new(self.db.get_connection()))
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await.map_err(AppError::from)
    }
}
