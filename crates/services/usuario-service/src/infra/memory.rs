//! In-process storage for development and tests.
//!
//! Behaves like the database for everything the service relies on: ids are
//! assigned at commit, a commit is all-or-nothing and the email column is
//! unique.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use domain::{NovoUsuario, Usuario};

use super::UnitOfWork;
use crate::repository::{PendingChange, UsuarioRepository};

#[derive(Debug, Clone, Default)]
struct Table {
    rows: BTreeMap<i32, Usuario>,
    last_id: i32,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn insert(&mut self, novo: NovoUsuario) -> AppResult<Usuario> {
        if self.email_taken(&novo.email, None) {
            return Err(AppError::unique_violation("usuarios.email"));
        }
        self.last_id += 1;
        let usuario = novo.with_id(self.last_id);
        self.rows.insert(usuario.id, usuario.clone());
        Ok(usuario)
    }

    fn update(&mut self, usuario: Usuario) -> AppResult<Usuario> {
        if !self.rows.contains_key(&usuario.id) {
            return Err(AppError::NotFound);
        }
        if self.email_taken(&usuario.email, Some(usuario.id)) {
            return Err(AppError::unique_violation("usuarios.email"));
        }
        self.rows.insert(usuario.id, usuario.clone());
        Ok(usuario)
    }
}

/// In-memory implementation of UnitOfWork
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    fn usuarios(&self) -> Box<dyn UsuarioRepository> {
        Box::new(MemorySession {
            table: self.table.clone(),
            pending: Vec::new(),
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

struct MemorySession {
    table: Arc<RwLock<Table>>,
    pending: Vec<PendingChange>,
}

#[async_trait]
impl UsuarioRepository for MemorySession {
    async fn get_all(&self) -> AppResult<Vec<Usuario>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Usuario>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Usuario>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.email_taken(email, None))
    }

    fn add(&mut self, usuario: NovoUsuario) {
        self.pending.push(PendingChange::Insert(usuario));
    }

    fn update(&mut self, usuario: Usuario) {
        self.pending.push(PendingChange::Update(usuario));
    }

    fn remove(&mut self, usuario: Usuario) {
        self.pending.push(PendingChange::Update(usuario));
    }

    async fn save_changes(&mut self) -> AppResult<Vec<Usuario>> {
        let changes = std::mem::take(&mut self.pending);
        if changes.is_empty() {
            return Ok(Vec::new());
        }

        let mut table = self.table.write().await;

        // Apply to a copy so a failing change leaves the table untouched
        let mut staged = table.clone();
        let mut saved = Vec::with_capacity(changes.len());
        for change in changes {
            let usuario = match change {
                PendingChange::Insert(novo) => staged.insert(novo)?,
                PendingChange::Update(usuario) => staged.update(usuario)?,
            };
            saved.push(usuario);
        }

        *table = staged;
        tracing::debug!(count = saved.len(), "Committed in-memory changes");
        Ok(saved)
    }
}
