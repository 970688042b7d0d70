//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::UnitOfWork;
use crate::service::UsuarioService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub usuarios: Arc<dyn UsuarioService>,
    /// Used by the health check
    pub storage: Arc<dyn UnitOfWork>,
}

impl AppState {
    /// Create new app state.
    pub fn new(usuarios: Arc<dyn UsuarioService>, storage: Arc<dyn UnitOfWork>) -> Self {
        Self { usuarios, storage }
    }
}
