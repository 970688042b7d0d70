//! Repository layer for data access.

pub mod entities;
mod usuario_repository;

pub(crate) use usuario_repository::PendingChange;
pub use usuario_repository::{UsuarioRepository, UsuarioStore};

#[cfg(any(test, feature = "test-utils"))]
pub use usuario_repository::MockUsuarioRepository;
