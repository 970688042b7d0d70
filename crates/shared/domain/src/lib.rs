//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the `Usuario` entity, its input payloads and read representation, the field
//! rules applied before business logic, and password hashing.

pub mod age;
pub mod constants;
pub mod error;
pub mod password;
pub mod usuario;
pub mod validation;

pub use age::{ensure_adult, idade_em, today_utc};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use usuario::{
    normalize_email, normalize_telefone, CreateUsuario, NovoUsuario, UpdateUsuario, Usuario,
    UsuarioResponse,
};
