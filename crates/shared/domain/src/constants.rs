//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Usuario
// =============================================================================

/// Minimum age (in whole years) required to hold an account
pub const MIN_AGE_YEARS: i32 = 18;

/// Minimum name length, counted on the trimmed value
pub const MIN_NOME_LENGTH: usize = 3;

/// Maximum name length (matches the `nome` column)
pub const MAX_NOME_LENGTH: usize = 100;

/// Maximum email length (matches the `email` column)
pub const MAX_EMAIL_LENGTH: usize = 150;

/// Minimum password length requirement
pub const MIN_SENHA_LENGTH: usize = 6;

/// Phone format: `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD`, space optional.
///
/// Anchored at both ends: a number embedded in other text such as
/// `Tel: (11) 98765-4321` is rejected.
pub const TELEFONE_PATTERN: &str = r"^\(\d{2}\)\s?\d{4,5}-\d{4}$";

// =============================================================================
// Messages
// =============================================================================

pub const MSG_NOME_OBRIGATORIO: &str = "Nome é obrigatório.";
pub const MSG_NOME_TAMANHO: &str = "Nome deve ter entre 3 e 100 caracteres.";
pub const MSG_EMAIL_OBRIGATORIO: &str = "Email é obrigatório.";
pub const MSG_EMAIL_INVALIDO: &str = "Email inválido.";
pub const MSG_EMAIL_TAMANHO: &str = "Email deve ter no máximo 150 caracteres.";
pub const MSG_SENHA_OBRIGATORIA: &str = "Senha é obrigatória.";
pub const MSG_SENHA_TAMANHO: &str = "Senha deve ter ao menos 6 caracteres.";
pub const MSG_MENOR_DE_IDADE: &str = "Usuário deve ter pelo menos 18 anos.";
pub const MSG_TELEFONE_FORMATO: &str = "Telefone deve estar no formato (XX) XXXXX-XXXX.";
pub const MSG_EMAIL_DUPLICADO: &str = "Email já cadastrado.";
pub const MSG_NAO_ENCONTRADO: &str = "Usuário não encontrado.";
