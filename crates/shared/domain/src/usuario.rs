//! Usuario domain entity and related types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Usuario domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usuario {
    /// Assigned by storage on creation, immutable afterwards
    pub id: i32,
    pub nome: String,
    /// Trimmed and lowercased
    pub email: String,
    /// Argon2 PHC hash, never the plaintext
    pub senha_hash: String,
    pub data_nascimento: NaiveDate,
    pub telefone: Option<String>,
    /// `false` once soft-deleted
    pub ativo: bool,
    pub data_criacao: DateTime<Utc>,
    pub data_atualizacao: Option<DateTime<Utc>>,
}

impl Usuario {
    /// Soft delete: mark inactive and stamp the update time.
    pub fn soft_delete(&mut self) {
        self.ativo = false;
        self.data_atualizacao = Some(Utc::now());
    }

    /// Replace every editable field from an already validated update payload.
    /// `id`, `senha_hash` and `data_criacao` are left untouched.
    pub fn apply_update(&mut self, payload: UpdateUsuario) {
        self.nome = payload.nome.trim().to_string();
        self.email = normalize_email(&payload.email);
        self.data_nascimento = payload.data_nascimento;
        self.telefone = normalize_telefone(payload.telefone);
        self.ativo = payload.ativo;
        self.data_atualizacao = Some(Utc::now());
    }
}

/// A usuario that has not been persisted yet (no id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovoUsuario {
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
    pub data_nascimento: NaiveDate,
    pub telefone: Option<String>,
    pub ativo: bool,
    pub data_criacao: DateTime<Utc>,
}

impl NovoUsuario {
    /// Attach the storage-assigned id.
    pub fn with_id(self, id: i32) -> Usuario {
        Usuario {
            id,
            nome: self.nome,
            email: self.email,
            senha_hash: self.senha_hash,
            data_nascimento: self.data_nascimento,
            telefone: self.telefone,
            ativo: self.ativo,
            data_criacao: self.data_criacao,
            data_atualizacao: None,
        }
    }
}

/// Trim and lowercase an email for comparison and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim a phone number; blank counts as absent.
pub fn normalize_telefone(telefone: Option<String>) -> Option<String> {
    telefone
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Usuario creation payload
#[derive(Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateUsuario {
    /// Full name, 3 to 100 characters
    #[validate(custom(function = "crate::validation::validate_nome"))]
    #[cfg_attr(feature = "openapi", schema(example = "Ana Silva"))]
    pub nome: String,
    /// Email address, unique (case-insensitive)
    #[validate(custom(function = "crate::validation::validate_email"))]
    #[cfg_attr(feature = "openapi", schema(example = "ana@mail.com"))]
    pub email: String,
    /// Password, at least 6 characters
    #[validate(custom(function = "crate::validation::validate_senha"))]
    #[cfg_attr(feature = "openapi", schema(example = "123456", min_length = 6))]
    pub senha: String,
    /// Birth date; must be at least 18 years ago
    #[validate(custom(function = "crate::validation::validate_maioridade"))]
    #[cfg_attr(feature = "openapi", schema(example = "2000-01-01"))]
    pub data_nascimento: NaiveDate,
    /// Optional phone in the `(XX) XXXXX-XXXX` format
    #[validate(custom(function = "crate::validation::validate_telefone"))]
    #[cfg_attr(feature = "openapi", schema(example = "(11) 98765-4321"))]
    #[serde(default)]
    pub telefone: Option<String>,
}

// Keep the plaintext password out of logs
impl std::fmt::Debug for CreateUsuario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUsuario")
            .field("nome", &self.nome)
            .field("email", &self.email)
            .field("senha", &"[REDACTED]")
            .field("data_nascimento", &self.data_nascimento)
            .field("telefone", &self.telefone)
            .finish()
    }
}

/// Usuario update payload. Replaces every editable field.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsuario {
    #[validate(custom(function = "crate::validation::validate_nome"))]
    #[cfg_attr(feature = "openapi", schema(example = "Ana Souza"))]
    pub nome: String,
    #[validate(custom(function = "crate::validation::validate_email"))]
    #[cfg_attr(feature = "openapi", schema(example = "ana.souza@mail.com"))]
    pub email: String,
    #[validate(custom(function = "crate::validation::validate_maioridade"))]
    #[cfg_attr(feature = "openapi", schema(example = "2000-01-01"))]
    pub data_nascimento: NaiveDate,
    #[validate(custom(function = "crate::validation::validate_telefone"))]
    #[cfg_attr(feature = "openapi", schema(example = "(11) 3456-7890"))]
    #[serde(default)]
    pub telefone: Option<String>,
    /// Active flag; `false` deactivates the account
    pub ativo: bool,
}

/// Usuario read representation (safe to return to client).
///
/// The password hash and the update timestamp are never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UsuarioResponse {
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i32,
    #[cfg_attr(feature = "openapi", schema(example = "Ana Silva"))]
    pub nome: String,
    #[cfg_attr(feature = "openapi", schema(example = "ana@mail.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = "2000-01-01"))]
    pub data_nascimento: NaiveDate,
    pub telefone: Option<String>,
    pub ativo: bool,
    pub data_criacao: DateTime<Utc>,
}

impl From<Usuario> for UsuarioResponse {
    fn from(usuario: Usuario) -> Self {
        Self {
            id: usuario.id,
            nome: usuario.nome,
            email: usuario.email,
            data_nascimento: usuario.data_nascimento,
            telefone: usuario.telefone,
            ativo: usuario.ativo,
            data_criacao: usuario.data_criacao,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario() -> Usuario {
        Usuario {
            id: 7,
            nome: "Ana Silva".to_string(),
            email: "ana@mail.com".to_string(),
            senha_hash: "$argon2id$hash".to_string(),
            data_nascimento: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            telefone: None,
            ativo: true,
            data_criacao: Utc::now(),
            data_atualizacao: None,
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Ana@Mail.COM "), "ana@mail.com");
        assert_eq!(normalize_email("ana@mail.com"), "ana@mail.com");
    }

    #[test]
    fn test_normalize_telefone() {
        assert_eq!(normalize_telefone(None), None);
        assert_eq!(normalize_telefone(Some("   ".to_string())), None);
        assert_eq!(
            normalize_telefone(Some(" (11) 98765-4321 ".to_string())),
            Some("(11) 98765-4321".to_string())
        );
    }

    #[test]
    fn test_soft_delete() {
        let mut u = usuario();
        u.soft_delete();

        assert!(!u.ativo);
        assert!(u.data_atualizacao.is_some());
    }

    #[test]
    fn test_apply_update_keeps_identity() {
        let mut u = usuario();
        let criado = u.data_criacao;
        u.apply_update(UpdateUsuario {
            nome: "  Ana Souza ".to_string(),
            email: " ANA.Souza@Mail.com".to_string(),
            data_nascimento: NaiveDate::from_ymd_opt(1999, 5, 5).unwrap(),
            telefone: Some("(11) 3456-7890".to_string()),
            ativo: false,
        });

        assert_eq!(u.id, 7);
        assert_eq!(u.data_criacao, criado);
        assert_eq!(u.senha_hash, "$argon2id$hash");
        assert_eq!(u.nome, "Ana Souza");
        assert_eq!(u.email, "ana.souza@mail.com");
        assert!(!u.ativo);
        assert!(u.data_atualizacao.is_some());
    }

    #[test]
    fn test_response_hides_secrets() {
        let json = serde_json::to_value(UsuarioResponse::from(usuario())).unwrap();

        assert_eq!(json["dataNascimento"], "2000-01-01");
        assert_eq!(json["email"], "ana@mail.com");
        assert!(json.get("senha").is_none());
        assert!(json.get("senhaHash").is_none());
        assert!(json.get("dataAtualizacao").is_none());
    }

    #[test]
    fn test_create_payload_debug_redacts_senha() {
        let payload: CreateUsuario = serde_json::from_value(serde_json::json!({
            "nome": "Ana Silva",
            "email": "ana@mail.com",
            "senha": "super-secreta",
            "dataNascimento": "2000-01-01"
        }))
        .unwrap();

        assert!(payload.telefone.is_none());
        assert!(!format!("{:?}", payload).contains("super-secreta"));
    }
}
