//! Usuario database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set, Unchanged};

use domain::{NovoUsuario, Usuario};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    #[sea_orm(unique)]
    pub email: String,
    pub senha_hash: String,
    pub data_nascimento: Date,
    pub telefone: Option<String>,
    pub ativo: bool,
    pub data_criacao: DateTimeUtc,
    pub data_atualizacao: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Usuario {
    fn from(model: Model) -> Self {
        Usuario {
            id: model.id,
            nome: model.nome,
            email: model.email,
            senha_hash: model.senha_hash,
            data_nascimento: model.data_nascimento,
            telefone: model.telefone,
            ativo: model.ativo,
            data_criacao: model.data_criacao,
            data_atualizacao: model.data_atualizacao,
        }
    }
}

/// Insert: the id is left to the database.
impl From<NovoUsuario> for ActiveModel {
    fn from(novo: NovoUsuario) -> Self {
        ActiveModel {
            id: NotSet,
            nome: Set(novo.nome),
            email: Set(novo.email),
            senha_hash: Set(novo.senha_hash),
            data_nascimento: Set(novo.data_nascimento),
            telefone: Set(novo.telefone),
            ativo: Set(novo.ativo),
            data_criacao: Set(novo.data_criacao),
            data_atualizacao: Set(None),
        }
    }
}

/// Full update keyed by id. `data_criacao` is never rewritten.
impl From<Usuario> for ActiveModel {
    fn from(usuario: Usuario) -> Self {
        ActiveModel {
            id: Unchanged(usuario.id),
            nome: Set(usuario.nome),
            email: Set(usuario.email),
            senha_hash: Set(usuario.senha_hash),
            data_nascimento: Set(usuario.data_nascimento),
            telefone: Set(usuario.telefone),
            ativo: Set(usuario.ativo),
            data_criacao: Unchanged(usuario.data_criacao),
            data_atualizacao: Set(usuario.data_atualizacao),
        }
    }
}
