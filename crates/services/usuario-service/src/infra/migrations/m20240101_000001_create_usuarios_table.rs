//! Migration: create the usuarios table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Nome).string_len(100).not_null())
                    .col(ColumnDef::new(Usuarios::Email).string_len(150).not_null())
                    .col(ColumnDef::new(Usuarios::SenhaHash).string_len(200).not_null())
                    .col(ColumnDef::new(Usuarios::DataNascimento).date().not_null())
                    .col(ColumnDef::new(Usuarios::Telefone).string_len(20).null())
                    .col(
                        ColumnDef::new(Usuarios::Ativo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Usuarios::DataCriacao)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::DataAtualizacao)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Emails are stored normalized, so a plain unique index is enough
        manager
            .create_index(
                Index::create()
                    .name("idx_usuarios_email")
                    .table(Usuarios::Table)
                    .col(Usuarios::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_usuarios_email")
                    .table(Usuarios::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Usuarios {
    Table,
    Id,
    Nome,
    Email,
    SenhaHash,
    DataNascimento,
    Telefone,
    Ativo,
    DataCriacao,
    DataAtualizacao,
}
