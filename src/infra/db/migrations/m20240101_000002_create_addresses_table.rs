//! Migration: one address per employee.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Addresses::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Addresses::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Addresses::Cep).string_len(9).not_null())
                    .col(ColumnDef::new(Addresses::Endereco).string_len(255).not_null())
                    .col(ColumnDef::new(Addresses::Numero).string_len(10).not_null())
                    .col(ColumnDef::new(Addresses::Complemento).string_len(255).null())
                    .col(ColumnDef::new(Addresses::Bairro).string_len(255).not_null())
                    .col(ColumnDef::new(Addresses::Cidade).string_len(255).not_null())
                    .col(ColumnDef::new(Addresses::Estado).string_len(2).not_null())
                    .col(
                        ColumnDef::new(Addresses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Addresses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_user_id")
                            .from(Addresses::Table, Addresses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Addresses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Addresses {
    Table,
    Id,
    UserId,
    Cep,
    Endereco,
    Numero,
    Complemento,
    Bairro,
    Cidade,
    Estado,
    CreatedAt,
    UpdatedAt,
}
