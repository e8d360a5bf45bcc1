//! Migration: append-only punch ledger.

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
                    .table(PunchRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PunchRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PunchRecords::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(PunchRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_punch_records_user_id")
                            .from(PunchRecords::Table, PunchRecords::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Today's punches and report ranges both filter on (user_id, created_at)
        manager
            .create_index(
                Index::create()
                    .name("idx_punch_records_user_id_created_at")
                    .table(PunchRecords::Table)
                    .col(PunchRecords::UserId)
                    .col(PunchRecords::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PunchRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PunchRecords {
    Table,
    Id,
    UserId,
    CreatedAt,
}
