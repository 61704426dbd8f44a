use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InviteCode::Table)
                    .if_not_exists()
                    .col(pk_auto(InviteCode::Id))
                    .col(string_uniq(InviteCode::Code))
                    .col(integer_null(InviteCode::CreatedBy))
                    .col(integer_null(InviteCode::UsedBy))
                    .col(integer(InviteCode::MaxUses).default(1))
                    .col(integer(InviteCode::UsesCount).default(0))
                    .col(timestamp_null(InviteCode::ExpiresAt))
                    .col(
                        timestamp(InviteCode::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InviteCode::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InviteCode {
    Table,
    Id,
    Code,
    CreatedBy,
    UsedBy,
    MaxUses,
    UsesCount,
    ExpiresAt,
    CreatedAt,
}
