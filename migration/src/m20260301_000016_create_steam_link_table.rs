use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SteamLink::Table)
                    .if_not_exists()
                    .col(string(SteamLink::UserId).primary_key())
                    .col(string(SteamLink::SteamId))
                    .col(string_null(SteamLink::SteamName))
                    .col(
                        timestamp(SteamLink::LinkedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SteamLink::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SteamLink {
    Table,
    UserId,
    SteamId,
    SteamName,
    LinkedAt,
}
