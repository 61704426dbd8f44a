use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bot::Table)
                    .if_not_exists()
                    .col(pk_auto(Bot::Id))
                    .col(integer(Bot::UserId))
                    .col(text(Bot::BotToken))
                    .col(string_null(Bot::ClientId))
                    .col(string_null(Bot::BotName))
                    .col(string_null(Bot::BotAvatar))
                    .col(string(Bot::Status).default("stopped"))
                    .col(text_null(Bot::ErrorMessage))
                    .col(integer(Bot::GuildsCount).default(0))
                    .col(string(Bot::ActivityType).default("Playing"))
                    .col(string(Bot::ActivityName).default("KingBot"))
                    .col(string(Bot::StatusPresence).default("online"))
                    .col(
                        timestamp(Bot::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bot_user_id")
                            .from(Bot::Table, Bot::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bot::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Bot {
    Table,
    Id,
    UserId,
    BotToken,
    ClientId,
    BotName,
    BotAvatar,
    Status,
    ErrorMessage,
    GuildsCount,
    ActivityType,
    ActivityName,
    StatusPresence,
    CreatedAt,
}
