use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_bot_table::Bot;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guild::Table)
                    .if_not_exists()
                    .col(string(Guild::Id))
                    .col(integer(Guild::BotId))
                    .col(string(Guild::Name).default(""))
                    .col(string_null(Guild::LogChannelId))
                    .col(string_null(Guild::TranscriptChannelId))
                    .col(string_null(Guild::TicketCategoryId))
                    .col(text(Guild::SupportRoleIds).default("[]"))
                    .col(text(Guild::AdminRoleIds).default("[]"))
                    .col(integer(Guild::TicketCounter).default(0))
                    .col(string(Guild::Language).default("en"))
                    .col(string(Guild::Timezone).default("UTC"))
                    .col(integer(Guild::AutoCloseHours).default(0))
                    .col(integer(Guild::AutoCloseWarningHours).default(0))
                    .col(
                        timestamp(Guild::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .primary_key(Index::create().col(Guild::Id).col(Guild::BotId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guild_bot_id")
                            .from(Guild::Table, Guild::BotId)
                            .to(Bot::Table, Bot::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guild::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Guild {
    Table,
    Id,
    BotId,
    Name,
    LogChannelId,
    TranscriptChannelId,
    TicketCategoryId,
    SupportRoleIds,
    AdminRoleIds,
    TicketCounter,
    Language,
    Timezone,
    AutoCloseHours,
    AutoCloseWarningHours,
    VouchChannelId,
    VouchData,
    CreatedAt,
}
