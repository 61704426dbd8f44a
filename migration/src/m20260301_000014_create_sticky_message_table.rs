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
                    .table(StickyMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(StickyMessage::Id))
                    .col(integer(StickyMessage::BotId))
                    .col(string(StickyMessage::GuildId))
                    .col(string(StickyMessage::ChannelId))
                    .col(text(StickyMessage::Content))
                    .col(string_null(StickyMessage::LastMessageId))
                    .col(
                        timestamp(StickyMessage::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sticky_message_bot_id")
                            .from(StickyMessage::Table, StickyMessage::BotId)
                            .to(Bot::Table, Bot::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("idx_sticky_message_channel_unique")
                    .table(StickyMessage::Table)
                    .col(StickyMessage::BotId)
                    .col(StickyMessage::ChannelId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StickyMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StickyMessage {
    Table,
    Id,
    BotId,
    GuildId,
    ChannelId,
    Content,
    LastMessageId,
    CreatedAt,
}
