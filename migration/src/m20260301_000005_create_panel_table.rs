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
                    .table(Panel::Table)
                    .if_not_exists()
                    .col(pk_auto(Panel::Id))
                    .col(integer(Panel::BotId))
                    .col(string(Panel::GuildId))
                    .col(string(Panel::ChannelId))
                    .col(string_null(Panel::MessageId))
                    .col(string(Panel::Name))
                    .col(text_null(Panel::MessageContent))
                    .col(string_null(Panel::EmbedTitle))
                    .col(string_null(Panel::EmbedTitleUrl))
                    .col(text_null(Panel::EmbedDescription))
                    .col(string(Panel::EmbedColor).default("#5865F2"))
                    .col(string_null(Panel::EmbedImage))
                    .col(string_null(Panel::EmbedThumbnail))
                    .col(string_null(Panel::EmbedFooter))
                    .col(string_null(Panel::EmbedFooterIcon))
                    .col(string_null(Panel::EmbedAuthorName))
                    .col(string_null(Panel::EmbedAuthorIcon))
                    .col(string_null(Panel::EmbedAuthorUrl))
                    .col(
                        timestamp(Panel::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_panel_bot_id")
                            .from(Panel::Table, Panel::BotId)
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
            .drop_table(Table::drop().table(Panel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Panel {
    Table,
    Id,
    BotId,
    GuildId,
    ChannelId,
    MessageId,
    Name,
    MessageContent,
    EmbedTitle,
    EmbedTitleUrl,
    EmbedDescription,
    EmbedColor,
    EmbedImage,
    EmbedThumbnail,
    EmbedFooter,
    EmbedFooterIcon,
    EmbedAuthorName,
    EmbedAuthorIcon,
    EmbedAuthorUrl,
    CreatedAt,
}
