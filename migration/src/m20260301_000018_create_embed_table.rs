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
                    .table(Embed::Table)
                    .if_not_exists()
                    .col(pk_auto(Embed::Id))
                    .col(integer(Embed::BotId))
                    .col(string(Embed::GuildId))
                    .col(string(Embed::Name))
                    .col(string_null(Embed::ChannelId))
                    .col(text_null(Embed::Content))
                    .col(string_null(Embed::Title))
                    .col(text_null(Embed::Description))
                    .col(string(Embed::Color).default("#000000"))
                    .col(string_null(Embed::ImageUrl))
                    .col(string_null(Embed::ThumbnailUrl))
                    .col(string_null(Embed::FooterText))
                    .col(string_null(Embed::FooterIconUrl))
                    .col(string_null(Embed::AuthorName))
                    .col(string_null(Embed::AuthorIconUrl))
                    .col(string_null(Embed::AuthorUrl))
                    .col(string_null(Embed::TitleUrl))
                    .col(boolean(Embed::Timestamp).default(false))
                    .col(
                        timestamp(Embed::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_embed_bot_id")
                            .from(Embed::Table, Embed::BotId)
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
                    .name("idx_embed_bot_guild")
                    .table(Embed::Table)
                    .col(Embed::BotId)
                    .col(Embed::GuildId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Embed::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Embed {
    Table,
    Id,
    BotId,
    GuildId,
    Name,
    ChannelId,
    Content,
    Title,
    Description,
    Color,
    ImageUrl,
    ThumbnailUrl,
    FooterText,
    FooterIconUrl,
    AuthorName,
    AuthorIconUrl,
    AuthorUrl,
    TitleUrl,
    Timestamp,
    CreatedAt,
}
