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
                    .table(WelcomeSettings::Table)
                    .if_not_exists()
                    .col(string(WelcomeSettings::GuildId))
                    .col(integer(WelcomeSettings::BotId))
                    .col(boolean(WelcomeSettings::WelcomeEnabled).default(false))
                    .col(string_null(WelcomeSettings::WelcomeChannelId))
                    .col(text(WelcomeSettings::WelcomeMessage).default("Welcome {USER} to {SERVER}!"))
                    .col(boolean(WelcomeSettings::GoodbyeEnabled).default(false))
                    .col(string_null(WelcomeSettings::GoodbyeChannelId))
                    .col(text(WelcomeSettings::GoodbyeMessage).default("{USER} has left the server."))
                    .col(boolean(WelcomeSettings::AutoroleEnabled).default(false))
                    .col(string_null(WelcomeSettings::AutoroleId))
                    .col(boolean(WelcomeSettings::CardEnabled).default(false))
                    .col(string_null(WelcomeSettings::CardBackground))
                    .col(string(WelcomeSettings::CardFont).default("Inter"))
                    .col(string(WelcomeSettings::CardTextColor).default("#ffffff"))
                    .col(string(WelcomeSettings::CardBgColor).default("#000000"))
                    .col(double(WelcomeSettings::CardOverlayOpacity).default(0.5))
                    .primary_key(
                        Index::create()
                            .col(WelcomeSettings::GuildId)
                            .col(WelcomeSettings::BotId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_welcome_settings_bot_id")
                            .from(WelcomeSettings::Table, WelcomeSettings::BotId)
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
            .drop_table(Table::drop().table(WelcomeSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WelcomeSettings {
    Table,
    GuildId,
    BotId,
    WelcomeEnabled,
    WelcomeChannelId,
    WelcomeMessage,
    GoodbyeEnabled,
    GoodbyeChannelId,
    GoodbyeMessage,
    AutoroleEnabled,
    AutoroleId,
    CardEnabled,
    CardBackground,
    CardFont,
    CardTextColor,
    CardBgColor,
    CardOverlayOpacity,
}
