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
                    .table(CustomCommand::Table)
                    .if_not_exists()
                    .col(pk_auto(CustomCommand::Id))
                    .col(integer(CustomCommand::BotId))
                    .col(string(CustomCommand::GuildId))
                    .col(string(CustomCommand::Trigger))
                    .col(text(CustomCommand::Response))
                    .col(string_null(CustomCommand::EmbedTitle))
                    .col(text_null(CustomCommand::EmbedDescription))
                    .col(string_null(CustomCommand::EmbedColor))
                    .col(integer_null(CustomCommand::CreatedBy))
                    .col(
                        timestamp(CustomCommand::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_custom_command_bot_id")
                            .from(CustomCommand::Table, CustomCommand::BotId)
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
                    .name("idx_custom_command_trigger_unique")
                    .table(CustomCommand::Table)
                    .col(CustomCommand::BotId)
                    .col(CustomCommand::GuildId)
                    .col(CustomCommand::Trigger)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomCommand::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CustomCommand {
    Table,
    Id,
    BotId,
    GuildId,
    Trigger,
    Response,
    EmbedTitle,
    EmbedDescription,
    EmbedColor,
    CreatedBy,
    CreatedAt,
}
