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
                    .table(InviteJoin::Table)
                    .if_not_exists()
                    .col(pk_auto(InviteJoin::Id))
                    .col(integer(InviteJoin::BotId))
                    .col(string(InviteJoin::GuildId))
                    .col(string(InviteJoin::UserId))
                    .col(string_null(InviteJoin::InviterId))
                    .col(string_null(InviteJoin::Code))
                    .col(
                        timestamp(InviteJoin::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invite_join_bot_id")
                            .from(InviteJoin::Table, InviteJoin::BotId)
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
                    .name("idx_invite_join_guild")
                    .table(InviteJoin::Table)
                    .col(InviteJoin::BotId)
                    .col(InviteJoin::GuildId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InviteJoin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InviteJoin {
    Table,
    Id,
    BotId,
    GuildId,
    UserId,
    InviterId,
    Code,
    CreatedAt,
}
