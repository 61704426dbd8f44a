use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000003_create_bot_table::Bot, m20260301_000005_create_panel_table::Panel,
    m20260301_000006_create_panel_option_table::PanelOption,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(integer(Ticket::BotId))
                    .col(string(Ticket::GuildId))
                    .col(string_uniq(Ticket::ChannelId))
                    .col(string(Ticket::UserId))
                    .col(integer_null(Ticket::PanelId))
                    .col(integer_null(Ticket::OptionId))
                    .col(integer(Ticket::TicketNumber))
                    .col(string(Ticket::Status).default("open"))
                    .col(string_null(Ticket::ClaimedBy))
                    .col(
                        timestamp(Ticket::OpenedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(Ticket::ClosedAt))
                    .col(string_null(Ticket::ClosedBy))
                    .col(text_null(Ticket::CloseReason))
                    .col(string_null(Ticket::TranscriptUrl))
                    .col(
                        timestamp(Ticket::LastActivity)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(Ticket::FirstResponseAt))
                    .col(big_integer_null(Ticket::ResponseTimeSeconds))
                    .col(boolean(Ticket::WarnedAutoClose).default(false))
                    .col(text_null(Ticket::Messages))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_bot_id")
                            .from(Ticket::Table, Ticket::BotId)
                            .to(Bot::Table, Bot::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_panel_id")
                            .from(Ticket::Table, Ticket::PanelId)
                            .to(Panel::Table, Panel::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_option_id")
                            .from(Ticket::Table, Ticket::OptionId)
                            .to(PanelOption::Table, PanelOption::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_guild_status")
                    .table(Ticket::Table)
                    .col(Ticket::BotId)
                    .col(Ticket::GuildId)
                    .col(Ticket::Status)
                    .to_owned(),
            )
            .await?;

        // One open ticket per user and panel option
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_ticket_open_per_option \
                 ON ticket (bot_id, guild_id, user_id, option_id) WHERE status = 'open'",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    BotId,
    GuildId,
    ChannelId,
    UserId,
    PanelId,
    OptionId,
    TicketNumber,
    Status,
    ClaimedBy,
    OpenedAt,
    ClosedAt,
    ClosedBy,
    CloseReason,
    TranscriptUrl,
    LastActivity,
    FirstResponseAt,
    ResponseTimeSeconds,
    WarnedAutoClose,
    Messages,
}
