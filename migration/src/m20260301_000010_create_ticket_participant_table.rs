use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000008_create_ticket_table::Ticket;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketParticipant::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketParticipant::Id))
                    .col(integer(TicketParticipant::TicketId))
                    .col(string(TicketParticipant::UserId))
                    .col(string_null(TicketParticipant::AddedBy))
                    .col(
                        timestamp(TicketParticipant::AddedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_participant_ticket_id")
                            .from(TicketParticipant::Table, TicketParticipant::TicketId)
                            .to(Ticket::Table, Ticket::Id)
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
                    .name("idx_ticket_participant_unique")
                    .table(TicketParticipant::Table)
                    .col(TicketParticipant::TicketId)
                    .col(TicketParticipant::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketParticipant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketParticipant {
    Table,
    Id,
    TicketId,
    UserId,
    AddedBy,
    AddedAt,
}
