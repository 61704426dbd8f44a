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
                    .table(TicketResponse::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketResponse::Id))
                    .col(integer(TicketResponse::TicketId))
                    .col(string(TicketResponse::Question))
                    .col(text(TicketResponse::Response))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_response_ticket_id")
                            .from(TicketResponse::Table, TicketResponse::TicketId)
                            .to(Ticket::Table, Ticket::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketResponse::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketResponse {
    Table,
    Id,
    TicketId,
    Question,
    Response,
}
