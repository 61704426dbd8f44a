use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000005_create_panel_table::Panel;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PanelOption::Table)
                    .if_not_exists()
                    .col(pk_auto(PanelOption::Id))
                    .col(integer(PanelOption::PanelId))
                    .col(string(PanelOption::Label))
                    .col(string_null(PanelOption::Emoji))
                    .col(string(PanelOption::Style).default("Primary"))
                    .col(string_null(PanelOption::CategoryName))
                    .col(string_null(PanelOption::TicketPrefix))
                    .col(text(PanelOption::SupportRoleIds).default("[]"))
                    .col(text(PanelOption::RequiredRoles).default("[]"))
                    .col(text_null(PanelOption::WelcomeMessage))
                    .col(text_null(PanelOption::TicketMessage))
                    .col(text_null(PanelOption::StaffThreadMessage))
                    .col(boolean(PanelOption::SteamRequired).default(false))
                    .col(boolean(PanelOption::PingsEnabled).default(true))
                    .col(boolean(PanelOption::IsDisabled).default(false))
                    .col(string(PanelOption::TicketStyle).default("channel"))
                    .col(string_null(PanelOption::TicketCategoryId))
                    .col(integer(PanelOption::Position).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_panel_option_panel_id")
                            .from(PanelOption::Table, PanelOption::PanelId)
                            .to(Panel::Table, Panel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PanelOption::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PanelOption {
    Table,
    Id,
    PanelId,
    Label,
    Emoji,
    Style,
    CategoryName,
    TicketPrefix,
    SupportRoleIds,
    RequiredRoles,
    WelcomeMessage,
    TicketMessage,
    StaffThreadMessage,
    SteamRequired,
    PingsEnabled,
    IsDisabled,
    TicketStyle,
    TicketCategoryId,
    Position,
}
