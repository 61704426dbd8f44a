use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000006_create_panel_option_table::PanelOption;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PanelQuestion::Table)
                    .if_not_exists()
                    .col(pk_auto(PanelQuestion::Id))
                    .col(integer(PanelQuestion::OptionId))
                    .col(string(PanelQuestion::Question))
                    .col(string_null(PanelQuestion::Placeholder))
                    .col(boolean(PanelQuestion::Required).default(true))
                    .col(integer(PanelQuestion::MinLength).default(1))
                    .col(integer(PanelQuestion::MaxLength).default(1000))
                    .col(string(PanelQuestion::Style).default("Paragraph"))
                    .col(integer(PanelQuestion::Position).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_panel_question_option_id")
                            .from(PanelQuestion::Table, PanelQuestion::OptionId)
                            .to(PanelOption::Table, PanelOption::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PanelQuestion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PanelQuestion {
    Table,
    Id,
    OptionId,
    Question,
    Placeholder,
    Required,
    MinLength,
    MaxLength,
    Style,
    Position,
}
