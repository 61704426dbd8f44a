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
                    .table(Template::Table)
                    .if_not_exists()
                    .col(pk_auto(Template::Id))
                    .col(integer(Template::BotId))
                    .col(string(Template::GuildId))
                    .col(string(Template::Name))
                    .col(text(Template::PanelData))
                    .col(
                        timestamp(Template::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_bot_id")
                            .from(Template::Table, Template::BotId)
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
            .drop_table(Table::drop().table(Template::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Template {
    Table,
    Id,
    BotId,
    GuildId,
    Name,
    PanelData,
    CreatedAt,
}
