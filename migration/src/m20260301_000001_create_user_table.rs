use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_uniq(User::Email))
                    .col(string(User::PasswordHash))
                    .col(string(User::Username))
                    .col(boolean(User::IsAdmin).default(false))
                    .col(boolean(User::IsApproved).default(false))
                    .col(boolean(User::IsBanned).default(false))
                    .col(integer(User::MaxBots).default(2))
                    .col(integer_null(User::InvitedBy))
                    .col(string_null(User::InviteCodeUsed))
                    .col(
                        timestamp(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Email,
    PasswordHash,
    Username,
    IsAdmin,
    IsApproved,
    IsBanned,
    MaxBots,
    InvitedBy,
    InviteCodeUsed,
    CreatedAt,
}
