//! Bot data repository for tenant bot records.

use crate::server::{
    error::AppError,
    model::bot::{Bot, BotPresence, BotStatus, CreateBotParam, UpdateBotInfoParam},
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

/// Repository providing database operations for tenant bots.
pub struct BotRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BotRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new bot in the `stopped` state with the default presence.
    ///
    /// # Arguments
    /// - `param` - Owner, encrypted token and identity fetched from Discord
    ///
    /// # Returns
    /// - `Ok(Bot)` - The created bot
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateBotParam) -> Result<Bot, AppError> {
        let presence = BotPresence::default();
        let entity = entity::bot::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            bot_token: ActiveValue::Set(param.encrypted_token),
            client_id: ActiveValue::Set(Some(param.client_id.to_string())),
            bot_name: ActiveValue::Set(Some(param.name)),
            bot_avatar: ActiveValue::Set(param.avatar),
            status: ActiveValue::Set(BotStatus::Stopped.as_str().to_string()),
            error_message: ActiveValue::Set(None),
            guilds_count: ActiveValue::Set(0),
            activity_type: ActiveValue::Set(presence.activity.to_string()),
            activity_name: ActiveValue::Set(presence.activity_name),
            status_presence: ActiveValue::Set(presence.status.as_str().to_string()),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Bot::from_entity(entity)
    }

    pub async fn find_by_id(&self, bot_id: i32) -> Result<Option<Bot>, AppError> {
        entity::prelude::Bot::find_by_id(bot_id)
            .one(self.db)
            .await?
            .map(Bot::from_entity)
            .transpose()
    }

    /// Gets all bots owned by a user, oldest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Bot>, AppError> {
        entity::prelude::Bot::find()
            .filter(entity::bot::Column::UserId.eq(user_id))
            .order_by_asc(entity::bot::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Bot::from_entity)
            .collect()
    }

    pub async fn count_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Bot::find()
            .filter(entity::bot::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Bot::find().count(self.db).await
    }

    pub async fn count_by_status(&self, status: BotStatus) -> Result<u64, DbErr> {
        entity::prelude::Bot::find()
            .filter(entity::bot::Column::Status.eq(status.as_str()))
            .count(self.db)
            .await
    }

    /// Gets bots whose stored status matches, used to restore running bots at boot.
    pub async fn get_by_status(&self, status: BotStatus) -> Result<Vec<Bot>, AppError> {
        entity::prelude::Bot::find()
            .filter(entity::bot::Column::Status.eq(status.as_str()))
            .order_by_asc(entity::bot::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Bot::from_entity)
            .collect()
    }

    /// Sets the stored status and error message.
    ///
    /// # Arguments
    /// - `bot_id` - Bot to update
    /// - `status` - New status
    /// - `error_message` - Friendly error shown on the dashboard; cleared when `None`
    pub async fn set_status(
        &self,
        bot_id: i32,
        status: BotStatus,
        error_message: Option<String>,
    ) -> Result<(), DbErr> {
        entity::prelude::Bot::update_many()
            .col_expr(entity::bot::Column::Status, Expr::value(status.as_str()))
            .col_expr(entity::bot::Column::ErrorMessage, Expr::value(error_message))
            .filter(entity::bot::Column::Id.eq(bot_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Stores identity details reported by Discord after login.
    pub async fn update_info(&self, bot_id: i32, param: UpdateBotInfoParam) -> Result<(), DbErr> {
        entity::prelude::Bot::update_many()
            .col_expr(
                entity::bot::Column::ClientId,
                Expr::value(param.client_id.to_string()),
            )
            .col_expr(entity::bot::Column::BotName, Expr::value(param.name))
            .col_expr(entity::bot::Column::BotAvatar, Expr::value(param.avatar))
            .col_expr(
                entity::bot::Column::GuildsCount,
                Expr::value(param.guilds_count),
            )
            .filter(entity::bot::Column::Id.eq(bot_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn update_guilds_count(&self, bot_id: i32, guilds_count: i32) -> Result<(), DbErr> {
        entity::prelude::Bot::update_many()
            .col_expr(entity::bot::Column::GuildsCount, Expr::value(guilds_count))
            .filter(entity::bot::Column::Id.eq(bot_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn update_presence(&self, bot_id: i32, presence: &BotPresence) -> Result<(), DbErr> {
        entity::prelude::Bot::update_many()
            .col_expr(
                entity::bot::Column::ActivityType,
                Expr::value(presence.activity.to_string()),
            )
            .col_expr(
                entity::bot::Column::ActivityName,
                Expr::value(presence.activity_name.clone()),
            )
            .col_expr(
                entity::bot::Column::StatusPresence,
                Expr::value(presence.status.as_str()),
            )
            .filter(entity::bot::Column::Id.eq(bot_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Replaces the stored token, used when re-encrypting a legacy plaintext token.
    pub async fn update_token(&self, bot_id: i32, encrypted_token: String) -> Result<(), DbErr> {
        entity::prelude::Bot::update_many()
            .col_expr(entity::bot::Column::BotToken, Expr::value(encrypted_token))
            .filter(entity::bot::Column::Id.eq(bot_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a bot.
    ///
    /// # Returns
    /// - `Ok(true)` - Bot deleted
    /// - `Ok(false)` - No bot with that id
    pub async fn delete(&self, bot_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Bot::delete_by_id(bot_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
