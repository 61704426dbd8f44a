//! Custom command repository.

use crate::server::{
    error::AppError,
    model::community::{CustomCommand, SaveCustomCommandParam},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct CustomCommandRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CustomCommandRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a command. The trigger must already be lower-cased.
    ///
    /// # Returns
    /// - `Ok(CustomCommand)` - Created command
    /// - `Err(AppError::DbErr)` - Database error, including a duplicate trigger
    pub async fn create(&self, param: SaveCustomCommandParam) -> Result<CustomCommand, AppError> {
        let entity = entity::custom_command::ActiveModel {
            bot_id: ActiveValue::Set(param.bot_id),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            trigger: ActiveValue::Set(param.trigger),
            response: ActiveValue::Set(param.response),
            embed_title: ActiveValue::Set(param.embed_title),
            embed_description: ActiveValue::Set(param.embed_description),
            embed_color: ActiveValue::Set(param.embed_color),
            created_by: ActiveValue::Set(param.created_by),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        CustomCommand::from_entity(entity)
    }

    /// Updates a command's trigger and reply.
    ///
    /// # Returns
    /// - `Ok(Some(CustomCommand))` - Updated command
    /// - `Ok(None)` - No command with that id in the guild
    pub async fn update(
        &self,
        command_id: i32,
        param: SaveCustomCommandParam,
    ) -> Result<Option<CustomCommand>, AppError> {
        let Some(existing) = entity::prelude::CustomCommand::find_by_id(command_id)
            .filter(entity::custom_command::Column::BotId.eq(param.bot_id))
            .filter(entity::custom_command::Column::GuildId.eq(param.guild_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::custom_command::ActiveModel = existing.into();
        active.trigger = ActiveValue::Set(param.trigger);
        active.response = ActiveValue::Set(param.response);
        active.embed_title = ActiveValue::Set(param.embed_title);
        active.embed_description = ActiveValue::Set(param.embed_description);
        active.embed_color = ActiveValue::Set(param.embed_color);

        let entity = active.update(self.db).await?;

        Ok(Some(CustomCommand::from_entity(entity)?))
    }

    /// Looks up the command answering `trigger` in a guild.
    pub async fn find_by_trigger(
        &self,
        bot_id: i32,
        guild_id: u64,
        trigger: &str,
    ) -> Result<Option<CustomCommand>, AppError> {
        entity::prelude::CustomCommand::find()
            .filter(entity::custom_command::Column::BotId.eq(bot_id))
            .filter(entity::custom_command::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::custom_command::Column::Trigger.eq(trigger))
            .one(self.db)
            .await?
            .map(CustomCommand::from_entity)
            .transpose()
    }

    pub async fn get_by_guild(
        &self,
        bot_id: i32,
        guild_id: u64,
    ) -> Result<Vec<CustomCommand>, AppError> {
        entity::prelude::CustomCommand::find()
            .filter(entity::custom_command::Column::BotId.eq(bot_id))
            .filter(entity::custom_command::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::custom_command::Column::Trigger)
            .all(self.db)
            .await?
            .into_iter()
            .map(CustomCommand::from_entity)
            .collect()
    }

    pub async fn delete(&self, bot_id: i32, guild_id: u64, command_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CustomCommand::delete_many()
            .filter(entity::custom_command::Column::Id.eq(command_id))
            .filter(entity::custom_command::Column::BotId.eq(bot_id))
            .filter(entity::custom_command::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
