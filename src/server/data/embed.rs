//! Saved embed repository.

use crate::server::{
    error::AppError,
    model::embed::{SaveEmbedParam, SavedEmbed},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct EmbedRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmbedRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Copies the editable fields of `param` onto `active`.
    fn apply(active: &mut entity::embed::ActiveModel, param: SaveEmbedParam) {
        let body = param.body;
        active.name = ActiveValue::Set(param.name);
        active.channel_id = ActiveValue::Set(param.channel_id.map(|id| id.to_string()));
        active.content = ActiveValue::Set(body.content);
        active.title = ActiveValue::Set(body.title);
        active.description = ActiveValue::Set(body.description);
        active.color = ActiveValue::Set(body.color);
        active.image_url = ActiveValue::Set(body.image_url);
        active.thumbnail_url = ActiveValue::Set(body.thumbnail_url);
        active.footer_text = ActiveValue::Set(body.footer_text);
        active.footer_icon_url = ActiveValue::Set(body.footer_icon_url);
        active.author_name = ActiveValue::Set(body.author_name);
        active.author_icon_url = ActiveValue::Set(body.author_icon_url);
        active.author_url = ActiveValue::Set(body.author_url);
        active.title_url = ActiveValue::Set(body.title_url);
        active.timestamp = ActiveValue::Set(body.timestamp);
    }

    pub async fn create(&self, param: SaveEmbedParam) -> Result<SavedEmbed, AppError> {
        let mut active = entity::embed::ActiveModel {
            bot_id: ActiveValue::Set(param.bot_id),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        };
        Self::apply(&mut active, param);

        SavedEmbed::from_entity(active.insert(self.db).await?)
    }

    /// Looks up an embed within a bot's guild.
    pub async fn find(
        &self,
        bot_id: i32,
        guild_id: u64,
        embed_id: i32,
    ) -> Result<Option<SavedEmbed>, AppError> {
        entity::prelude::Embed::find_by_id(embed_id)
            .filter(entity::embed::Column::BotId.eq(bot_id))
            .filter(entity::embed::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(SavedEmbed::from_entity)
            .transpose()
    }

    /// Embeds of a guild, newest first.
    pub async fn get_by_guild(&self, bot_id: i32, guild_id: u64) -> Result<Vec<SavedEmbed>, AppError> {
        entity::prelude::Embed::find()
            .filter(entity::embed::Column::BotId.eq(bot_id))
            .filter(entity::embed::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::embed::Column::CreatedAt)
            .order_by_desc(entity::embed::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(SavedEmbed::from_entity)
            .collect()
    }

    /// Replaces an embed's design.
    ///
    /// # Returns
    /// - `Ok(Some(SavedEmbed))` - Updated embed
    /// - `Ok(None)` - No embed with that id in the guild
    pub async fn update(
        &self,
        embed_id: i32,
        param: SaveEmbedParam,
    ) -> Result<Option<SavedEmbed>, AppError> {
        let Some(existing) = entity::prelude::Embed::find_by_id(embed_id)
            .filter(entity::embed::Column::BotId.eq(param.bot_id))
            .filter(entity::embed::Column::GuildId.eq(param.guild_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::embed::ActiveModel = existing.into();
        Self::apply(&mut active, param);
        let entity = active.update(self.db).await?;

        Ok(Some(SavedEmbed::from_entity(entity)?))
    }

    pub async fn delete(&self, bot_id: i32, guild_id: u64, embed_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Embed::delete_many()
            .filter(entity::embed::Column::Id.eq(embed_id))
            .filter(entity::embed::Column::BotId.eq(bot_id))
            .filter(entity::embed::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
