//! Sticky message repository.

use crate::server::{error::AppError, model::community::StickyMessage};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct StickyMessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StickyMessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or replaces the sticky message of a channel.
    ///
    /// Replacing the content forgets the previously posted copy.
    pub async fn upsert(
        &self,
        bot_id: i32,
        guild_id: u64,
        channel_id: u64,
        content: String,
    ) -> Result<StickyMessage, AppError> {
        let existing = entity::prelude::StickyMessage::find()
            .filter(entity::sticky_message::Column::BotId.eq(bot_id))
            .filter(entity::sticky_message::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let mut active: entity::sticky_message::ActiveModel = existing.into();
                active.content = ActiveValue::Set(content);
                active.last_message_id = ActiveValue::Set(None);
                active.update(self.db).await?
            }
            None => {
                entity::sticky_message::ActiveModel {
                    bot_id: ActiveValue::Set(bot_id),
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    channel_id: ActiveValue::Set(channel_id.to_string()),
                    content: ActiveValue::Set(content),
                    last_message_id: ActiveValue::Set(None),
                    created_at: ActiveValue::Set(chrono::Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        StickyMessage::from_entity(entity)
    }

    pub async fn get_by_guild(
        &self,
        bot_id: i32,
        guild_id: u64,
    ) -> Result<Vec<StickyMessage>, AppError> {
        entity::prelude::StickyMessage::find()
            .filter(entity::sticky_message::Column::BotId.eq(bot_id))
            .filter(entity::sticky_message::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::sticky_message::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(StickyMessage::from_entity)
            .collect()
    }

    /// Gets every sticky message of a bot, used to fill its cache.
    pub async fn get_by_bot(&self, bot_id: i32) -> Result<Vec<StickyMessage>, AppError> {
        entity::prelude::StickyMessage::find()
            .filter(entity::sticky_message::Column::BotId.eq(bot_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(StickyMessage::from_entity)
            .collect()
    }

    pub async fn set_last_message(
        &self,
        bot_id: i32,
        channel_id: u64,
        message_id: u64,
    ) -> Result<(), DbErr> {
        entity::prelude::StickyMessage::update_many()
            .col_expr(
                entity::sticky_message::Column::LastMessageId,
                Expr::value(message_id.to_string()),
            )
            .filter(entity::sticky_message::Column::BotId.eq(bot_id))
            .filter(entity::sticky_message::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, bot_id: i32, guild_id: u64, channel_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::StickyMessage::delete_many()
            .filter(entity::sticky_message::Column::BotId.eq(bot_id))
            .filter(entity::sticky_message::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::sticky_message::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
