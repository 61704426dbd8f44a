//! Guild configuration repository.
//!
//! Each (guild, bot) pair has its own configuration row so the same Discord guild can
//! host several tenant bots independently.

use crate::server::{
    error::AppError,
    model::guild::{GuildConfig, UpdateGuildSettingsParam},
    util::parse::encode_id_list,
};
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ExprTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

pub struct GuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a guild row for the bot or refreshes its name.
    ///
    /// Settings of an existing row are left untouched.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild id
    /// - `bot_id` - Bot serving the guild
    /// - `name` - Current guild name
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - The created or updated configuration
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn upsert(&self, guild_id: u64, bot_id: i32, name: &str) -> Result<GuildConfig, AppError> {
        let entity = entity::prelude::Guild::insert(new_guild(guild_id, bot_id, name))
            .on_conflict(
                OnConflict::columns([entity::guild::Column::Id, entity::guild::Column::BotId])
                    .update_column(entity::guild::Column::Name)
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        GuildConfig::from_entity(entity)
    }

    pub async fn find(&self, guild_id: u64, bot_id: i32) -> Result<Option<GuildConfig>, AppError> {
        entity::prelude::Guild::find_by_id((guild_id.to_string(), bot_id))
            .one(self.db)
            .await?
            .map(GuildConfig::from_entity)
            .transpose()
    }

    /// Gets every guild a bot has been seen in, alphabetically.
    pub async fn get_by_bot(&self, bot_id: i32) -> Result<Vec<GuildConfig>, AppError> {
        entity::prelude::Guild::find()
            .filter(entity::guild::Column::BotId.eq(bot_id))
            .order_by_asc(entity::guild::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(GuildConfig::from_entity)
            .collect()
    }

    /// Applies a settings update. Only whitelisted columns are writable.
    ///
    /// # Returns
    /// - `Ok(Some(GuildConfig))` - Updated configuration
    /// - `Ok(None)` - Bot has no row for that guild
    /// - `Err(AppError::DbErr)` - Database error during update
    pub async fn update_settings(
        &self,
        guild_id: u64,
        bot_id: i32,
        param: UpdateGuildSettingsParam,
    ) -> Result<Option<GuildConfig>, AppError> {
        let Some(existing) = entity::prelude::Guild::find_by_id((guild_id.to_string(), bot_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::guild::ActiveModel = existing.into();
        if let Some(channel) = param.log_channel_id {
            active.log_channel_id = ActiveValue::Set(channel.map(|id| id.to_string()));
        }
        if let Some(channel) = param.transcript_channel_id {
            active.transcript_channel_id = ActiveValue::Set(channel.map(|id| id.to_string()));
        }
        if let Some(category) = param.ticket_category_id {
            active.ticket_category_id = ActiveValue::Set(category.map(|id| id.to_string()));
        }
        if let Some(roles) = param.support_role_ids {
            active.support_role_ids = ActiveValue::Set(encode_id_list(&roles));
        }
        if let Some(roles) = param.admin_role_ids {
            active.admin_role_ids = ActiveValue::Set(encode_id_list(&roles));
        }
        if let Some(language) = param.language {
            active.language = ActiveValue::Set(language);
        }
        if let Some(timezone) = param.timezone {
            active.timezone = ActiveValue::Set(timezone);
        }
        if let Some(hours) = param.auto_close_hours {
            active.auto_close_hours = ActiveValue::Set(hours);
        }
        if let Some(hours) = param.auto_close_warning_hours {
            active.auto_close_warning_hours = ActiveValue::Set(hours);
        }
        if let Some(channel) = param.vouch_channel_id {
            active.vouch_channel_id = ActiveValue::Set(channel.map(|id| id.to_string()));
        }
        if let Some(vouch) = param.vouch {
            active.vouch_data = ActiveValue::Set(vouch.to_json()?);
        }

        let entity = active.update(self.db).await?;

        Ok(Some(GuildConfig::from_entity(entity)?))
    }

    /// Atomically increments the guild's ticket counter and returns the new value.
    ///
    /// A missing guild row is created first, so the first ticket of a guild gets 1.
    ///
    /// # Returns
    /// - `Ok(i32)` - The reserved ticket number
    /// - `Err(AppError::DbErr)` - Database error; the transaction is rolled back
    pub async fn next_ticket_number(&self, guild_id: u64, bot_id: i32) -> Result<i32, AppError> {
        let txn = self.db.begin().await?;
        let key = (guild_id.to_string(), bot_id);

        if entity::prelude::Guild::find_by_id(key.clone())
            .one(&txn)
            .await?
            .is_none()
        {
            new_guild(guild_id, bot_id, "").insert(&txn).await?;
        }

        entity::prelude::Guild::update_many()
            .col_expr(
                entity::guild::Column::TicketCounter,
                Expr::col(entity::guild::Column::TicketCounter).add(1),
            )
            .filter(entity::guild::Column::Id.eq(key.0.clone()))
            .filter(entity::guild::Column::BotId.eq(bot_id))
            .exec(&txn)
            .await?;

        let counter = entity::prelude::Guild::find_by_id(key)
            .one(&txn)
            .await?
            .map(|guild| guild.ticket_counter)
            .ok_or_else(|| AppError::NotFound("Guild configuration not found".to_string()))?;

        txn.commit().await?;

        Ok(counter)
    }
}

fn new_guild(guild_id: u64, bot_id: i32, name: &str) -> entity::guild::ActiveModel {
    entity::guild::ActiveModel {
        id: ActiveValue::Set(guild_id.to_string()),
        bot_id: ActiveValue::Set(bot_id),
        name: ActiveValue::Set(name.to_string()),
        log_channel_id: ActiveValue::Set(None),
        transcript_channel_id: ActiveValue::Set(None),
        ticket_category_id: ActiveValue::Set(None),
        support_role_ids: ActiveValue::Set("[]".to_string()),
        admin_role_ids: ActiveValue::Set("[]".to_string()),
        ticket_counter: ActiveValue::Set(0),
        language: ActiveValue::Set("en".to_string()),
        timezone: ActiveValue::Set("UTC".to_string()),
        auto_close_hours: ActiveValue::Set(0),
        auto_close_warning_hours: ActiveValue::Set(0),
        vouch_channel_id: ActiveValue::Set(None),
        vouch_data: ActiveValue::Set(None),
        created_at: ActiveValue::Set(chrono::Utc::now()),
    }
}
