//! Welcome settings repository.

use crate::server::{error::AppError, model::community::WelcomeSettings};
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

pub struct WelcomeSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WelcomeSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a guild's settings, falling back to defaults when none were saved.
    pub async fn get(&self, guild_id: u64, bot_id: i32) -> Result<WelcomeSettings, AppError> {
        match entity::prelude::WelcomeSettings::find_by_id((guild_id.to_string(), bot_id))
            .one(self.db)
            .await?
        {
            Some(entity) => WelcomeSettings::from_entity(entity),
            None => Ok(WelcomeSettings::default()),
        }
    }

    /// Saves every setting for the guild, replacing any previous row.
    pub async fn save(
        &self,
        guild_id: u64,
        bot_id: i32,
        settings: WelcomeSettings,
    ) -> Result<WelcomeSettings, AppError> {
        use entity::welcome_settings::Column;

        let entity = entity::prelude::WelcomeSettings::insert(entity::welcome_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            bot_id: ActiveValue::Set(bot_id),
            welcome_enabled: ActiveValue::Set(settings.welcome_enabled),
            welcome_channel_id: ActiveValue::Set(settings.welcome_channel_id.map(|id| id.to_string())),
            welcome_message: ActiveValue::Set(settings.welcome_message),
            goodbye_enabled: ActiveValue::Set(settings.goodbye_enabled),
            goodbye_channel_id: ActiveValue::Set(settings.goodbye_channel_id.map(|id| id.to_string())),
            goodbye_message: ActiveValue::Set(settings.goodbye_message),
            autorole_enabled: ActiveValue::Set(settings.autorole_enabled),
            autorole_id: ActiveValue::Set(settings.autorole_id.map(|id| id.to_string())),
            card_enabled: ActiveValue::Set(settings.card_enabled),
            card_background: ActiveValue::Set(settings.card_background),
            card_font: ActiveValue::Set(settings.card_font),
            card_text_color: ActiveValue::Set(settings.card_text_color),
            card_bg_color: ActiveValue::Set(settings.card_bg_color),
            card_overlay_opacity: ActiveValue::Set(settings.card_overlay_opacity),
        })
        .on_conflict(
            OnConflict::columns([Column::GuildId, Column::BotId])
                .update_columns([
                    Column::WelcomeEnabled,
                    Column::WelcomeChannelId,
                    Column::WelcomeMessage,
                    Column::GoodbyeEnabled,
                    Column::GoodbyeChannelId,
                    Column::GoodbyeMessage,
                    Column::AutoroleEnabled,
                    Column::AutoroleId,
                    Column::CardEnabled,
                    Column::CardBackground,
                    Column::CardFont,
                    Column::CardTextColor,
                    Column::CardBgColor,
                    Column::CardOverlayOpacity,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        WelcomeSettings::from_entity(entity)
    }
}
