//! Guild configuration and live guild data read through a bot.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{all::GuildId, http::Http};

use crate::{
    model::guild::{ChannelDto, EmojiDto, GuildInfoDto, RoleDto, UpdateGuildSettingsDto},
    server::{
        data::guild::GuildRepository,
        error::AppError,
        model::guild::{GuildConfig, UpdateGuildSettingsParam, VouchSettings},
        util::{locale::Language, parse::parse_id_strings},
    },
};

/// Longest inactivity window accepted for auto-close, 30 days.
const MAX_AUTO_CLOSE_HOURS: i32 = 720;

/// Converts a settings update from the dashboard into a whitelisted update.
///
/// # Returns
/// - `Ok(UpdateGuildSettingsParam)` - Validated update
/// - `Err(AppError::BadRequest)` - Bad id, unknown language or hours out of range
pub fn settings_param(dto: UpdateGuildSettingsDto) -> Result<UpdateGuildSettingsParam, AppError> {
    if let Some(language) = dto.language.as_deref() {
        if !Language::is_supported(language) {
            return Err(AppError::BadRequest(format!(
                "Unsupported language '{}'",
                language
            )));
        }
    }

    let hours = dto.auto_close_hours;
    if let Some(hours) = hours {
        if !(0..=MAX_AUTO_CLOSE_HOURS).contains(&hours) {
            return Err(AppError::BadRequest(format!(
                "Auto-close hours must be between 0 and {}",
                MAX_AUTO_CLOSE_HOURS
            )));
        }
    }
    if let Some(warning) = dto.auto_close_warning_hours {
        if warning < 0 || hours.is_some_and(|hours| hours > 0 && warning >= hours) {
            return Err(AppError::BadRequest(
                "Warning hours must be below the auto-close hours".to_string(),
            ));
        }
    }

    Ok(UpdateGuildSettingsParam {
        log_channel_id: optional_channel(dto.log_channel_id)?,
        transcript_channel_id: optional_channel(dto.transcript_channel_id)?,
        ticket_category_id: optional_channel(dto.ticket_category_id)?,
        support_role_ids: dto
            .support_role_ids
            .map(|ids| parse_id_strings(&ids))
            .transpose()
            .map_err(|_| AppError::BadRequest("Invalid role id".to_string()))?,
        admin_role_ids: dto
            .admin_role_ids
            .map(|ids| parse_id_strings(&ids))
            .transpose()
            .map_err(|_| AppError::BadRequest("Invalid role id".to_string()))?,
        language: dto.language,
        timezone: dto.timezone.filter(|tz| !tz.trim().is_empty()),
        auto_close_hours: hours,
        auto_close_warning_hours: dto.auto_close_warning_hours,
        vouch_channel_id: optional_channel(dto.vouch_channel_id)?,
        vouch: dto.vouch_data.map(VouchSettings::from_dto).transpose()?,
    })
}

/// `None` leaves the channel, an empty string clears it.
fn optional_channel(value: Option<String>) -> Result<Option<Option<u64>>, AppError> {
    match value {
        None => Ok(None),
        Some(id) if id.trim().is_empty() => Ok(Some(None)),
        Some(id) => id
            .trim()
            .parse::<u64>()
            .map(|id| Some(Some(id)))
            .map_err(|_| AppError::BadRequest(format!("Invalid channel id '{}'", id))),
    }
}

pub struct GuildService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> GuildService<'a> {
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    /// Guilds the bot has synced, ordered by name.
    pub async fn list(&self) -> Result<Vec<GuildConfig>, AppError> {
        GuildRepository::new(self.db).get_by_bot(self.bot_id).await
    }

    /// Stored configuration of a guild.
    ///
    /// # Returns
    /// - `Ok(GuildConfig)` - Configuration
    /// - `Err(AppError::NotFound)` - Bot has never seen the guild
    pub async fn config(&self, guild_id: u64) -> Result<GuildConfig, AppError> {
        GuildRepository::new(self.db)
            .find(guild_id, self.bot_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Guild not found".to_string()))
    }

    pub async fn update_settings(
        &self,
        guild_id: u64,
        dto: UpdateGuildSettingsDto,
    ) -> Result<GuildConfig, AppError> {
        let param = settings_param(dto)?;

        GuildRepository::new(self.db)
            .update_settings(guild_id, self.bot_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Guild not found".to_string()))
    }

    /// Live guild details fetched with the bot's HTTP client.
    pub async fn info(http: &Arc<Http>, guild_id: u64) -> Result<GuildInfoDto, AppError> {
        let guild = GuildId::new(guild_id)
            .to_partial_guild_with_counts(http)
            .await?;

        Ok(GuildInfoDto {
            id: guild.id.to_string(),
            name: guild.name.clone(),
            icon_url: guild.icon_url(),
            member_count: guild.approximate_member_count,
            owner_id: guild.owner_id.to_string(),
        })
    }

    /// Channels of the guild, sorted by position.
    pub async fn channels(http: &Arc<Http>, guild_id: u64) -> Result<Vec<ChannelDto>, AppError> {
        let mut channels: Vec<ChannelDto> = GuildId::new(guild_id)
            .channels(http)
            .await?
            .into_values()
            .map(|channel| ChannelDto {
                id: channel.id.to_string(),
                name: channel.name,
                kind: channel.kind.name().to_string(),
                parent_id: channel.parent_id.map(|id| id.to_string()),
                position: channel.position,
            })
            .collect();
        channels.sort_by(|a, b| a.position.cmp(&b.position).then(a.name.cmp(&b.name)));

        Ok(channels)
    }

    /// Roles of the guild, highest first, without `@everyone`.
    pub async fn roles(http: &Arc<Http>, guild_id: u64) -> Result<Vec<RoleDto>, AppError> {
        let mut roles: Vec<RoleDto> = GuildId::new(guild_id)
            .roles(http)
            .await?
            .into_values()
            .filter(|role| role.id.get() != guild_id)
            .map(|role| RoleDto {
                id: role.id.to_string(),
                name: role.name,
                color: role.colour.0,
                position: role.position,
                managed: role.managed,
            })
            .collect();
        roles.sort_by(|a, b| b.position.cmp(&a.position));

        Ok(roles)
    }

    pub async fn emojis(http: &Arc<Http>, guild_id: u64) -> Result<Vec<EmojiDto>, AppError> {
        let emojis = GuildId::new(guild_id).emojis(http).await?;

        Ok(emojis
            .into_iter()
            .map(|emoji| EmojiDto {
                url: emoji.url(),
                id: emoji.id.to_string(),
                name: emoji.name,
                animated: emoji.animated,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_channel_clears_and_missing_keeps() {
        let param = settings_param(UpdateGuildSettingsDto {
            log_channel_id: Some(String::new()),
            transcript_channel_id: Some("123".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(param.log_channel_id, Some(None));
        assert_eq!(param.transcript_channel_id, Some(Some(123)));
        assert_eq!(param.ticket_category_id, None);
    }

    #[test]
    fn rejects_unknown_language() {
        let result = settings_param(UpdateGuildSettingsDto {
            language: Some("fr".to_string()),
            ..Default::default()
        });

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn warning_must_be_below_close_hours() {
        let result = settings_param(UpdateGuildSettingsDto {
            auto_close_hours: Some(24),
            auto_close_warning_hours: Some(24),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let param = settings_param(UpdateGuildSettingsDto {
            auto_close_hours: Some(24),
            auto_close_warning_hours: Some(2),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(param.auto_close_warning_hours, Some(2));
    }

    #[test]
    fn accepts_vouch_channel_and_texts() {
        let param = settings_param(UpdateGuildSettingsDto {
            vouch_channel_id: Some("555".to_string()),
            vouch_data: Some(crate::model::guild::VouchDataDto {
                response: Some("Thanks {user}!".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(param.vouch_channel_id, Some(Some(555)));
        assert_eq!(
            param.vouch.and_then(|vouch| vouch.response),
            Some("Thanks {user}!".to_string())
        );
    }

    #[test]
    fn rejects_malformed_ids() {
        let result = settings_param(UpdateGuildSettingsDto {
            support_role_ids: Some(vec!["abc".to_string()]),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
