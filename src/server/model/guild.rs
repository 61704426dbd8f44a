//! Per-bot guild configuration.

use serde::{Deserialize, Serialize};

use crate::{
    model::guild::{GuildConfigDto, VouchButtonDto, VouchDataDto},
    server::{
        error::{internal::InternalError, AppError},
        util::parse::{parse_id_list, parse_optional_u64, parse_u64_from_string},
    },
};

/// Number of rating buttons on a vouch prompt.
pub const VOUCH_BUTTONS: usize = 5;

/// Ticket configuration of one guild as seen by one bot.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildConfig {
    pub guild_id: u64,
    pub bot_id: i32,
    pub name: String,
    pub log_channel_id: Option<u64>,
    pub transcript_channel_id: Option<u64>,
    pub ticket_category_id: Option<u64>,
    pub support_role_ids: Vec<u64>,
    pub admin_role_ids: Vec<u64>,
    pub ticket_counter: i32,
    /// Locale code for bot-facing strings (`en`, `id`).
    pub language: String,
    pub timezone: String,
    /// Inactivity hours before a ticket is closed; zero disables auto-close.
    pub auto_close_hours: i32,
    /// Hours before the close at which a warning is posted; zero disables it.
    pub auto_close_warning_hours: i32,
    /// Channel receiving vouch results.
    pub vouch_channel_id: Option<u64>,
    pub vouch: VouchSettings,
}

impl GuildConfig {
    pub fn from_entity(entity: entity::guild::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.id)?,
            bot_id: entity.bot_id,
            name: entity.name,
            log_channel_id: parse_optional_u64(entity.log_channel_id)?,
            transcript_channel_id: parse_optional_u64(entity.transcript_channel_id)?,
            ticket_category_id: parse_optional_u64(entity.ticket_category_id)?,
            support_role_ids: parse_id_list(&entity.support_role_ids)?,
            admin_role_ids: parse_id_list(&entity.admin_role_ids)?,
            ticket_counter: entity.ticket_counter,
            language: entity.language,
            timezone: entity.timezone,
            auto_close_hours: entity.auto_close_hours,
            auto_close_warning_hours: entity.auto_close_warning_hours,
            vouch_channel_id: parse_optional_u64(entity.vouch_channel_id)?,
            vouch: VouchSettings::from_json(entity.vouch_data.as_deref())?,
        })
    }

    pub fn into_dto(self) -> GuildConfigDto {
        let ids = |ids: Vec<u64>| ids.into_iter().map(|id| id.to_string()).collect();
        GuildConfigDto {
            id: self.guild_id.to_string(),
            bot_id: self.bot_id,
            name: self.name,
            log_channel_id: self.log_channel_id.map(|id| id.to_string()),
            transcript_channel_id: self.transcript_channel_id.map(|id| id.to_string()),
            ticket_category_id: self.ticket_category_id.map(|id| id.to_string()),
            support_role_ids: ids(self.support_role_ids),
            admin_role_ids: ids(self.admin_role_ids),
            ticket_counter: self.ticket_counter,
            language: self.language,
            timezone: self.timezone,
            auto_close_hours: self.auto_close_hours,
            auto_close_warning_hours: self.auto_close_warning_hours,
            vouch_channel_id: self.vouch_channel_id.map(|id| id.to_string()),
            vouch_data: self.vouch.into_dto(),
        }
    }
}

/// Whitelisted guild settings update.
///
/// Outer `None` leaves a field unchanged; `Some(None)` clears an optional channel.
#[derive(Debug, Clone, Default)]
pub struct UpdateGuildSettingsParam {
    pub log_channel_id: Option<Option<u64>>,
    pub transcript_channel_id: Option<Option<u64>>,
    pub ticket_category_id: Option<Option<u64>>,
    pub support_role_ids: Option<Vec<u64>>,
    pub admin_role_ids: Option<Vec<u64>>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub auto_close_hours: Option<i32>,
    pub auto_close_warning_hours: Option<i32>,
    pub vouch_channel_id: Option<Option<u64>>,
    pub vouch: Option<VouchSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VouchButton {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// Customised texts of the vouch prompt and log, stored as JSON on the guild row.
///
/// `None` fields fall back to the built-in texts. Custom buttons only apply
/// when all five are given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VouchSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<VouchButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl VouchSettings {
    /// Reads the stored JSON; a missing or blank column means defaults.
    pub fn from_json(value: Option<&str>) -> Result<Self, AppError> {
        match value {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(json).map_err(|_| {
                InternalError::UnknownStoredValue {
                    kind: "vouch settings",
                    value: json.chars().take(64).collect(),
                }
                .into()
            }),
            _ => Ok(Self::default()),
        }
    }

    /// JSON for storage, or `None` when every text is the default.
    pub fn to_json(&self) -> Result<Option<String>, AppError> {
        if *self == Self::default() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(self)?))
    }

    /// Custom rating buttons, when exactly five are configured.
    pub fn custom_buttons(&self) -> Option<&[VouchButton]> {
        (self.buttons.len() == VOUCH_BUTTONS).then_some(self.buttons.as_slice())
    }

    /// Validates a dashboard update. Blank texts reset to the default.
    ///
    /// # Returns
    /// - `Ok(VouchSettings)` - Settings to store
    /// - `Err(AppError::BadRequest)` - Buttons given but not exactly five
    pub fn from_dto(dto: VouchDataDto) -> Result<Self, AppError> {
        if !dto.buttons.is_empty() && dto.buttons.len() != VOUCH_BUTTONS {
            return Err(AppError::BadRequest(format!(
                "Vouch prompts need exactly {} buttons",
                VOUCH_BUTTONS
            )));
        }

        Ok(Self {
            title: non_blank(dto.title),
            description: non_blank(dto.description),
            buttons: dto
                .buttons
                .into_iter()
                .map(|button| VouchButton {
                    label: non_blank(button.label),
                    emoji: non_blank(button.emoji),
                })
                .collect(),
            log_title: non_blank(dto.log_title),
            log_description: non_blank(dto.log_description),
            response: non_blank(dto.response),
        })
    }

    pub fn into_dto(self) -> VouchDataDto {
        VouchDataDto {
            title: self.title,
            description: self.description,
            buttons: self
                .buttons
                .into_iter()
                .map(|button| VouchButtonDto {
                    label: button.label,
                    emoji: button.emoji,
                })
                .collect(),
            log_title: self.log_title,
            log_description: self.log_description,
            response: self.response,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_not_stored() {
        assert_eq!(VouchSettings::default().to_json().unwrap(), None);
        assert_eq!(VouchSettings::from_json(None).unwrap(), VouchSettings::default());
        assert_eq!(VouchSettings::from_json(Some("")).unwrap(), VouchSettings::default());
    }

    #[test]
    fn reads_settings_saved_with_partial_keys() {
        let settings =
            VouchSettings::from_json(Some(r#"{"title":"Rate us","log_title":"New vouch"}"#))
                .unwrap();

        assert_eq!(settings.title.as_deref(), Some("Rate us"));
        assert_eq!(settings.log_title.as_deref(), Some("New vouch"));
        assert!(settings.custom_buttons().is_none());
    }

    #[test]
    fn rejects_wrong_button_count() {
        let dto = VouchDataDto {
            buttons: vec![VouchButtonDto::default(); 3],
            ..Default::default()
        };
        assert!(matches!(
            VouchSettings::from_dto(dto),
            Err(AppError::BadRequest(_))
        ));

        let dto = VouchDataDto {
            title: Some("  ".to_string()),
            buttons: vec![VouchButtonDto::default(); VOUCH_BUTTONS],
            ..Default::default()
        };
        let settings = VouchSettings::from_dto(dto).unwrap();
        assert_eq!(settings.title, None);
        assert_eq!(settings.custom_buttons().map(<[_]>::len), Some(VOUCH_BUTTONS));
    }
}
