//! Domain models for custom commands, sticky messages, invite tracking, welcome
//! settings and Steam links.

use chrono::{DateTime, Utc};

use crate::{
    model::community::{
        CustomCommandDto, InviteJoinDto, StickyMessageDto, WelcomeSettingsDto,
    },
    server::{
        error::AppError,
        util::parse::{parse_optional_u64, parse_u64_from_string},
    },
};

/// Guild-scoped text trigger answered by the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomCommand {
    pub id: i32,
    pub bot_id: i32,
    pub guild_id: u64,
    /// Lowercased trigger text, matched against whole messages.
    pub trigger: String,
    pub response: String,
    pub embed_title: Option<String>,
    pub embed_description: Option<String>,
    pub embed_color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CustomCommand {
    pub fn from_entity(entity: entity::custom_command::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            bot_id: entity.bot_id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            trigger: entity.trigger,
            response: entity.response,
            embed_title: entity.embed_title,
            embed_description: entity.embed_description,
            embed_color: entity.embed_color,
            created_at: entity.created_at,
        })
    }

    /// Whether the reply is sent as an embed rather than plain text.
    pub fn has_embed(&self) -> bool {
        self.embed_title.is_some() || self.embed_description.is_some()
    }

    pub fn into_dto(self) -> CustomCommandDto {
        CustomCommandDto {
            id: self.id,
            trigger: self.trigger,
            response: self.response,
            embed_title: self.embed_title,
            embed_description: self.embed_description,
            embed_color: self.embed_color,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveCustomCommandParam {
    pub bot_id: i32,
    pub guild_id: u64,
    pub trigger: String,
    pub response: String,
    pub embed_title: Option<String>,
    pub embed_description: Option<String>,
    pub embed_color: Option<String>,
    pub created_by: Option<i32>,
}

/// Message kept at the bottom of a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct StickyMessage {
    pub id: i32,
    pub bot_id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub content: String,
    pub last_message_id: Option<u64>,
}

impl StickyMessage {
    pub fn from_entity(entity: entity::sticky_message::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            bot_id: entity.bot_id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            content: entity.content,
            last_message_id: parse_optional_u64(entity.last_message_id)?,
        })
    }

    pub fn into_dto(self) -> StickyMessageDto {
        StickyMessageDto {
            id: self.id,
            channel_id: self.channel_id.to_string(),
            content: self.content,
            last_message_id: self.last_message_id.map(|id| id.to_string()),
        }
    }
}

/// Recorded member join attributed to an invite.
#[derive(Debug, Clone, PartialEq)]
pub struct InviteJoin {
    pub id: i32,
    pub guild_id: u64,
    pub user_id: u64,
    /// Inviter user id, `vanity` for the vanity URL, or `unknown`.
    pub inviter_id: Option<String>,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InviteJoin {
    pub fn from_entity(entity: entity::invite_join::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            inviter_id: entity.inviter_id,
            code: entity.code,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> InviteJoinDto {
        InviteJoinDto {
            user_id: self.user_id.to_string(),
            inviter_id: self.inviter_id,
            code: self.code,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordInviteJoinParam {
    pub bot_id: i32,
    pub guild_id: u64,
    pub user_id: u64,
    pub inviter_id: Option<String>,
    pub code: Option<String>,
}

/// Welcome, goodbye and auto-role settings of a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct WelcomeSettings {
    pub welcome_enabled: bool,
    pub welcome_channel_id: Option<u64>,
    pub welcome_message: String,
    pub goodbye_enabled: bool,
    pub goodbye_channel_id: Option<u64>,
    pub goodbye_message: String,
    pub autorole_enabled: bool,
    pub autorole_id: Option<u64>,
    pub card_enabled: bool,
    pub card_background: Option<String>,
    pub card_font: String,
    pub card_text_color: String,
    pub card_bg_color: String,
    pub card_overlay_opacity: f64,
}

impl Default for WelcomeSettings {
    fn default() -> Self {
        Self {
            welcome_enabled: false,
            welcome_channel_id: None,
            welcome_message: "Welcome {USER} to {SERVER}!".to_string(),
            goodbye_enabled: false,
            goodbye_channel_id: None,
            goodbye_message: "{USER} has left the server.".to_string(),
            autorole_enabled: false,
            autorole_id: None,
            card_enabled: false,
            card_background: None,
            card_font: "Inter".to_string(),
            card_text_color: "#ffffff".to_string(),
            card_bg_color: "#000000".to_string(),
            card_overlay_opacity: 0.5,
        }
    }
}

impl WelcomeSettings {
    pub fn from_entity(entity: entity::welcome_settings::Model) -> Result<Self, AppError> {
        Ok(Self {
            welcome_enabled: entity.welcome_enabled,
            welcome_channel_id: parse_optional_u64(entity.welcome_channel_id)?,
            welcome_message: entity.welcome_message,
            goodbye_enabled: entity.goodbye_enabled,
            goodbye_channel_id: parse_optional_u64(entity.goodbye_channel_id)?,
            goodbye_message: entity.goodbye_message,
            autorole_enabled: entity.autorole_enabled,
            autorole_id: parse_optional_u64(entity.autorole_id)?,
            card_enabled: entity.card_enabled,
            card_background: entity.card_background,
            card_font: entity.card_font,
            card_text_color: entity.card_text_color,
            card_bg_color: entity.card_bg_color,
            card_overlay_opacity: entity.card_overlay_opacity,
        })
    }

    /// Builds settings from dashboard input. Blank channel ids clear the channel.
    pub fn from_dto(dto: WelcomeSettingsDto) -> Result<Self, AppError> {
        let id = |value: Option<String>| -> Result<Option<u64>, AppError> {
            match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                Some(v) => v
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| AppError::BadRequest(format!("Invalid Discord id '{}'", v))),
                None => Ok(None),
            }
        };

        Ok(Self {
            welcome_enabled: dto.welcome_enabled,
            welcome_channel_id: id(dto.welcome_channel_id)?,
            welcome_message: dto.welcome_message,
            goodbye_enabled: dto.goodbye_enabled,
            goodbye_channel_id: id(dto.goodbye_channel_id)?,
            goodbye_message: dto.goodbye_message,
            autorole_enabled: dto.autorole_enabled,
            autorole_id: id(dto.autorole_id)?,
            card_enabled: dto.card_enabled,
            card_background: dto.card_background,
            card_font: dto.card_font,
            card_text_color: dto.card_text_color,
            card_bg_color: dto.card_bg_color,
            card_overlay_opacity: dto.card_overlay_opacity.clamp(0.0, 1.0),
        })
    }

    pub fn into_dto(self) -> WelcomeSettingsDto {
        WelcomeSettingsDto {
            welcome_enabled: self.welcome_enabled,
            welcome_channel_id: self.welcome_channel_id.map(|id| id.to_string()),
            welcome_message: self.welcome_message,
            goodbye_enabled: self.goodbye_enabled,
            goodbye_channel_id: self.goodbye_channel_id.map(|id| id.to_string()),
            goodbye_message: self.goodbye_message,
            autorole_enabled: self.autorole_enabled,
            autorole_id: self.autorole_id.map(|id| id.to_string()),
            card_enabled: self.card_enabled,
            card_background: self.card_background,
            card_font: self.card_font,
            card_text_color: self.card_text_color,
            card_bg_color: self.card_bg_color,
            card_overlay_opacity: self.card_overlay_opacity,
        }
    }
}

/// Discord user linked to a Steam account.
#[derive(Debug, Clone, PartialEq)]
pub struct SteamLink {
    pub user_id: u64,
    pub steam_id: String,
    pub steam_name: Option<String>,
    pub linked_at: DateTime<Utc>,
}

impl SteamLink {
    pub fn from_entity(entity: entity::steam_link::Model) -> Result<Self, AppError> {
        Ok(Self {
            user_id: parse_u64_from_string(entity.user_id)?,
            steam_id: entity.steam_id,
            steam_name: entity.steam_name,
            linked_at: entity.linked_at,
        })
    }
}
