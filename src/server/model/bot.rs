//! Tenant bot domain models.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::{
    model::bot::{BotDto, UpdatePresenceDto},
    server::{
        error::{internal::InternalError, AppError},
        util::parse::parse_optional_u64,
    },
};

/// Stored lifecycle status of a tenant bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStatus {
    Stopped,
    Running,
    Error,
}

impl BotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Error => "error",
        }
    }
}

impl FromStr for BotStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "stopped" => Ok(Self::Stopped),
            "running" => Ok(Self::Running),
            "error" => Ok(Self::Error),
            other => Err(InternalError::UnknownStoredValue {
                kind: "bot status",
                value: other.to_string(),
            }),
        }
    }
}

/// Kind of activity shown in the bot's presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Playing,
    Streaming,
    Listening,
    Watching,
    Competing,
}

impl ActivityKind {
    /// Parses dashboard input; unknown kinds fall back to `Playing`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "streaming" => Self::Streaming,
            "listening" => Self::Listening,
            "watching" => Self::Watching,
            "competing" => Self::Competing,
            _ => Self::Playing,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Playing => "Playing",
            Self::Streaming => "Streaming",
            Self::Listening => "Listening",
            Self::Watching => "Watching",
            Self::Competing => "Competing",
        };
        f.write_str(name)
    }
}

/// Online status shown in the bot's presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Online,
    Idle,
    DoNotDisturb,
    Invisible,
}

impl PresenceStatus {
    pub fn parse_lenient(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "idle" => Self::Idle,
            "dnd" => Self::DoNotDisturb,
            "invisible" => Self::Invisible,
            _ => Self::Online,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::DoNotDisturb => "dnd",
            Self::Invisible => "invisible",
        }
    }
}

/// Configured presence for a bot.
#[derive(Debug, Clone, PartialEq)]
pub struct BotPresence {
    pub activity: ActivityKind,
    pub activity_name: String,
    pub status: PresenceStatus,
}

impl Default for BotPresence {
    fn default() -> Self {
        Self {
            activity: ActivityKind::Playing,
            activity_name: "KingBot".to_string(),
            status: PresenceStatus::Online,
        }
    }
}

impl From<UpdatePresenceDto> for BotPresence {
    fn from(dto: UpdatePresenceDto) -> Self {
        Self {
            activity: ActivityKind::parse_lenient(&dto.activity_type),
            activity_name: dto.activity_name.trim().to_string(),
            status: PresenceStatus::parse_lenient(&dto.status),
        }
    }
}

/// Tenant bot owned by a dashboard user.
#[derive(Debug, Clone, PartialEq)]
pub struct Bot {
    pub id: i32,
    pub user_id: i32,
    /// Token as stored (encrypted, or legacy plaintext).
    pub stored_token: String,
    pub client_id: Option<u64>,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub status: BotStatus,
    pub error_message: Option<String>,
    pub guilds_count: i32,
    pub presence: BotPresence,
    pub created_at: DateTime<Utc>,
}

impl Bot {
    pub fn from_entity(entity: entity::bot::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            stored_token: entity.bot_token,
            client_id: parse_optional_u64(entity.client_id)?,
            name: entity.bot_name,
            avatar: entity.bot_avatar,
            status: entity.status.parse()?,
            error_message: entity.error_message,
            guilds_count: entity.guilds_count,
            presence: BotPresence {
                activity: ActivityKind::parse_lenient(&entity.activity_type),
                activity_name: entity.activity_name,
                status: PresenceStatus::parse_lenient(&entity.status_presence),
            },
            created_at: entity.created_at,
        })
    }

    /// Converts to a DTO. `connected` reflects the live registry, not the stored status.
    pub fn into_dto(self, connected: bool) -> BotDto {
        BotDto {
            id: self.id,
            client_id: self.client_id.map(|id| id.to_string()),
            name: self.name,
            avatar: self.avatar,
            status: self.status.as_str().to_string(),
            error_message: self.error_message,
            guilds_count: self.guilds_count,
            activity_type: self.presence.activity.to_string(),
            activity_name: self.presence.activity_name,
            status_presence: self.presence.status.as_str().to_string(),
            connected,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBotParam {
    pub user_id: i32,
    pub encrypted_token: String,
    pub client_id: u64,
    pub name: String,
    pub avatar: Option<String>,
}

/// Identity details refreshed each time the bot logs in.
#[derive(Debug, Clone)]
pub struct UpdateBotInfoParam {
    pub client_id: u64,
    pub name: String,
    pub avatar: Option<String>,
    pub guilds_count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_activity_falls_back_to_playing() {
        assert_eq!(ActivityKind::parse_lenient("dancing"), ActivityKind::Playing);
        assert_eq!(ActivityKind::parse_lenient("WATCHING"), ActivityKind::Watching);
    }

    #[test]
    fn stored_status_round_trips_through_str() {
        for status in [BotStatus::Stopped, BotStatus::Running, BotStatus::Error] {
            assert_eq!(status.as_str().parse::<BotStatus>().unwrap(), status);
        }
        assert!("paused".parse::<BotStatus>().is_err());
    }
}
