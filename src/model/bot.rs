use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Clone)]
pub struct BotDto {
    pub id: i32,
    pub client_id: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub status: String,
    pub error_message: Option<String>,
    pub guilds_count: i32,
    pub activity_type: String,
    pub activity_name: String,
    pub status_presence: String,
    /// Whether a gateway connection is currently registered for the bot.
    pub connected: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct AddBotDto {
    pub token: String,
}

#[derive(Deserialize)]
pub struct UpdatePresenceDto {
    pub activity_type: String,
    pub activity_name: String,
    pub status: String,
}
