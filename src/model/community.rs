//! DTOs for custom commands, welcome messages, sticky messages and invites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct CustomCommandDto {
    pub id: i32,
    pub trigger: String,
    pub response: String,
    pub embed_title: Option<String>,
    pub embed_description: Option<String>,
    pub embed_color: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct SaveCustomCommandDto {
    pub trigger: String,
    pub response: String,
    pub embed_title: Option<String>,
    pub embed_description: Option<String>,
    pub embed_color: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct WelcomeSettingsDto {
    pub welcome_enabled: bool,
    pub welcome_channel_id: Option<String>,
    pub welcome_message: String,
    pub goodbye_enabled: bool,
    pub goodbye_channel_id: Option<String>,
    pub goodbye_message: String,
    pub autorole_enabled: bool,
    pub autorole_id: Option<String>,
    pub card_enabled: bool,
    pub card_background: Option<String>,
    pub card_font: String,
    pub card_text_color: String,
    pub card_bg_color: String,
    pub card_overlay_opacity: f64,
}

#[derive(Serialize)]
pub struct StickyMessageDto {
    pub id: i32,
    pub channel_id: String,
    pub content: String,
    pub last_message_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SaveStickyMessageDto {
    pub channel_id: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct InviteLeaderboardEntryDto {
    pub inviter_id: String,
    pub uses: i64,
}

#[derive(Serialize)]
pub struct InviteJoinDto {
    pub user_id: String,
    pub inviter_id: Option<String>,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
}
