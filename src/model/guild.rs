use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct GuildConfigDto {
    pub id: String,
    pub bot_id: i32,
    pub name: String,
    pub log_channel_id: Option<String>,
    pub transcript_channel_id: Option<String>,
    pub ticket_category_id: Option<String>,
    pub support_role_ids: Vec<String>,
    pub admin_role_ids: Vec<String>,
    pub ticket_counter: i32,
    pub language: String,
    pub timezone: String,
    pub auto_close_hours: i32,
    pub auto_close_warning_hours: i32,
    pub vouch_channel_id: Option<String>,
    pub vouch_data: VouchDataDto,
}

#[derive(Serialize, Deserialize, Default, Clone)]
pub struct VouchButtonDto {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Texts of the vouch prompt and log. Empty fields use the built-in defaults.
#[derive(Serialize, Deserialize, Default, Clone)]
pub struct VouchDataDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Either empty or exactly five rating buttons.
    #[serde(default)]
    pub buttons: Vec<VouchButtonDto>,
    #[serde(default)]
    pub log_title: Option<String>,
    #[serde(default)]
    pub log_description: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

/// Guild settings update.
///
/// Omitted fields are left unchanged; an empty string clears an optional channel.
#[derive(Deserialize, Default)]
pub struct UpdateGuildSettingsDto {
    pub log_channel_id: Option<String>,
    pub transcript_channel_id: Option<String>,
    pub ticket_category_id: Option<String>,
    pub support_role_ids: Option<Vec<String>>,
    pub admin_role_ids: Option<Vec<String>>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub auto_close_hours: Option<i32>,
    pub auto_close_warning_hours: Option<i32>,
    pub vouch_channel_id: Option<String>,
    pub vouch_data: Option<VouchDataDto>,
}

#[derive(Serialize)]
pub struct GuildInfoDto {
    pub id: String,
    pub name: String,
    pub icon_url: Option<String>,
    pub member_count: Option<u64>,
    pub owner_id: String,
}

#[derive(Serialize)]
pub struct ChannelDto {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub parent_id: Option<String>,
    pub position: u16,
}

#[derive(Serialize)]
pub struct RoleDto {
    pub id: String,
    pub name: String,
    pub color: u32,
    pub position: u16,
    pub managed: bool,
}

#[derive(Serialize)]
pub struct EmojiDto {
    pub id: String,
    pub name: String,
    pub animated: bool,
    pub url: String,
}

#[derive(Serialize)]
pub struct DailyActivityDto {
    /// `YYYY-MM-DD`
    pub date: String,
    pub opened: u64,
    pub closed: u64,
}

#[derive(Serialize)]
pub struct GuildStatsDto {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub closed_tickets: u64,
    pub claimed_tickets: u64,
    pub average_response_seconds: Option<i64>,
    pub activity: Vec<DailyActivityDto>,
}
