use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct TicketDto {
    pub id: i32,
    pub guild_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub panel_id: Option<i32>,
    pub option_id: Option<i32>,
    pub ticket_number: i32,
    pub status: String,
    pub claimed_by: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub closed_by: Option<String>,
    pub close_reason: Option<String>,
    pub transcript_url: Option<String>,
    pub last_activity: DateTime<Utc>,
    pub response_time_seconds: Option<i64>,
}

#[derive(Serialize)]
pub struct TicketResponseDto {
    pub question: String,
    pub response: String,
}

#[derive(Serialize)]
pub struct TicketMessageDto {
    pub id: String,
    pub content: String,
    pub author_id: String,
    pub author_username: String,
    pub author_avatar: Option<String>,
    pub author_bot: bool,
    pub timestamp: i64,
    pub attachments: Vec<String>,
}

#[derive(Serialize)]
pub struct TicketDetailDto {
    pub ticket: TicketDto,
    pub responses: Vec<TicketResponseDto>,
    pub participants: Vec<String>,
    pub messages: Vec<TicketMessageDto>,
    /// Whether `messages` came from the saved snapshot rather than the live channel.
    pub archived: bool,
}

#[derive(Deserialize)]
pub struct TicketListQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub status: Option<String>,
}

fn default_limit() -> u64 {
    20
}

#[derive(Deserialize, Default)]
pub struct CloseTicketDto {
    pub reason: Option<String>,
}
