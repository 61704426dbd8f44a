use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Default)]
pub struct PanelEmbedDto {
    pub message_content: Option<String>,
    pub title: Option<String>,
    pub title_url: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
    pub footer_icon: Option<String>,
    pub author_name: Option<String>,
    pub author_icon: Option<String>,
    pub author_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct PanelQuestionDto {
    #[serde(default)]
    pub id: Option<i32>,
    pub question: String,
    pub placeholder: Option<String>,
    #[serde(default = "default_true")]
    pub required: bool,
    pub min_length: Option<i32>,
    pub max_length: Option<i32>,
    pub style: Option<String>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct PanelOptionDto {
    #[serde(default)]
    pub id: Option<i32>,
    pub label: Option<String>,
    pub emoji: Option<String>,
    pub style: Option<String>,
    pub category_name: Option<String>,
    pub ticket_prefix: Option<String>,
    #[serde(default)]
    pub support_role_ids: Vec<String>,
    #[serde(default)]
    pub required_roles: Vec<String>,
    pub welcome_message: Option<String>,
    pub ticket_message: Option<String>,
    pub staff_thread_message: Option<String>,
    #[serde(default)]
    pub steam_required: bool,
    #[serde(default = "default_true")]
    pub pings_enabled: bool,
    #[serde(default)]
    pub is_disabled: bool,
    pub ticket_style: Option<String>,
    pub ticket_category_id: Option<String>,
    #[serde(default)]
    pub questions: Vec<PanelQuestionDto>,
}

#[derive(Deserialize)]
pub struct SavePanelDto {
    pub channel_id: String,
    pub name: String,
    #[serde(default)]
    pub embed: PanelEmbedDto,
    #[serde(default)]
    pub options: Vec<PanelOptionDto>,
}

#[derive(Serialize)]
pub struct PanelDto {
    pub id: i32,
    pub bot_id: i32,
    pub guild_id: String,
    pub channel_id: String,
    pub message_id: Option<String>,
    pub name: String,
    pub embed: PanelEmbedDto,
    pub options: Vec<PanelOptionDto>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct MovePanelDto {
    pub channel_id: String,
}

#[derive(Serialize)]
pub struct TemplateDto {
    pub id: i32,
    pub name: String,
    pub panel_name: String,
    pub option_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateFromTemplateDto {
    pub channel_id: String,
    pub name: Option<String>,
}

fn default_true() -> bool {
    true
}
