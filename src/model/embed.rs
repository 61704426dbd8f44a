//! DTOs for saved embeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct EmbedDto {
    pub id: i32,
    pub name: String,
    pub channel_id: Option<String>,
    pub content: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: String,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub footer_text: Option<String>,
    pub footer_icon_url: Option<String>,
    pub author_name: Option<String>,
    pub author_icon_url: Option<String>,
    pub author_url: Option<String>,
    pub title_url: Option<String>,
    pub timestamp: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of embed create and update requests. Blank fields are stored as unset.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SaveEmbedDto {
    pub name: Option<String>,
    pub channel_id: Option<String>,
    pub content: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub footer_text: Option<String>,
    pub footer_icon_url: Option<String>,
    pub author_name: Option<String>,
    pub author_icon_url: Option<String>,
    pub author_url: Option<String>,
    pub title_url: Option<String>,
    pub timestamp: bool,
}
