//! Saved embed designs.

use chrono::{DateTime, Utc};

use crate::{
    model::embed::EmbedDto,
    server::{
        error::AppError,
        util::parse::{parse_optional_u64, parse_u64_from_string},
    },
};

pub const DEFAULT_EMBED_NAME: &str = "New Embed";
pub const DEFAULT_EMBED_COLOR: &str = "#000000";

/// Embed text and links as designed in the dashboard.
///
/// URLs are stored as entered; they are checked when the embed is sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedContent {
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
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedEmbed {
    pub id: i32,
    pub bot_id: i32,
    pub guild_id: u64,
    pub name: String,
    /// Channel the embed is sent to.
    pub channel_id: Option<u64>,
    pub body: EmbedContent,
    pub created_at: DateTime<Utc>,
}

impl SavedEmbed {
    pub fn from_entity(entity: entity::embed::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            bot_id: entity.bot_id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            name: entity.name,
            channel_id: parse_optional_u64(entity.channel_id)?,
            body: EmbedContent {
                content: entity.content,
                title: entity.title,
                description: entity.description,
                color: entity.color,
                image_url: entity.image_url,
                thumbnail_url: entity.thumbnail_url,
                footer_text: entity.footer_text,
                footer_icon_url: entity.footer_icon_url,
                author_name: entity.author_name,
                author_icon_url: entity.author_icon_url,
                author_url: entity.author_url,
                title_url: entity.title_url,
                timestamp: entity.timestamp,
            },
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> EmbedDto {
        let body = self.body;
        EmbedDto {
            id: self.id,
            name: self.name,
            channel_id: self.channel_id.map(|id| id.to_string()),
            content: body.content,
            title: body.title,
            description: body.description,
            color: body.color,
            image_url: body.image_url,
            thumbnail_url: body.thumbnail_url,
            footer_text: body.footer_text,
            footer_icon_url: body.footer_icon_url,
            author_name: body.author_name,
            author_icon_url: body.author_icon_url,
            author_url: body.author_url,
            title_url: body.title_url,
            timestamp: body.timestamp,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveEmbedParam {
    pub bot_id: i32,
    pub guild_id: u64,
    pub name: String,
    pub channel_id: Option<u64>,
    pub body: EmbedContent,
}
