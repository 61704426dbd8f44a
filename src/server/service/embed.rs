//! Saved embed builder: designs stored per guild and sent on demand.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{
        ChannelId, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateMessage, Timestamp,
    },
    http::Http,
};

use crate::{
    model::embed::SaveEmbedDto,
    server::{
        data::embed::EmbedRepository,
        error::{bot::BotError, AppError},
        model::embed::{
            EmbedContent, SaveEmbedParam, SavedEmbed, DEFAULT_EMBED_COLOR, DEFAULT_EMBED_NAME,
        },
        util::color::parse_hex_color,
    },
};

const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "data:", "vbscript:"];
const ALLOWED_PREFIXES: [&str; 4] = ["http://", "https://", "/", "#"];

/// Makes a user-entered link safe to put in an embed.
///
/// Script and data URLs are rejected. Web and relative links pass unchanged;
/// anything else is assumed to be a host and gets `https://`.
pub fn sanitize_url(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if BLOCKED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }
    if ALLOWED_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
        return Some(trimmed.to_string());
    }

    Some(format!("https://{}", trimmed))
}

fn safe(url: &Option<String>) -> Option<String> {
    url.as_deref().and_then(sanitize_url)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Whether Discord would render anything for the embed part.
fn has_visible_part(body: &EmbedContent) -> bool {
    [
        &body.title,
        &body.description,
        &body.footer_text,
        &body.author_name,
    ]
    .iter()
    .any(|field| field.is_some())
        || safe(&body.image_url).is_some()
        || safe(&body.thumbnail_url).is_some()
}

/// Builds the Discord embed, dropping links that fail [`sanitize_url`].
pub fn build_embed(body: &EmbedContent) -> CreateEmbed {
    let mut embed = CreateEmbed::new().color(parse_hex_color(Some(&body.color), 0));

    if let Some(title) = &body.title {
        embed = embed.title(title);
    }
    if let Some(description) = &body.description {
        embed = embed.description(description);
    }
    if let Some(url) = safe(&body.title_url) {
        embed = embed.url(url);
    }
    if let Some(url) = safe(&body.image_url) {
        embed = embed.image(url);
    }
    if let Some(url) = safe(&body.thumbnail_url) {
        embed = embed.thumbnail(url);
    }
    if let Some(text) = &body.footer_text {
        let mut footer = CreateEmbedFooter::new(text);
        if let Some(icon) = safe(&body.footer_icon_url) {
            footer = footer.icon_url(icon);
        }
        embed = embed.footer(footer);
    }
    if let Some(name) = &body.author_name {
        let mut author = CreateEmbedAuthor::new(name);
        if let Some(icon) = safe(&body.author_icon_url) {
            author = author.icon_url(icon);
        }
        if let Some(url) = safe(&body.author_url) {
            author = author.url(url);
        }
        embed = embed.author(author);
    }
    if body.timestamp {
        embed = embed.timestamp(Timestamp::now());
    }

    embed
}

pub struct EmbedService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> EmbedService<'a> {
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    fn param(&self, guild_id: u64, dto: SaveEmbedDto) -> Result<SaveEmbedParam, AppError> {
        let channel_id = match non_blank(dto.channel_id) {
            Some(id) => Some(
                id.trim()
                    .parse::<u64>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid channel id '{}'", id)))?,
            ),
            None => None,
        };

        Ok(SaveEmbedParam {
            bot_id: self.bot_id,
            guild_id,
            name: non_blank(dto.name)
                .map(|name| name.trim().to_string())
                .unwrap_or_else(|| DEFAULT_EMBED_NAME.to_string()),
            channel_id,
            body: EmbedContent {
                content: non_blank(dto.content),
                title: non_blank(dto.title),
                description: non_blank(dto.description),
                color: non_blank(dto.color)
                    .map(|color| color.trim().to_string())
                    .unwrap_or_else(|| DEFAULT_EMBED_COLOR.to_string()),
                image_url: non_blank(dto.image_url),
                thumbnail_url: non_blank(dto.thumbnail_url),
                footer_text: non_blank(dto.footer_text),
                footer_icon_url: non_blank(dto.footer_icon_url),
                author_name: non_blank(dto.author_name),
                author_icon_url: non_blank(dto.author_icon_url),
                author_url: non_blank(dto.author_url),
                title_url: non_blank(dto.title_url),
                timestamp: dto.timestamp,
            },
        })
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<SavedEmbed>, AppError> {
        EmbedRepository::new(self.db)
            .get_by_guild(self.bot_id, guild_id)
            .await
    }

    pub async fn get(&self, guild_id: u64, embed_id: i32) -> Result<SavedEmbed, AppError> {
        EmbedRepository::new(self.db)
            .find(self.bot_id, guild_id, embed_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Embed not found".to_string()))
    }

    pub async fn create(&self, guild_id: u64, dto: SaveEmbedDto) -> Result<SavedEmbed, AppError> {
        let param = self.param(guild_id, dto)?;
        EmbedRepository::new(self.db).create(param).await
    }

    pub async fn update(
        &self,
        guild_id: u64,
        embed_id: i32,
        dto: SaveEmbedDto,
    ) -> Result<SavedEmbed, AppError> {
        let param = self.param(guild_id, dto)?;

        EmbedRepository::new(self.db)
            .update(embed_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Embed not found".to_string()))
    }

    /// Deletes an embed and returns it.
    pub async fn delete(&self, guild_id: u64, embed_id: i32) -> Result<SavedEmbed, AppError> {
        let embed = self.get(guild_id, embed_id).await?;
        EmbedRepository::new(self.db)
            .delete(self.bot_id, guild_id, embed_id)
            .await?;

        Ok(embed)
    }

    /// Sends an embed to its stored channel through the bot.
    ///
    /// # Arguments
    /// - `http` - Client of the running bot, `None` when it is stopped
    ///
    /// # Returns
    /// - `Ok(SavedEmbed)` - Embed sent
    /// - `Err(AppError::NotFound)` - Unknown embed
    /// - `Err(AppError::BadRequest)` - No channel selected or nothing to show
    /// - `Err(BotError::NotRunning)` - Bot is stopped
    /// - `Err(AppError::DiscordErr)` - Channel missing or not writable
    pub async fn send(
        &self,
        http: Option<Arc<Http>>,
        guild_id: u64,
        embed_id: i32,
    ) -> Result<SavedEmbed, AppError> {
        let embed = self.get(guild_id, embed_id).await?;
        let Some(channel_id) = embed.channel_id else {
            return Err(AppError::BadRequest(
                "No channel selected for this embed".to_string(),
            ));
        };
        if !has_visible_part(&embed.body) {
            return Err(AppError::BadRequest("Embed has nothing to show".to_string()));
        }
        let http = http.ok_or(BotError::NotRunning)?;

        let mut message = CreateMessage::new().embed(build_embed(&embed.body));
        if let Some(content) = &embed.body.content {
            message = message.content(content);
        }
        ChannelId::new(channel_id)
            .send_message(&http, message)
            .await?;

        tracing::info!(
            "Sent embed {} to channel {} (bot {})",
            embed.id,
            channel_id,
            self.bot_id
        );

        Ok(embed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn body() -> EmbedContent {
        EmbedContent {
            title: Some("Rules".to_string()),
            color: "#ff0000".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn blocks_script_and_data_urls() {
        assert_eq!(sanitize_url("javascript:alert(1)"), None);
        assert_eq!(sanitize_url("  JavaScript:alert(1)"), None);
        assert_eq!(sanitize_url("data:text/html;base64,AAAA"), None);
        assert_eq!(sanitize_url("vbscript:msgbox"), None);
        assert_eq!(sanitize_url("   "), None);
    }

    #[test]
    fn keeps_web_links_and_adds_scheme_to_hosts() {
        assert_eq!(
            sanitize_url("https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(sanitize_url("/rules").as_deref(), Some("/rules"));
        assert_eq!(
            sanitize_url("example.com/a.png").as_deref(),
            Some("https://example.com/a.png")
        );
    }

    #[test]
    fn built_embed_drops_unsafe_links() {
        let body = EmbedContent {
            image_url: Some("javascript:alert(1)".to_string()),
            thumbnail_url: Some("example.com/t.png".to_string()),
            author_name: Some("Staff".to_string()),
            author_url: Some("data:text/html,hi".to_string()),
            ..body()
        };

        let json = serde_json::to_value(build_embed(&body)).unwrap();

        assert_eq!(json["title"], "Rules");
        assert_eq!(json["color"], 0xFF0000);
        assert!(json.get("image").is_none());
        assert_eq!(json["thumbnail"]["url"], "https://example.com/t.png");
        assert_eq!(json["author"]["name"], "Staff");
        assert!(json["author"].get("url").is_none());
    }

    #[test]
    fn embed_with_only_unsafe_image_is_empty() {
        let unsafe_image = EmbedContent {
            image_url: Some("javascript:alert(1)".to_string()),
            ..Default::default()
        };

        assert!(!has_visible_part(&unsafe_image));
        assert!(has_visible_part(&body()));
    }

    /// Tests saving an embed from a dashboard request with blank fields.
    ///
    /// Expected: default name and color, blank text stored as unset
    #[tokio::test]
    async fn blank_fields_get_defaults() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .with_table(entity::prelude::Embed)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;
        let bot = factory::create_bot(db, user.id).await?;

        let embed = EmbedService::new(db, bot.id)
            .create(
                5,
                SaveEmbedDto {
                    name: Some("  ".to_string()),
                    title: Some("".to_string()),
                    description: Some("Welcome".to_string()),
                    channel_id: Some(" 42 ".to_string()),
                    ..Default::default()
                },
            )
            .await?;

        assert_eq!(embed.name, DEFAULT_EMBED_NAME);
        assert_eq!(embed.body.color, DEFAULT_EMBED_COLOR);
        assert_eq!(embed.body.title, None);
        assert_eq!(embed.body.description.as_deref(), Some("Welcome"));
        assert_eq!(embed.channel_id, Some(42));

        Ok(())
    }

    /// Tests sending embeds when they cannot go out.
    ///
    /// Expected: NotFound for an unknown id, BadRequest without a channel,
    /// NotRunning when the bot is stopped
    #[tokio::test]
    async fn send_checks_embed_channel_and_bot() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .with_table(entity::prelude::Embed)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;
        let bot = factory::create_bot(db, user.id).await?;
        let service = EmbedService::new(db, bot.id);

        let no_channel = service
            .create(
                5,
                SaveEmbedDto {
                    title: Some("Rules".to_string()),
                    ..Default::default()
                },
            )
            .await?;
        let ready = service
            .create(
                5,
                SaveEmbedDto {
                    title: Some("Rules".to_string()),
                    channel_id: Some("42".to_string()),
                    ..Default::default()
                },
            )
            .await?;

        assert!(matches!(
            service.send(None, 5, ready.id + 100).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.send(None, 5, no_channel.id).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            service.send(None, 5, ready.id).await,
            Err(AppError::BotErr(BotError::NotRunning))
        ));

        Ok(())
    }

    #[test]
    fn rejects_malformed_channel_id() {
        let db = DatabaseConnection::default();
        let result = EmbedService::new(&db, 1).param(
            5,
            SaveEmbedDto {
                channel_id: Some("general".to_string()),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
