//! `/vouch` rating prompts and the `vouch_{n}` buttons that answer them.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{
        ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
        CreateMessage, ReactionType, Timestamp, User,
    },
    http::Http,
};

use crate::server::{
    data::guild::GuildRepository,
    error::AppError,
    model::guild::{VouchSettings, VOUCH_BUTTONS},
    util::placeholder::render,
};

pub const VOUCH_BUTTON_PREFIX: &str = "vouch_";

const GOLD: u32 = 0xFFD700;
const DEFAULT_EMOJI: &str = "⭐";
const DEFAULT_ICON: &str = "https://cdn.discordapp.com/embed/avatars/0.png";
const DEFAULT_TITLE: &str = "⭐ BERI VOUCH KE SERVER KAMI ⭐";
const DEFAULT_DESCRIPTION: &str = "Halo {user}, terima kasih telah menggunakan layanan kami!\n\n\
**Mohon berikan penilaian Anda dengan menekan tombol angka di bawah ini:**\n\n\
1️⃣ : Sangat Buruk\n2️⃣ : Buruk\n3️⃣ : Cukup\n4️⃣ : Baik\n5️⃣ : Sangat Baik";
const PROMPT_FOOTER: &str = "Terima kasih atas kepercayaan Anda!";
const DEFAULT_LOG_TITLE: &str = "⭐ USER MEMBERIKAN VOUCH";
const DEFAULT_LOG_DESCRIPTION: &str = "{user} memberikan rating {rating} Bintang!";
const LOG_FOOTER: &str = "Vouch System";
const DEFAULT_RESPONSE: &str = "{user}, Terimakasih sudah memberikan vouch! 🙏";

const BUTTON_STYLES: [ButtonStyle; VOUCH_BUTTONS] = [
    ButtonStyle::Secondary,
    ButtonStyle::Secondary,
    ButtonStyle::Primary,
    ButtonStyle::Primary,
    ButtonStyle::Success,
];

/// Reads the star rating from a `vouch_{n}` button id.
pub fn parse_rating(custom_id: &str) -> Option<u8> {
    custom_id
        .strip_prefix(VOUCH_BUTTON_PREFIX)?
        .parse::<u8>()
        .ok()
        .filter(|rating| (1..=VOUCH_BUTTONS as u8).contains(rating))
}

/// Label and emoji of the rating button `n` (1-based).
fn button_face(settings: &VouchSettings, n: usize) -> (String, String) {
    let custom = settings.custom_buttons().and_then(|buttons| buttons.get(n - 1));

    let label = custom
        .and_then(|button| button.label.clone())
        .unwrap_or_else(|| n.to_string());
    let emoji = custom
        .and_then(|button| button.emoji.clone())
        .unwrap_or_else(|| DEFAULT_EMOJI.to_string());

    (label, emoji)
}

fn rating_buttons(settings: &VouchSettings) -> CreateActionRow {
    let buttons = (1..=VOUCH_BUTTONS)
        .map(|n| {
            let (label, emoji) = button_face(settings, n);
            let emoji = ReactionType::try_from(emoji.as_str())
                .unwrap_or_else(|_| ReactionType::Unicode(DEFAULT_EMOJI.to_string()));

            CreateButton::new(format!("{}{}", VOUCH_BUTTON_PREFIX, n))
                .label(label)
                .emoji(emoji)
                .style(BUTTON_STYLES[n - 1])
        })
        .collect();

    CreateActionRow::Buttons(buttons)
}

pub fn prompt_description(settings: &VouchSettings, user_mention: &str, guild_name: &str) -> String {
    render(
        settings.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION),
        &[("user", user_mention), ("guild", guild_name)],
    )
}

pub fn log_description(settings: &VouchSettings, user_mention: &str, rating: u8) -> String {
    render(
        settings
            .log_description
            .as_deref()
            .unwrap_or(DEFAULT_LOG_DESCRIPTION),
        &[("user", user_mention), ("rating", &rating.to_string())],
    )
}

pub fn response_text(settings: &VouchSettings, user_mention: &str, guild_name: &str) -> String {
    render(
        settings.response.as_deref().unwrap_or(DEFAULT_RESPONSE),
        &[("user", user_mention), ("guild", guild_name)],
    )
}

/// Message asking a member to rate the server.
pub struct VouchPrompt {
    pub content: String,
    pub embed: CreateEmbed,
    pub buttons: CreateActionRow,
}

/// Result of pressing a rating button.
#[derive(Debug, PartialEq)]
pub enum VouchOutcome {
    /// Rating posted; carries the public thank-you reply.
    Posted(String),
    /// The guild has no vouch channel.
    NotConfigured,
}

pub struct VouchService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> VouchService<'a> {
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    async fn settings(&self, guild_id: u64) -> Result<(Option<u64>, VouchSettings), AppError> {
        Ok(GuildRepository::new(self.db)
            .find(guild_id, self.bot_id)
            .await?
            .map(|guild| (guild.vouch_channel_id, guild.vouch))
            .unwrap_or_default())
    }

    /// Builds the rating prompt for `user_id` from the guild's vouch texts.
    pub async fn prompt(
        &self,
        guild_id: u64,
        user_id: u64,
        guild_name: &str,
        guild_icon: Option<String>,
    ) -> Result<VouchPrompt, AppError> {
        let (_, settings) = self.settings(guild_id).await?;
        let mention = format!("<@{}>", user_id);

        let embed = CreateEmbed::new()
            .color(GOLD)
            .title(settings.title.as_deref().unwrap_or(DEFAULT_TITLE))
            .description(prompt_description(&settings, &mention, guild_name))
            .footer(
                CreateEmbedFooter::new(PROMPT_FOOTER)
                    .icon_url(guild_icon.unwrap_or_else(|| DEFAULT_ICON.to_string())),
            )
            .timestamp(Timestamp::now());

        Ok(VouchPrompt {
            content: format!("Halo {}, silakan isi vouch di bawah!", mention),
            embed,
            buttons: rating_buttons(&settings),
        })
    }

    /// Posts a rating to the guild's vouch channel.
    ///
    /// # Returns
    /// - `Ok(VouchOutcome::Posted(reply))` - Logged; `reply` thanks the reviewer
    /// - `Ok(VouchOutcome::NotConfigured)` - No vouch channel set
    /// - `Err(AppError::DiscordErr)` - The vouch channel is gone or not writable
    pub async fn record(
        &self,
        http: &Arc<Http>,
        guild_id: u64,
        guild_name: &str,
        guild_icon: Option<String>,
        reviewer: &User,
        rating: u8,
    ) -> Result<VouchOutcome, AppError> {
        let (channel_id, settings) = self.settings(guild_id).await?;
        let Some(channel_id) = channel_id else {
            return Ok(VouchOutcome::NotConfigured);
        };
        let mention = format!("<@{}>", reviewer.id);

        let mut footer = CreateEmbedFooter::new(LOG_FOOTER);
        if let Some(icon) = guild_icon {
            footer = footer.icon_url(icon);
        }
        let embed = CreateEmbed::new()
            .color(GOLD)
            .title(settings.log_title.as_deref().unwrap_or(DEFAULT_LOG_TITLE))
            .description(log_description(&settings, &mention, rating))
            .field("Rating", DEFAULT_EMOJI.repeat(rating as usize), true)
            .field("Reviewer", reviewer.name.clone(), true)
            .thumbnail(reviewer.face())
            .footer(footer)
            .timestamp(Timestamp::now());

        ChannelId::new(channel_id)
            .send_message(http, CreateMessage::new().embed(embed))
            .await?;

        tracing::info!(
            "User {} vouched {} stars in guild {} (bot {})",
            reviewer.id,
            rating,
            guild_id,
            self.bot_id
        );

        Ok(VouchOutcome::Posted(response_text(
            &settings, &mention, guild_name,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::guild::VouchButton;

    #[test]
    fn parses_only_valid_ratings() {
        assert_eq!(parse_rating("vouch_1"), Some(1));
        assert_eq!(parse_rating("vouch_5"), Some(5));
        assert_eq!(parse_rating("vouch_0"), None);
        assert_eq!(parse_rating("vouch_6"), None);
        assert_eq!(parse_rating("ticket_close"), None);
    }

    #[test]
    fn default_texts_fill_placeholders() {
        let settings = VouchSettings::default();

        let description = prompt_description(&settings, "<@1>", "Shop");
        assert!(description.starts_with("Halo <@1>,"));
        assert_eq!(
            log_description(&settings, "<@1>", 4),
            "<@1> memberikan rating 4 Bintang!"
        );
        assert_eq!(
            response_text(&settings, "<@1>", "Shop"),
            "<@1>, Terimakasih sudah memberikan vouch! 🙏"
        );
    }

    #[test]
    fn custom_texts_replace_defaults() {
        let settings = VouchSettings {
            description: Some("Rate {GUILD}, {user}".to_string()),
            response: Some("Thanks {user} from {guild}".to_string()),
            ..Default::default()
        };

        assert_eq!(prompt_description(&settings, "<@2>", "Shop"), "Rate Shop, <@2>");
        assert_eq!(
            response_text(&settings, "<@2>", "Shop"),
            "Thanks <@2> from Shop"
        );
    }

    #[test]
    fn buttons_use_custom_faces_only_when_five_are_set() {
        let mut settings = VouchSettings {
            buttons: vec![
                VouchButton {
                    label: Some("Bad".to_string()),
                    emoji: Some("👎".to_string()),
                },
                VouchButton::default(),
            ],
            ..Default::default()
        };
        assert_eq!(button_face(&settings, 1), ("1".to_string(), "⭐".to_string()));

        settings.buttons.resize(VOUCH_BUTTONS, VouchButton::default());
        assert_eq!(
            button_face(&settings, 1),
            ("Bad".to_string(), "👎".to_string())
        );
        assert_eq!(button_face(&settings, 2), ("2".to_string(), "⭐".to_string()));
    }
}
