//! Ticket lifecycle service.
//!
//! Drives a ticket from the panel button press to deletion of its channel:
//! open checks and intake form, channel or thread creation, claiming, closing
//! with transcript and log, and the inactivity auto-close. The service is
//! scoped to one tenant bot and acts on Discord through that bot's HTTP client.
//!
//! The service is organized into separate modules by concern:
//! - `builder` - Embeds, buttons and the intake modal
//! - `naming` - Channel and thread naming
//! - `open` - Checks run before a ticket is opened
//! - `create` - Channel creation and the welcome message
//! - `claim` - Claiming and unclaiming
//! - `close` - Closing, transcripts and delayed channel deletion
//! - `participant` - Adding, removing and renaming
//! - `auto_close` - Inactivity warnings and closes
//! - `history` - Dashboard listing and detail

pub mod auto_close;
pub mod builder;
pub mod claim;
pub mod close;
pub mod create;
pub mod history;
pub mod naming;
pub mod open;
pub mod participant;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, CreateEmbed, CreateMessage},
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    data::{guild::GuildRepository, ticket::TicketRepository},
    error::AppError,
    model::{guild::GuildConfig, ticket::Ticket},
    util::locale::Language,
};

/// Service providing ticket lifecycle operations for one bot.
pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
    http: Arc<Http>,
    bot_id: i32,
}

impl<'a> TicketService<'a> {
    /// Creates a new TicketService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `http` - HTTP client of the bot serving the tickets
    /// - `bot_id` - Bot whose tickets are handled
    ///
    /// # Returns
    /// - `TicketService` - New service instance
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>, bot_id: i32) -> Self {
        Self { db, http, bot_id }
    }

    /// Finds the ticket living in a channel, if it belongs to this bot.
    pub async fn find_by_channel(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        let ticket = TicketRepository::new(self.db)
            .find_by_channel(channel_id)
            .await?;

        Ok(ticket.filter(|ticket| ticket.bot_id == self.bot_id))
    }

    pub async fn guild_config(&self, guild_id: u64) -> Result<Option<GuildConfig>, AppError> {
        GuildRepository::new(self.db).find(guild_id, self.bot_id).await
    }

    /// Language selected by the guild, English when the guild has no row yet.
    pub async fn language(&self, guild_id: u64) -> Language {
        match self.guild_config(guild_id).await {
            Ok(Some(config)) => Language::from_code(&config.language),
            Ok(None) => Language::English,
            Err(e) => {
                tracing::warn!("Failed to load language of guild {}: {}", guild_id, e);
                Language::English
            }
        }
    }

    /// Posts an embed to the guild's log channel.
    ///
    /// Guilds without a log channel are skipped. Failures are logged only.
    async fn log_action(&self, guild: Option<&GuildConfig>, embed: CreateEmbed) {
        let Some(channel_id) = guild.and_then(|guild| guild.log_channel_id) else {
            return;
        };

        if let Err(e) = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::warn!("Failed to send ticket log to channel {}: {}", channel_id, e);
        }
    }
}
