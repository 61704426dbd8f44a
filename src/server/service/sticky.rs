//! Sticky messages kept at the bottom of a channel.
//!
//! Each running bot holds a `StickyCache` so the message handler can decide
//! without a database round trip whether a channel has a sticky. The cache is
//! reloaded from the database whenever the dashboard changes a sticky.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, CreateMessage, MessageId},
    http::Http,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::{
    model::community::SaveStickyMessageDto,
    server::{
        data::sticky_message::StickyMessageRepository,
        error::AppError,
        model::community::StickyMessage,
        util::parse::parse_u64_from_string,
    },
};

/// Content and last posted copy of one channel's sticky.
#[derive(Debug, Clone, PartialEq)]
pub struct StickyEntry {
    pub content: String,
    pub last_message_id: Option<u64>,
}

/// Per-bot map of channel id to sticky.
#[derive(Clone, Default)]
pub struct StickyCache {
    channels: Arc<RwLock<HashMap<u64, StickyEntry>>>,
}

impl StickyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole cache with the given stickies.
    pub async fn replace_all(&self, stickies: Vec<StickyMessage>) {
        let mut channels = self.channels.write().await;
        channels.clear();
        for sticky in stickies {
            channels.insert(
                sticky.channel_id,
                StickyEntry {
                    content: sticky.content,
                    last_message_id: sticky.last_message_id,
                },
            );
        }
    }

    pub async fn get(&self, channel_id: u64) -> Option<StickyEntry> {
        self.channels.read().await.get(&channel_id).cloned()
    }

    pub async fn set_last_message(&self, channel_id: u64, message_id: u64) {
        if let Some(entry) = self.channels.write().await.get_mut(&channel_id) {
            entry.last_message_id = Some(message_id);
        }
    }

    pub async fn len(&self) -> usize {
        self.channels.read().await.len()
    }
}

pub struct StickyService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> StickyService<'a> {
    /// Creates a new StickyService instance scoped to one bot.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `bot_id` - Bot whose stickies are managed
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    /// Reloads the bot's sticky cache from the database.
    pub async fn load(&self, cache: &StickyCache) -> Result<(), AppError> {
        let stickies = StickyMessageRepository::new(self.db)
            .get_by_bot(self.bot_id)
            .await?;
        cache.replace_all(stickies).await;
        tracing::debug!(
            "Loaded {} sticky messages for bot {}",
            cache.len().await,
            self.bot_id
        );

        Ok(())
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<StickyMessage>, AppError> {
        StickyMessageRepository::new(self.db)
            .get_by_guild(self.bot_id, guild_id)
            .await
    }

    /// Creates or replaces the sticky of a channel.
    ///
    /// # Returns
    /// - `Ok(StickyMessage)` - Stored sticky with its posted copy forgotten
    /// - `Err(AppError::BadRequest)` - Empty content or invalid channel id
    pub async fn save(
        &self,
        guild_id: u64,
        dto: SaveStickyMessageDto,
    ) -> Result<StickyMessage, AppError> {
        let content = dto.content.trim().to_string();
        if content.is_empty() {
            return Err(AppError::BadRequest(
                "Sticky message content is required".to_string(),
            ));
        }
        let channel_id = parse_u64_from_string(dto.channel_id)
            .map_err(|_| AppError::BadRequest("Invalid channel id".to_string()))?;

        StickyMessageRepository::new(self.db)
            .upsert(self.bot_id, guild_id, channel_id, content)
            .await
    }

    /// # Returns
    /// - `Ok(())` - Sticky removed
    /// - `Err(AppError::NotFound)` - Channel had no sticky
    pub async fn delete(&self, guild_id: u64, channel_id: u64) -> Result<(), AppError> {
        let deleted = StickyMessageRepository::new(self.db)
            .delete(self.bot_id, guild_id, channel_id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound("Sticky message not found".to_string()));
        }

        Ok(())
    }

    /// Moves the channel's sticky below the newest message.
    ///
    /// Deletes the previously posted copy (ignoring failures, it may already be
    /// gone), posts a fresh one and remembers its id.
    pub async fn repost(
        &self,
        http: &Http,
        cache: &StickyCache,
        channel_id: u64,
        entry: StickyEntry,
    ) -> Result<(), AppError> {
        let channel = ChannelId::new(channel_id);

        if let Some(previous) = entry.last_message_id {
            if let Err(e) = channel.delete_message(http, MessageId::new(previous)).await {
                tracing::debug!(
                    "Previous sticky {} in channel {} already gone: {}",
                    previous,
                    channel_id,
                    e
                );
            }
        }

        let message = channel
            .send_message(http, CreateMessage::new().content(entry.content))
            .await?;
        let message_id = message.id.get();

        cache.set_last_message(channel_id, message_id).await;
        StickyMessageRepository::new(self.db)
            .set_last_message(self.bot_id, channel_id, message_id)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sticky(channel_id: u64, content: &str) -> StickyMessage {
        StickyMessage {
            id: 1,
            bot_id: 1,
            guild_id: 10,
            channel_id,
            content: content.to_string(),
            last_message_id: None,
        }
    }

    #[tokio::test]
    async fn cache_replaces_and_tracks_last_message() {
        let cache = StickyCache::new();
        cache
            .replace_all(vec![sticky(5, "read the rules"), sticky(6, "no spam")])
            .await;

        cache.set_last_message(5, 99).await;
        cache.set_last_message(7, 100).await;

        assert_eq!(
            cache.get(5).await,
            Some(StickyEntry {
                content: "read the rules".to_string(),
                last_message_id: Some(99),
            })
        );
        assert_eq!(cache.get(7).await, None);

        cache.replace_all(vec![sticky(6, "no spam")]).await;
        assert_eq!(cache.len().await, 1);
        assert!(cache.get(5).await.is_none());
    }
}
