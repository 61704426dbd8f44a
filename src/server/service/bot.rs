//! Tenant bot registration and lifecycle.

use sea_orm::DatabaseConnection;

use crate::server::{
    bot::{manager::BotManager, start::verify_token},
    data::bot::BotRepository,
    error::{bot::BotError, AppError},
    model::{
        bot::{Bot, BotPresence, CreateBotParam},
        user::User,
    },
    util::crypto::TokenCipher,
};

const TOKEN_LEN: std::ops::RangeInclusive<usize> = 50..=120;

/// Trims a submitted token and checks its length.
pub fn validate_token(token: &str) -> Result<&str, BotError> {
    let token = token.trim();
    if !TOKEN_LEN.contains(&token.len()) {
        return Err(BotError::TokenLength);
    }

    Ok(token)
}

pub struct BotService<'a> {
    db: &'a DatabaseConnection,
    manager: &'a BotManager,
    cipher: &'a TokenCipher,
}

impl<'a> BotService<'a> {
    /// Creates a new BotService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `manager` - Registry of running bots
    /// - `cipher` - Cipher used to store bot tokens
    ///
    /// # Returns
    /// - `BotService` - New service instance
    pub fn new(db: &'a DatabaseConnection, manager: &'a BotManager, cipher: &'a TokenCipher) -> Self {
        Self {
            db,
            manager,
            cipher,
        }
    }

    /// Lists a user's bots together with whether each is connected.
    pub async fn list(&self, user_id: i32) -> Result<Vec<(Bot, bool)>, AppError> {
        let bots = BotRepository::new(self.db).get_by_user(user_id).await?;
        let running = self.manager.running_ids().await;

        Ok(bots
            .into_iter()
            .map(|bot| {
                let connected = running.contains(&bot.id);
                (bot, connected)
            })
            .collect())
    }

    /// Finds a bot the user may manage. Admins may manage every bot.
    ///
    /// # Returns
    /// - `Ok(Bot)` - The bot
    /// - `Err(AppError::NotFound)` - Unknown bot or owned by someone else
    pub async fn find_owned(&self, user: &User, bot_id: i32) -> Result<Bot, AppError> {
        match BotRepository::new(self.db).find_by_id(bot_id).await? {
            Some(bot) if bot.user_id == user.id || user.is_admin => Ok(bot),
            _ => Err(AppError::NotFound("Bot not found".to_string())),
        }
    }

    /// Registers a bot from its token.
    ///
    /// The token is verified against `GET /users/@me` and stored encrypted.
    ///
    /// # Arguments
    /// - `user` - Owner of the new bot
    /// - `token` - Bot token as pasted by the user
    ///
    /// # Returns
    /// - `Ok(Bot)` - Registered bot, status `stopped`
    /// - `Err(AppError::BotErr(_))` - Bad length, rejected token, not a bot or over the limit
    pub async fn add(&self, user: &User, token: &str) -> Result<Bot, AppError> {
        let token = validate_token(token)?;
        let repo = BotRepository::new(self.db);

        let owned = repo.count_by_user(user.id).await?;
        if !user.is_admin && owned >= user.max_bots.max(0) as u64 {
            return Err(BotError::LimitReached(user.max_bots).into());
        }

        let identity = verify_token(self.manager.http_client(), token).await?;
        if !identity.is_bot {
            return Err(BotError::NotABot.into());
        }

        let encrypted_token = self.cipher.encrypt(token)?;
        let bot = repo
            .create(CreateBotParam {
                user_id: user.id,
                encrypted_token,
                client_id: identity.id,
                name: identity.name,
                avatar: identity.avatar,
            })
            .await?;

        tracing::info!("User {} added bot {} ({})", user.id, bot.id, identity.id);

        Ok(bot)
    }

    /// Stops and deletes a bot with all its guild data.
    pub async fn delete(&self, user: &User, bot_id: i32) -> Result<(), AppError> {
        let bot = self.find_owned(user, bot_id).await?;
        self.manager.stop_bot(bot.id).await?;

        if !BotRepository::new(self.db).delete(bot.id).await? {
            return Err(AppError::NotFound("Bot not found".to_string()));
        }

        tracing::info!("User {} deleted bot {}", user.id, bot.id);

        Ok(())
    }

    pub async fn start(&self, user: &User, bot_id: i32) -> Result<(), AppError> {
        let bot = self.find_owned(user, bot_id).await?;
        self.manager.start_bot(bot.id).await
    }

    pub async fn stop(&self, user: &User, bot_id: i32) -> Result<(), AppError> {
        let bot = self.find_owned(user, bot_id).await?;
        if !self.manager.is_running(bot.id).await {
            return Err(BotError::NotRunning.into());
        }

        self.manager.stop_bot(bot.id).await
    }

    /// Stores a presence and applies it live when the bot is running.
    ///
    /// # Returns
    /// - `Ok(true)` - Applied to the running bot
    /// - `Ok(false)` - Stored only; used on the next start
    pub async fn update_presence(
        &self,
        user: &User,
        bot_id: i32,
        presence: BotPresence,
    ) -> Result<bool, AppError> {
        if presence.activity_name.trim().is_empty() {
            return Err(AppError::BadRequest("Activity name is required".to_string()));
        }

        let bot = self.find_owned(user, bot_id).await?;
        BotRepository::new(self.db)
            .update_presence(bot.id, &presence)
            .await?;

        Ok(self.manager.apply_presence(bot.id, &presence).await)
    }

    /// Stops every bot of a user, used when the user is banned or deleted.
    pub async fn stop_all_for_user(&self, user_id: i32) -> Result<(), AppError> {
        for bot in BotRepository::new(self.db).get_by_user(user_id).await? {
            if self.manager.is_running(bot.id).await {
                self.manager.stop_bot(bot.id).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_length_is_checked_after_trim() {
        let token = "a".repeat(59);
        assert_eq!(validate_token(&format!("  {}  ", token)).ok(), Some(token.as_str()));
        assert!(matches!(validate_token("short"), Err(BotError::TokenLength)));
        assert!(matches!(
            validate_token(&"a".repeat(121)),
            Err(BotError::TokenLength)
        ));
    }
}
