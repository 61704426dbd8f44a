//! Bot factory for creating tenant bot entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test bots owned by a user.
///
/// The stored token is plaintext unless overridden, which the server treats as a
/// legacy unencrypted token.
pub struct BotFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    bot_token: String,
    client_id: String,
    bot_name: String,
    status: String,
}

impl<'a> BotFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            bot_token: format!("token-{}", id),
            client_id: (100_000 + id).to_string(),
            bot_name: format!("Bot {}", id),
            status: "stopped".to_string(),
        }
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.bot_token = token.into();
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Sets the stored status (`stopped`, `running`, `error`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::bot::Model, DbErr> {
        entity::bot::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            bot_token: ActiveValue::Set(self.bot_token),
            client_id: ActiveValue::Set(Some(self.client_id)),
            bot_name: ActiveValue::Set(Some(self.bot_name)),
            bot_avatar: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            error_message: ActiveValue::Set(None),
            guilds_count: ActiveValue::Set(0),
            activity_type: ActiveValue::Set("Playing".to_string()),
            activity_name: ActiveValue::Set("KingBot".to_string()),
            status_presence: ActiveValue::Set("online".to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a stopped bot for the given user.
pub async fn create_bot(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::bot::Model, DbErr> {
    BotFactory::new(db, user_id).build().await
}
