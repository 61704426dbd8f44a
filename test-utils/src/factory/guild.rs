//! Guild factory for creating per-bot guild configuration rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct GuildFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    bot_id: i32,
    name: String,
    support_role_ids: String,
    admin_role_ids: String,
    ticket_category_id: Option<String>,
    auto_close_hours: i32,
    auto_close_warning_hours: i32,
    vouch_data: Option<String>,
}

impl<'a> GuildFactory<'a> {
    /// Defaults: numeric guild id, no roles, auto-close disabled.
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            id: (900_000_000 + id).to_string(),
            bot_id,
            name: format!("Guild {}", id),
            support_role_ids: "[]".to_string(),
            admin_role_ids: "[]".to_string(),
            ticket_category_id: None,
            auto_close_hours: 0,
            auto_close_warning_hours: 0,
            vouch_data: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets support roles from numeric ids.
    pub fn support_roles(mut self, roles: &[u64]) -> Self {
        self.support_role_ids = encode(roles);
        self
    }

    pub fn admin_roles(mut self, roles: &[u64]) -> Self {
        self.admin_role_ids = encode(roles);
        self
    }

    pub fn ticket_category(mut self, category_id: impl Into<String>) -> Self {
        self.ticket_category_id = Some(category_id.into());
        self
    }

    pub fn auto_close(mut self, hours: i32, warning_hours: i32) -> Self {
        self.auto_close_hours = hours;
        self.auto_close_warning_hours = warning_hours;
        self
    }

    /// Stores `raw` as the vouch settings column without validation.
    pub fn vouch_data(mut self, raw: impl Into<String>) -> Self {
        self.vouch_data = Some(raw.into());
        self
    }

    pub async fn build(self) -> Result<entity::guild::Model, DbErr> {
        entity::guild::ActiveModel {
            id: ActiveValue::Set(self.id),
            bot_id: ActiveValue::Set(self.bot_id),
            name: ActiveValue::Set(self.name),
            log_channel_id: ActiveValue::Set(None),
            transcript_channel_id: ActiveValue::Set(None),
            ticket_category_id: ActiveValue::Set(self.ticket_category_id),
            support_role_ids: ActiveValue::Set(self.support_role_ids),
            admin_role_ids: ActiveValue::Set(self.admin_role_ids),
            ticket_counter: ActiveValue::Set(0),
            language: ActiveValue::Set("en".to_string()),
            timezone: ActiveValue::Set("UTC".to_string()),
            auto_close_hours: ActiveValue::Set(self.auto_close_hours),
            auto_close_warning_hours: ActiveValue::Set(self.auto_close_warning_hours),
            vouch_channel_id: ActiveValue::Set(None),
            vouch_data: ActiveValue::Set(self.vouch_data),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

fn encode(ids: &[u64]) -> String {
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    serde_json::Value::from(ids).to_string()
}

/// Creates a guild configuration for the given bot.
pub async fn create_guild(
    db: &DatabaseConnection,
    bot_id: i32,
) -> Result<entity::guild::Model, DbErr> {
    GuildFactory::new(db, bot_id).build().await
}
