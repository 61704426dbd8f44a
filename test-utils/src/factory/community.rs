//! Factories for custom commands, sticky messages and invite joins.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a plain-text custom command.
pub async fn create_custom_command(
    db: &DatabaseConnection,
    bot_id: i32,
    guild_id: &str,
    trigger: &str,
    response: &str,
) -> Result<entity::custom_command::Model, DbErr> {
    entity::custom_command::ActiveModel {
        bot_id: ActiveValue::Set(bot_id),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        trigger: ActiveValue::Set(trigger.to_string()),
        response: ActiveValue::Set(response.to_string()),
        embed_title: ActiveValue::Set(None),
        embed_description: ActiveValue::Set(None),
        embed_color: ActiveValue::Set(None),
        created_by: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a sticky message with no posted copy yet.
pub async fn create_sticky(
    db: &DatabaseConnection,
    bot_id: i32,
    guild_id: &str,
    channel_id: &str,
    content: &str,
) -> Result<entity::sticky_message::Model, DbErr> {
    entity::sticky_message::ActiveModel {
        bot_id: ActiveValue::Set(bot_id),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        channel_id: ActiveValue::Set(channel_id.to_string()),
        content: ActiveValue::Set(content.to_string()),
        last_message_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Records a join attributed to `inviter_id` at `created_at`.
pub async fn create_invite_join(
    db: &DatabaseConnection,
    bot_id: i32,
    guild_id: &str,
    user_id: &str,
    inviter_id: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<entity::invite_join::Model, DbErr> {
    entity::invite_join::ActiveModel {
        bot_id: ActiveValue::Set(bot_id),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        inviter_id: ActiveValue::Set(inviter_id.map(str::to_string)),
        code: ActiveValue::Set(inviter_id.map(|_| "abc".to_string())),
        created_at: ActiveValue::Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
}
