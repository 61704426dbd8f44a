//! Panel factory for creating panels, options and intake questions.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a panel in `guild_id` posted to a generated channel.
///
/// # Arguments
/// - `db` - Database connection
/// - `bot_id` - Owning bot
/// - `guild_id` - Guild snowflake as string
pub async fn create_panel(
    db: &DatabaseConnection,
    bot_id: i32,
    guild_id: &str,
) -> Result<entity::panel::Model, DbErr> {
    let id = next_id();
    entity::panel::ActiveModel {
        bot_id: ActiveValue::Set(bot_id),
        guild_id: ActiveValue::Set(guild_id.to_string()),
        channel_id: ActiveValue::Set((500_000 + id).to_string()),
        message_id: ActiveValue::Set(None),
        name: ActiveValue::Set(format!("Panel {}", id)),
        message_content: ActiveValue::Set(None),
        embed_title: ActiveValue::Set(Some("Support".to_string())),
        embed_title_url: ActiveValue::Set(None),
        embed_description: ActiveValue::Set(Some("Open a ticket below".to_string())),
        embed_color: ActiveValue::Set("#5865F2".to_string()),
        embed_image: ActiveValue::Set(None),
        embed_thumbnail: ActiveValue::Set(None),
        embed_footer: ActiveValue::Set(None),
        embed_footer_icon: ActiveValue::Set(None),
        embed_author_name: ActiveValue::Set(None),
        embed_author_icon: ActiveValue::Set(None),
        embed_author_url: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Factory for panel options with customizable routing fields.
pub struct PanelOptionFactory<'a> {
    db: &'a DatabaseConnection,
    panel_id: i32,
    label: String,
    ticket_prefix: Option<String>,
    required_roles: String,
    steam_required: bool,
    is_disabled: bool,
    ticket_style: String,
    position: i32,
}

impl<'a> PanelOptionFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, panel_id: i32) -> Self {
        Self {
            db,
            panel_id,
            label: format!("Option {}", next_id()),
            ticket_prefix: None,
            required_roles: "[]".to_string(),
            steam_required: false,
            is_disabled: false,
            ticket_style: "channel".to_string(),
            position: 0,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ticket_prefix = Some(prefix.into());
        self
    }

    pub fn required_roles(mut self, roles: &[u64]) -> Self {
        let roles: Vec<String> = roles.iter().map(|id| id.to_string()).collect();
        self.required_roles = serde_json::Value::from(roles).to_string();
        self
    }

    pub fn steam_required(mut self, steam_required: bool) -> Self {
        self.steam_required = steam_required;
        self
    }

    pub fn disabled(mut self, is_disabled: bool) -> Self {
        self.is_disabled = is_disabled;
        self
    }

    pub fn thread(mut self) -> Self {
        self.ticket_style = "thread".to_string();
        self
    }

    pub fn position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub async fn build(self) -> Result<entity::panel_option::Model, DbErr> {
        entity::panel_option::ActiveModel {
            panel_id: ActiveValue::Set(self.panel_id),
            label: ActiveValue::Set(self.label),
            emoji: ActiveValue::Set(None),
            style: ActiveValue::Set("primary".to_string()),
            category_name: ActiveValue::Set(None),
            ticket_prefix: ActiveValue::Set(self.ticket_prefix),
            support_role_ids: ActiveValue::Set("[]".to_string()),
            required_roles: ActiveValue::Set(self.required_roles),
            welcome_message: ActiveValue::Set(None),
            ticket_message: ActiveValue::Set(None),
            staff_thread_message: ActiveValue::Set(None),
            steam_required: ActiveValue::Set(self.steam_required),
            pings_enabled: ActiveValue::Set(true),
            is_disabled: ActiveValue::Set(self.is_disabled),
            ticket_style: ActiveValue::Set(self.ticket_style),
            ticket_category_id: ActiveValue::Set(None),
            position: ActiveValue::Set(self.position),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an enabled channel-style option on the panel.
pub async fn create_option(
    db: &DatabaseConnection,
    panel_id: i32,
) -> Result<entity::panel_option::Model, DbErr> {
    PanelOptionFactory::new(db, panel_id).build().await
}

/// Creates a required short question on the option.
pub async fn create_question(
    db: &DatabaseConnection,
    option_id: i32,
    question: &str,
    position: i32,
) -> Result<entity::panel_question::Model, DbErr> {
    entity::panel_question::ActiveModel {
        option_id: ActiveValue::Set(option_id),
        question: ActiveValue::Set(question.to_string()),
        placeholder: ActiveValue::Set(None),
        required: ActiveValue::Set(true),
        min_length: ActiveValue::Set(0),
        max_length: ActiveValue::Set(1000),
        style: ActiveValue::Set("short".to_string()),
        position: ActiveValue::Set(position),
        ..Default::default()
    }
    .insert(db)
    .await
}
