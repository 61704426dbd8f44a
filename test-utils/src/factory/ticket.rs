//! Ticket factory for creating ticket rows in any lifecycle state.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating tickets with customizable state.
///
/// # Example
///
/// ```rust,ignore
/// let ticket = TicketFactory::new(&db, bot.id, &guild.id)
///     .user_id("42")
///     .closed()
///     .build()
///     .await?;
/// ```
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
    guild_id: String,
    channel_id: String,
    user_id: String,
    option_id: Option<i32>,
    panel_id: Option<i32>,
    ticket_number: i32,
    status: String,
    claimed_by: Option<String>,
    opened_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    last_activity: DateTime<Utc>,
    warned_auto_close: bool,
    response_time_seconds: Option<i64>,
}

impl<'a> TicketFactory<'a> {
    /// Defaults: open, unclaimed, generated channel and opener ids.
    pub fn new(db: &'a DatabaseConnection, bot_id: i32, guild_id: &str) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            bot_id,
            guild_id: guild_id.to_string(),
            channel_id: (700_000 + id).to_string(),
            user_id: (800_000 + id).to_string(),
            option_id: None,
            panel_id: None,
            ticket_number: id as i32,
            status: "open".to_string(),
            claimed_by: None,
            opened_at: now,
            closed_at: None,
            last_activity: now,
            warned_auto_close: false,
            response_time_seconds: None,
        }
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn option(mut self, panel_id: i32, option_id: i32) -> Self {
        self.panel_id = Some(panel_id);
        self.option_id = Some(option_id);
        self
    }

    pub fn number(mut self, ticket_number: i32) -> Self {
        self.ticket_number = ticket_number;
        self
    }

    pub fn claimed_by(mut self, staff_id: impl Into<String>) -> Self {
        self.claimed_by = Some(staff_id.into());
        self
    }

    pub fn opened_at(mut self, opened_at: DateTime<Utc>) -> Self {
        self.opened_at = opened_at;
        self
    }

    /// Marks the ticket closed at the current time.
    pub fn closed(mut self) -> Self {
        self.status = "closed".to_string();
        self.closed_at = Some(Utc::now());
        self
    }

    pub fn closed_at(mut self, closed_at: DateTime<Utc>) -> Self {
        self.status = "closed".to_string();
        self.closed_at = Some(closed_at);
        self
    }

    pub fn last_activity(mut self, last_activity: DateTime<Utc>) -> Self {
        self.last_activity = last_activity;
        self
    }

    pub fn warned(mut self, warned: bool) -> Self {
        self.warned_auto_close = warned;
        self
    }

    pub fn response_time(mut self, seconds: i64) -> Self {
        self.response_time_seconds = Some(seconds);
        self
    }

    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        entity::ticket::ActiveModel {
            bot_id: ActiveValue::Set(self.bot_id),
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            user_id: ActiveValue::Set(self.user_id),
            panel_id: ActiveValue::Set(self.panel_id),
            option_id: ActiveValue::Set(self.option_id),
            ticket_number: ActiveValue::Set(self.ticket_number),
            status: ActiveValue::Set(self.status),
            claimed_by: ActiveValue::Set(self.claimed_by),
            opened_at: ActiveValue::Set(self.opened_at),
            closed_at: ActiveValue::Set(self.closed_at),
            closed_by: ActiveValue::Set(None),
            close_reason: ActiveValue::Set(None),
            transcript_url: ActiveValue::Set(None),
            last_activity: ActiveValue::Set(self.last_activity),
            first_response_at: ActiveValue::Set(None),
            response_time_seconds: ActiveValue::Set(self.response_time_seconds),
            warned_auto_close: ActiveValue::Set(self.warned_auto_close),
            messages: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open ticket in the guild.
pub async fn create_ticket(
    db: &DatabaseConnection,
    bot_id: i32,
    guild_id: &str,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, bot_id, guild_id).build().await
}
