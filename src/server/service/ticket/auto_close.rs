//! Inactivity warnings and automatic closes.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serenity::all::{ChannelId, CreateMessage};

use crate::server::{
    data::ticket::TicketRepository,
    error::AppError,
    model::{guild::GuildConfig, ticket::Ticket},
    util::locale::Language,
};

use super::{builder::TicketMessageBuilder, close::Closer, TicketService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoCloseAction {
    /// Post the inactivity warning.
    Warn { hours_left: i32 },
    Close,
}

/// Decides what the auto-close sweep does with an open ticket.
///
/// Closing wins over warning once the full inactivity window has passed.
pub fn auto_close_action(
    ticket: &Ticket,
    guild: &GuildConfig,
    now: DateTime<Utc>,
) -> Option<AutoCloseAction> {
    if !ticket.is_open() || guild.auto_close_hours <= 0 {
        return None;
    }

    let hours = guild.auto_close_hours;
    if ticket.last_activity + Duration::hours(hours as i64) < now {
        return Some(AutoCloseAction::Close);
    }

    let warning_hours = guild.auto_close_warning_hours;
    if !ticket.warned_auto_close
        && warning_hours > 0
        && ticket.last_activity + Duration::hours((hours - warning_hours).max(0) as i64) < now
    {
        return Some(AutoCloseAction::Warn {
            hours_left: warning_hours.min(hours),
        });
    }

    None
}

/// Tickets touched by one sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AutoCloseReport {
    pub warned: usize,
    pub closed: usize,
}

impl<'a> TicketService<'a> {
    /// Runs one auto-close sweep over this bot's open tickets.
    ///
    /// Failures on one ticket are logged and the sweep moves on.
    ///
    /// # Returns
    /// - `Ok(AutoCloseReport)` - Number of tickets warned and closed
    /// - `Err(AppError)` - Failed to load the open tickets
    pub async fn run_auto_close(&self) -> Result<AutoCloseReport, AppError> {
        let repo = TicketRepository::new(self.db);
        let tickets = repo.get_open_by_bot(self.bot_id).await?;
        let now = Utc::now();

        let mut guilds: HashMap<u64, Option<GuildConfig>> = HashMap::new();
        let mut report = AutoCloseReport::default();

        for ticket in tickets {
            if !guilds.contains_key(&ticket.guild_id) {
                let config = match self.guild_config(ticket.guild_id).await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::error!(
                            "Failed to load guild {} for auto-close: {}",
                            ticket.guild_id,
                            e
                        );
                        None
                    }
                };
                guilds.insert(ticket.guild_id, config);
            }
            let Some(Some(guild)) = guilds.get(&ticket.guild_id) else {
                continue;
            };

            match auto_close_action(&ticket, guild, now) {
                Some(AutoCloseAction::Warn { hours_left }) => {
                    let language = Language::from_code(&guild.language);
                    let warning = CreateMessage::new().embed(
                        TicketMessageBuilder::auto_close_warning_embed(language, hours_left),
                    );

                    if let Err(e) = ChannelId::new(ticket.channel_id)
                        .send_message(&self.http, warning)
                        .await
                    {
                        tracing::warn!(
                            "Failed to send auto-close warning for ticket {}: {}",
                            ticket.id,
                            e
                        );
                        continue;
                    }

                    if let Err(e) = repo.mark_warned(ticket.id).await {
                        tracing::error!("Failed to mark ticket {} warned: {}", ticket.id, e);
                        continue;
                    }
                    report.warned += 1;
                }
                Some(AutoCloseAction::Close) => {
                    match self
                        .close_and_announce(&ticket, Closer::AutoClose, None)
                        .await
                    {
                        Ok(_) => report.closed += 1,
                        Err(e) => {
                            tracing::error!("Failed to auto-close ticket {}: {}", ticket.id, e)
                        }
                    }
                }
                None => {}
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        error::AppError,
        model::{guild::VouchSettings, ticket::TicketStatus},
    };
    use serenity::http::Http;
    use std::sync::Arc;
    use test_utils::{builder::TestBuilder, factory};

    fn guild(hours: i32, warning_hours: i32) -> GuildConfig {
        GuildConfig {
            guild_id: 1,
            bot_id: 1,
            name: "Guild".to_string(),
            log_channel_id: None,
            transcript_channel_id: None,
            ticket_category_id: None,
            support_role_ids: vec![],
            admin_role_ids: vec![],
            ticket_counter: 0,
            language: "en".to_string(),
            timezone: "UTC".to_string(),
            auto_close_hours: hours,
            auto_close_warning_hours: warning_hours,
            vouch_channel_id: None,
            vouch: VouchSettings::default(),
        }
    }

    fn ticket(idle_hours: i64, warned: bool) -> Ticket {
        let now = Utc::now();
        Ticket {
            id: 1,
            bot_id: 1,
            guild_id: 1,
            channel_id: 2,
            user_id: 3,
            panel_id: None,
            option_id: None,
            ticket_number: 1,
            status: TicketStatus::Open,
            claimed_by: None,
            opened_at: now - Duration::hours(idle_hours),
            closed_at: None,
            closed_by: None,
            close_reason: None,
            transcript_url: None,
            last_activity: now - Duration::hours(idle_hours) - Duration::minutes(1),
            first_response_at: None,
            response_time_seconds: None,
            warned_auto_close: warned,
        }
    }

    #[test]
    fn disabled_guild_never_acts() {
        assert_eq!(auto_close_action(&ticket(100, false), &guild(0, 2), Utc::now()), None);
    }

    #[test]
    fn warns_inside_warning_window() {
        assert_eq!(
            auto_close_action(&ticket(22, false), &guild(24, 2), Utc::now()),
            Some(AutoCloseAction::Warn { hours_left: 2 })
        );
        assert_eq!(auto_close_action(&ticket(22, true), &guild(24, 2), Utc::now()), None);
        assert_eq!(auto_close_action(&ticket(10, false), &guild(24, 2), Utc::now()), None);
    }

    #[test]
    fn closes_after_full_window() {
        assert_eq!(
            auto_close_action(&ticket(24, true), &guild(24, 2), Utc::now()),
            Some(AutoCloseAction::Close)
        );
        assert_eq!(
            auto_close_action(&ticket(24, false), &guild(24, 0), Utc::now()),
            Some(AutoCloseAction::Close)
        );
    }

    #[test]
    fn no_warning_when_warning_disabled() {
        assert_eq!(auto_close_action(&ticket(23, false), &guild(24, 0), Utc::now()), None);
    }

    /// Tests a sweep where one guild's stored settings cannot be read.
    ///
    /// The unreadable guild is skipped and the other guild's idle ticket is
    /// still considered. Nothing is due, so no Discord call is made.
    ///
    /// Expected: Ok with an empty report
    #[tokio::test]
    async fn unreadable_guild_does_not_abort_sweep() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;
        let bot = factory::create_bot(db, user.id).await?;
        let broken = factory::guild::GuildFactory::new(db, bot.id)
            .auto_close(24, 2)
            .vouch_data("{not json")
            .build()
            .await?;
        let healthy = factory::guild::GuildFactory::new(db, bot.id)
            .auto_close(24, 2)
            .build()
            .await?;
        factory::create_ticket(db, bot.id, &broken.id).await?;
        factory::create_ticket(db, bot.id, &healthy.id).await?;

        let report = TicketService::new(db, Arc::new(Http::new("")), bot.id)
            .run_auto_close()
            .await?;

        assert_eq!(report, AutoCloseReport::default());

        Ok(())
    }
}
