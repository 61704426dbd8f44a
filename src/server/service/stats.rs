//! Guild ticket statistics for the dashboard and `/stats`.

use chrono::{Duration, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{CreateEmbed, Timestamp};

use crate::server::{
    data::ticket::TicketRepository,
    error::AppError,
    model::{
        stats::{DailyActivity, GuildStats, TicketTimes},
        ticket::TicketStatus,
    },
    util::{
        color,
        locale::{Language, Text},
    },
};

/// Days covered by the activity chart, today included.
pub const ACTIVITY_DAYS: i64 = 7;

/// Buckets open and close times per UTC day, oldest day first.
///
/// Every day of the window is present, zero-filled when nothing happened.
pub fn daily_activity(times: &[TicketTimes], today: NaiveDate, days: i64) -> Vec<DailyActivity> {
    let first = today - Duration::days(days - 1);
    let mut activity: Vec<DailyActivity> = (0..days)
        .map(|offset| DailyActivity {
            date: first + Duration::days(offset),
            opened: 0,
            closed: 0,
        })
        .collect();

    let index = |date: NaiveDate| -> Option<usize> {
        let offset = (date - first).num_days();
        (0..days).contains(&offset).then_some(offset as usize)
    };

    for time in times {
        if let Some(i) = index(time.opened_at.date_naive()) {
            activity[i].opened += 1;
        }
        if let Some(i) = time.closed_at.and_then(|at| index(at.date_naive())) {
            activity[i].closed += 1;
        }
    }

    activity
}

/// Formats a response time such as `1h 5m`, `3m 20s` or `45s`.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> StatsService<'a> {
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    /// Aggregates a guild's ticket statistics.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to aggregate
    ///
    /// # Returns
    /// - `Ok(GuildStats)` - Totals, average response time and 7-day activity
    /// - `Err(AppError)` - Database error
    pub async fn guild_stats(&self, guild_id: u64) -> Result<GuildStats, AppError> {
        let repo = TicketRepository::new(self.db);
        let now = Utc::now();
        let today = now.date_naive();

        let since = today
            .checked_sub_signed(Duration::days(ACTIVITY_DAYS - 1))
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|day| day.and_utc())
            .unwrap_or(now);

        let times = repo.times_since(self.bot_id, guild_id, since).await?;

        Ok(GuildStats {
            total_tickets: repo.count(self.bot_id, guild_id, None).await?,
            open_tickets: repo
                .count(self.bot_id, guild_id, Some(TicketStatus::Open))
                .await?,
            closed_tickets: repo
                .count(self.bot_id, guild_id, Some(TicketStatus::Closed))
                .await?,
            claimed_tickets: repo.count_claimed(self.bot_id, guild_id).await?,
            average_response_seconds: repo.average_response_seconds(self.bot_id, guild_id).await?,
            activity: daily_activity(&times, today, ACTIVITY_DAYS),
        })
    }

    /// Embed answering `/stats`.
    pub fn stats_embed(stats: &GuildStats, language: Language) -> CreateEmbed {
        let average = stats
            .average_response_seconds
            .map(format_duration)
            .unwrap_or_else(|| "N/A".to_string());

        CreateEmbed::new()
            .color(color::PRIMARY)
            .title(language.get(Text::StatsTitle))
            .field(language.get(Text::StatsTotal), stats.total_tickets.to_string(), true)
            .field(language.get(Text::StatsOpen), stats.open_tickets.to_string(), true)
            .field(language.get(Text::StatsClosed), stats.closed_tickets.to_string(), true)
            .field(language.get(Text::StatsAverageResponse), average, true)
            .timestamp(Timestamp::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn activity_is_zero_filled_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let activity = daily_activity(&[], today, 7);

        assert_eq!(activity.len(), 7);
        assert_eq!(activity[0].date, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert_eq!(activity[6].date, today);
        assert!(activity.iter().all(|day| day.opened == 0 && day.closed == 0));
    }

    #[test]
    fn buckets_opens_and_closes_separately() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let times = vec![
            TicketTimes {
                opened_at: at(9, 8),
                closed_at: Some(at(10, 1)),
            },
            TicketTimes {
                opened_at: at(10, 12),
                closed_at: None,
            },
            TicketTimes {
                opened_at: at(1, 12),
                closed_at: Some(at(4, 0)),
            },
        ];

        let activity = daily_activity(&times, today, 7);

        assert_eq!(activity[5].opened, 1);
        assert_eq!(activity[6].opened, 1);
        assert_eq!(activity[6].closed, 1);
        assert_eq!(activity[0].closed, 1);
        assert_eq!(activity.iter().map(|day| day.opened).sum::<u64>(), 2);
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(200), "3m 20s");
        assert_eq!(format_duration(3900), "1h 5m");
    }
}
