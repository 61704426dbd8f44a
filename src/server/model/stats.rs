use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    guild::{DailyActivityDto, GuildStatsDto},
    user::AdminStatsDto,
};

/// Ticket counts opened and closed on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub opened: u64,
    pub closed: u64,
}

/// Aggregate ticket statistics of one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildStats {
    pub total_tickets: u64,
    pub open_tickets: u64,
    pub closed_tickets: u64,
    pub claimed_tickets: u64,
    pub average_response_seconds: Option<i64>,
    pub activity: Vec<DailyActivity>,
}

impl GuildStats {
    pub fn into_dto(self) -> GuildStatsDto {
        GuildStatsDto {
            total_tickets: self.total_tickets,
            open_tickets: self.open_tickets,
            closed_tickets: self.closed_tickets,
            claimed_tickets: self.claimed_tickets,
            average_response_seconds: self.average_response_seconds,
            activity: self
                .activity
                .into_iter()
                .map(|day| DailyActivityDto {
                    date: day.date.format("%Y-%m-%d").to_string(),
                    opened: day.opened,
                    closed: day.closed,
                })
                .collect(),
        }
    }
}

/// Open and close timestamps of one ticket, used for activity bucketing.
#[derive(Debug, Clone, Copy)]
pub struct TicketTimes {
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Platform-wide counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminStats {
    pub total_users: u64,
    pub banned_users: u64,
    pub pending_users: u64,
    pub total_bots: u64,
    pub running_bots: u64,
    pub total_tickets: u64,
    pub open_tickets: u64,
}

impl AdminStats {
    pub fn into_dto(self) -> AdminStatsDto {
        AdminStatsDto {
            total_users: self.total_users,
            banned_users: self.banned_users,
            pending_users: self.pending_users,
            total_bots: self.total_bots,
            running_bots: self.running_bots,
            total_tickets: self.total_tickets,
            open_tickets: self.open_tickets,
        }
    }
}
