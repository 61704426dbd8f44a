//! Ticket listing and detail for the dashboard.
//!
//! Unlike [`super::TicketService`] these reads work while the bot is stopped;
//! only the live messages of an open ticket need the bot's HTTP client.

use sea_orm::DatabaseConnection;
use serenity::http::Http;

use crate::server::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{Ticket, TicketDetail, TicketStatus},
};

use super::close::fetch_snapshot;

const MAX_PAGE_SIZE: u64 = 100;

/// Parses the dashboard's status filter; anything else means all tickets.
pub fn status_filter(value: Option<&str>) -> Option<TicketStatus> {
    match value.map(str::trim) {
        Some("open") => Some(TicketStatus::Open),
        Some("closed") => Some(TicketStatus::Closed),
        _ => None,
    }
}

pub struct TicketHistoryService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> TicketHistoryService<'a> {
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    /// Tickets of a guild, newest first, with the total matching count.
    pub async fn list(
        &self,
        guild_id: u64,
        status: Option<TicketStatus>,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Ticket>, u64), AppError> {
        TicketRepository::new(self.db)
            .get_paginated(
                self.bot_id,
                guild_id,
                status,
                page,
                limit.clamp(1, MAX_PAGE_SIZE),
            )
            .await
    }

    /// Loads a ticket by its guild number.
    ///
    /// A closed ticket returns its saved snapshot. An open ticket returns the
    /// live channel history when `http` is given, otherwise no messages.
    ///
    /// # Returns
    /// - `Ok(TicketDetail)` - Ticket with responses, participants and messages
    /// - `Err(AppError::NotFound)` - No ticket with that number
    pub async fn detail(
        &self,
        http: Option<&Http>,
        guild_id: u64,
        ticket_number: i32,
    ) -> Result<TicketDetail, AppError> {
        let repo = TicketRepository::new(self.db);
        let (ticket, snapshot) = repo
            .find_by_number(self.bot_id, guild_id, ticket_number)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

        let messages = match (ticket.is_open(), http) {
            (false, _) => snapshot,
            (true, Some(http)) => match fetch_snapshot(http, ticket.channel_id).await {
                Ok(messages) => messages,
                Err(e) => {
                    tracing::warn!(
                        "Failed to fetch live messages of ticket {}: {}",
                        ticket.id,
                        e
                    );
                    Vec::new()
                }
            },
            (true, None) => Vec::new(),
        };

        Ok(TicketDetail {
            responses: repo.responses(ticket.id).await?,
            participants: repo.participants(ticket.id).await?,
            ticket,
            messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_lists_everything() {
        assert_eq!(status_filter(Some("open")), Some(TicketStatus::Open));
        assert_eq!(status_filter(Some("closed")), Some(TicketStatus::Closed));
        assert_eq!(status_filter(Some("all")), None);
        assert_eq!(status_filter(None), None);
    }
}
