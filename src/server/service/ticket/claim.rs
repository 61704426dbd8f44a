use serenity::all::{ChannelId, CreateEmbed, CreateMessage, EditMessage, MessageId};

use crate::server::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::Ticket,
    util::locale::{Language, Text},
};

use super::{builder::TicketMessageBuilder, TicketService};

/// Result of a claim or unclaim request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Done,
    /// Reply shown to the staff member instead.
    Refused(String),
}

/// Checks whether `staff_id` may claim the ticket.
pub fn check_claim(ticket: &Ticket, language: Language) -> Result<(), String> {
    if !ticket.is_open() {
        return Err(language.get(Text::AlreadyClosed).to_string());
    }

    match ticket.claimed_by {
        Some(claimer) => Err(language.format(
            Text::AlreadyClaimed,
            &[("user", &format!("<@{}>", claimer))],
        )),
        None => Ok(()),
    }
}

/// Checks whether `staff_id` may release the ticket; only the claimer can.
pub fn check_unclaim(ticket: &Ticket, staff_id: u64, language: Language) -> Result<(), String> {
    if !ticket.is_open() {
        return Err(language.get(Text::AlreadyClosed).to_string());
    }

    if ticket.claimed_by != Some(staff_id) {
        return Err(language.get(Text::NotClaimer).to_string());
    }

    Ok(())
}

impl<'a> TicketService<'a> {
    /// Claims a ticket for a staff member.
    ///
    /// Swaps the buttons of the welcome message to Close/Unclaim/Transcript
    /// and announces the claim in the ticket channel.
    ///
    /// # Arguments
    /// - `ticket` - Ticket to claim
    /// - `staff_id` - Staff member claiming it
    /// - `button_message` - Message carrying the ticket buttons, if known
    ///
    /// # Returns
    /// - `Ok(ClaimOutcome::Done)` - Ticket claimed
    /// - `Ok(ClaimOutcome::Refused)` - Ticket closed or already claimed
    /// - `Err(AppError)` - Database error
    pub async fn claim(
        &self,
        ticket: &Ticket,
        staff_id: u64,
        button_message: Option<u64>,
    ) -> Result<ClaimOutcome, AppError> {
        let language = self.language(ticket.guild_id).await;
        if let Err(reply) = check_claim(ticket, language) {
            return Ok(ClaimOutcome::Refused(reply));
        }

        TicketRepository::new(self.db)
            .set_claim(ticket.id, Some(staff_id))
            .await?;

        self.swap_buttons(ticket.channel_id, button_message, true).await;
        self.announce(ticket.channel_id, TicketMessageBuilder::claimed_embed(staff_id))
            .await;

        tracing::info!("Ticket {} claimed by {}", ticket.id, staff_id);

        Ok(ClaimOutcome::Done)
    }

    /// Releases a claimed ticket.
    ///
    /// # Returns
    /// - `Ok(ClaimOutcome::Done)` - Claim cleared
    /// - `Ok(ClaimOutcome::Refused)` - Caller is not the claimer
    /// - `Err(AppError)` - Database error
    pub async fn unclaim(
        &self,
        ticket: &Ticket,
        staff_id: u64,
        button_message: Option<u64>,
    ) -> Result<ClaimOutcome, AppError> {
        let language = self.language(ticket.guild_id).await;
        if let Err(reply) = check_unclaim(ticket, staff_id, language) {
            return Ok(ClaimOutcome::Refused(reply));
        }

        TicketRepository::new(self.db).set_claim(ticket.id, None).await?;

        self.swap_buttons(ticket.channel_id, button_message, false).await;
        self.announce(ticket.channel_id, TicketMessageBuilder::unclaimed_embed(staff_id))
            .await;

        tracing::info!("Ticket {} unclaimed by {}", ticket.id, staff_id);

        Ok(ClaimOutcome::Done)
    }

    async fn swap_buttons(&self, channel_id: u64, message_id: Option<u64>, claimed: bool) {
        let Some(message_id) = message_id else {
            return;
        };

        if let Err(e) = ChannelId::new(channel_id)
            .edit_message(
                &self.http,
                MessageId::new(message_id),
                EditMessage::new().components(vec![TicketMessageBuilder::action_row(claimed)]),
            )
            .await
        {
            tracing::warn!("Failed to update buttons in ticket channel {}: {}", channel_id, e);
        }
    }

    async fn announce(&self, channel_id: u64, embed: CreateEmbed) {
        if let Err(e) = ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::warn!("Failed to post to ticket channel {}: {}", channel_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::ticket::TicketStatus;
    use chrono::Utc;

    fn ticket(claimed_by: Option<u64>) -> Ticket {
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
            claimed_by,
            opened_at: Utc::now(),
            closed_at: None,
            closed_by: None,
            close_reason: None,
            transcript_url: None,
            last_activity: Utc::now(),
            first_response_at: None,
            response_time_seconds: None,
            warned_auto_close: false,
        }
    }

    #[test]
    fn claimed_ticket_names_the_claimer() {
        let reply = check_claim(&ticket(Some(9)), Language::English).unwrap_err();
        assert_eq!(reply, "❌ This ticket is already claimed by <@9>");
        assert!(check_claim(&ticket(None), Language::English).is_ok());
    }

    #[test]
    fn only_claimer_can_unclaim() {
        assert!(check_unclaim(&ticket(Some(9)), 9, Language::English).is_ok());
        assert!(check_unclaim(&ticket(Some(9)), 8, Language::English).is_err());
        assert!(check_unclaim(&ticket(None), 9, Language::English).is_err());
    }

    #[test]
    fn closed_ticket_cannot_be_claimed() {
        let mut closed = ticket(None);
        closed.status = TicketStatus::Closed;

        assert_eq!(
            check_claim(&closed, Language::English),
            Err("❌ This ticket is already closed.".to_string())
        );
    }
}
