//! Closing tickets, transcripts and the delayed archive of the channel.

use std::time::Duration;

use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, CreateAttachment, CreateEmbed, CreateMessage, GetMessages, Message},
    http::Http,
};

use crate::server::{
    data::ticket::TicketRepository,
    error::AppError,
    model::{
        guild::GuildConfig,
        ticket::{CloseTicketParam, MessageSnapshot, SnapshotAuthor, Ticket},
    },
    util::{locale::Language, transcript::render_transcript},
};

use super::{builder::TicketMessageBuilder, TicketService};

/// Delay between the close announcement and deletion of the channel.
pub const CLOSE_DELAY: Duration = Duration::from_secs(5);
/// Messages kept in a closed ticket's snapshot.
pub const SNAPSHOT_LIMIT: u8 = 100;

pub const DEFAULT_REASON: &str = "No reason provided";
pub const DASHBOARD_REASON: &str = "Web Dashboard";
pub const AUTO_CLOSE_REASON: &str = "Ticket closed due to inactivity";
pub const AUTO_CLOSE_BY: &str = "Auto-Close";

/// Who closed a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closer {
    /// Guild member using a button or command.
    Member(u64),
    /// Dashboard account.
    Dashboard(i32),
    AutoClose,
}

impl Closer {
    /// Value stored in the ticket's `closed_by` column.
    pub fn stored(&self) -> String {
        match self {
            Self::Member(id) => id.to_string(),
            Self::Dashboard(user_id) => format!("dashboard:{}", user_id),
            Self::AutoClose => AUTO_CLOSE_BY.to_string(),
        }
    }

    /// Name shown in embeds.
    pub fn display(&self) -> String {
        match self {
            Self::Member(id) => format!("<@{}>", id),
            Self::Dashboard(_) => DASHBOARD_REASON.to_string(),
            Self::AutoClose => AUTO_CLOSE_BY.to_string(),
        }
    }

    /// Reason stored on the ticket when the closer gave none.
    pub fn reason(&self, given: Option<&str>) -> String {
        if *self == Self::AutoClose {
            return AUTO_CLOSE_REASON.to_string();
        }

        match given.map(str::trim).filter(|reason| !reason.is_empty()) {
            Some(reason) => reason.to_string(),
            None => match self {
                Self::Dashboard(_) => DASHBOARD_REASON.to_string(),
                _ => DEFAULT_REASON.to_string(),
            },
        }
    }
}

/// A ticket that has just been closed.
#[derive(Debug, Clone)]
pub struct ClosedTicket {
    pub ticket_number: i32,
    pub closer: Closer,
    pub reason: String,
    pub transcript_url: Option<String>,
}

impl ClosedTicket {
    /// Announcement posted in the ticket channel before it is deleted.
    pub fn embed(&self, language: Language) -> CreateEmbed {
        match self.closer {
            Closer::AutoClose => {
                TicketMessageBuilder::auto_close_embed(language, self.transcript_url.as_deref())
            }
            _ => TicketMessageBuilder::close_embed(
                self.ticket_number,
                &self.closer.display(),
                &self.reason,
                self.transcript_url.as_deref(),
            ),
        }
    }
}

/// Converts a fetched Discord message into its archived form.
pub fn snapshot_message(message: &Message) -> MessageSnapshot {
    MessageSnapshot {
        id: message.id.to_string(),
        content: message.content.clone(),
        author: SnapshotAuthor {
            id: message.author.id.to_string(),
            username: message.author.name.clone(),
            avatar: message.author.avatar_url(),
            bot: message.author.bot,
        },
        timestamp: message.timestamp.unix_timestamp() * 1000,
        attachments: message
            .attachments
            .iter()
            .map(|attachment| attachment.url.clone())
            .collect(),
        embeds: message.embeds.len(),
        mentions: message
            .mentions
            .iter()
            .map(|user| user.id.to_string())
            .collect(),
    }
}

/// Fetches the latest messages of a channel, oldest first.
pub async fn fetch_snapshot(
    http: &Http,
    channel_id: u64,
) -> Result<Vec<MessageSnapshot>, AppError> {
    let mut messages = ChannelId::new(channel_id)
        .messages(http, GetMessages::new().limit(SNAPSHOT_LIMIT))
        .await?;
    messages.reverse();

    Ok(messages.iter().map(snapshot_message).collect())
}

/// Saves the snapshot of a closed ticket and deletes its channel.
///
/// A failed snapshot is logged and the channel is deleted regardless.
async fn archive_and_delete(db: &DatabaseConnection, http: &Http, ticket_id: i32, channel_id: u64) {
    match fetch_snapshot(http, channel_id).await {
        Ok(messages) => {
            if let Err(e) = TicketRepository::new(db)
                .save_snapshot(ticket_id, &messages)
                .await
            {
                tracing::error!("Failed to save snapshot of ticket {}: {}", ticket_id, e);
            }
        }
        Err(e) => tracing::error!("Failed to fetch messages of ticket {}: {}", ticket_id, e),
    }

    if let Err(e) = ChannelId::new(channel_id).delete(http).await {
        tracing::error!(
            "Failed to delete channel {} of closed ticket {}: {}",
            channel_id,
            ticket_id,
            e
        );
    }
}

impl<'a> TicketService<'a> {
    /// Closes a ticket.
    ///
    /// Marks the ticket closed, posts the transcript to the guild's transcript
    /// channel, logs the close and schedules the snapshot and channel deletion
    /// after [`CLOSE_DELAY`]. The close announcement is left to the caller.
    ///
    /// # Arguments
    /// - `ticket` - Ticket to close
    /// - `closer` - Who closes it
    /// - `reason` - Reason given by the closer
    ///
    /// # Returns
    /// - `Ok(ClosedTicket)` - Close details for the announcement
    /// - `Err(AppError::BadRequest)` - Ticket is not open
    /// - `Err(AppError)` - Database error
    pub async fn close(
        &self,
        ticket: &Ticket,
        closer: Closer,
        reason: Option<&str>,
    ) -> Result<ClosedTicket, AppError> {
        if !ticket.is_open() {
            return Err(AppError::BadRequest("Ticket is already closed".to_string()));
        }

        let reason = closer.reason(reason);
        let closed = TicketRepository::new(self.db)
            .close(
                ticket.id,
                CloseTicketParam {
                    closed_by: closer.stored(),
                    reason: reason.clone(),
                },
            )
            .await?;
        if !closed {
            return Err(AppError::BadRequest("Ticket is already closed".to_string()));
        }

        let guild = self.guild_config(ticket.guild_id).await?;
        let transcript_url = self.post_transcript(ticket, guild.as_ref(), closer).await;

        let log_reason = match closer {
            Closer::AutoClose => "Inactivity",
            _ => reason.as_str(),
        };
        self.log_action(
            guild.as_ref(),
            TicketMessageBuilder::log_closed_embed(
                ticket.ticket_number,
                &closer.display(),
                log_reason,
                transcript_url.as_deref(),
            ),
        )
        .await;

        let db = self.db.clone();
        let http = self.http.clone();
        let (ticket_id, channel_id) = (ticket.id, ticket.channel_id);
        tokio::spawn(async move {
            tokio::time::sleep(CLOSE_DELAY).await;
            archive_and_delete(&db, &http, ticket_id, channel_id).await;
        });

        tracing::info!(
            "Closed ticket {} in guild {} by {}",
            ticket.id,
            ticket.guild_id,
            closer.stored()
        );

        Ok(ClosedTicket {
            ticket_number: ticket.ticket_number,
            closer,
            reason,
            transcript_url,
        })
    }

    /// Closes a ticket and posts the close embed in its channel.
    ///
    /// Used where no interaction is waiting for a reply.
    pub async fn close_and_announce(
        &self,
        ticket: &Ticket,
        closer: Closer,
        reason: Option<&str>,
    ) -> Result<ClosedTicket, AppError> {
        let closed = self.close(ticket, closer, reason).await?;
        let language = self.language(ticket.guild_id).await;

        if let Err(e) = ChannelId::new(ticket.channel_id)
            .send_message(&self.http, CreateMessage::new().embed(closed.embed(language)))
            .await
        {
            tracing::warn!("Failed to announce close of ticket {}: {}", ticket.id, e);
        }

        Ok(closed)
    }

    /// Renders the current channel history as an HTML file.
    pub async fn transcript_file(&self, ticket: &Ticket) -> Result<CreateAttachment, AppError> {
        let guild_name = self
            .guild_config(ticket.guild_id)
            .await?
            .map(|guild| guild.name)
            .unwrap_or_default();

        self.render_attachment(ticket, &guild_name).await
    }

    async fn render_attachment(
        &self,
        ticket: &Ticket,
        guild_name: &str,
    ) -> Result<CreateAttachment, AppError> {
        let messages = fetch_snapshot(&self.http, ticket.channel_id).await?;
        let channel_name = ChannelId::new(ticket.channel_id)
            .to_channel(&self.http)
            .await
            .ok()
            .and_then(|channel| channel.guild())
            .map(|channel| channel.name)
            .unwrap_or_else(|| format!("ticket-{}", ticket.padded_number()));

        let html = render_transcript(guild_name, &channel_name, ticket.ticket_number, &messages);

        Ok(CreateAttachment::bytes(
            html.into_bytes(),
            format!("transcript-{}.html", ticket.ticket_number),
        ))
    }

    /// Posts the transcript to the transcript channel and stores its URL.
    ///
    /// Failures are logged; the close goes ahead without a transcript.
    async fn post_transcript(
        &self,
        ticket: &Ticket,
        guild: Option<&GuildConfig>,
        closer: Closer,
    ) -> Option<String> {
        let guild = guild?;
        let channel_id = guild.transcript_channel_id?;

        let attachment = match self.render_attachment(ticket, &guild.name).await {
            Ok(attachment) => attachment,
            Err(e) => {
                tracing::warn!("Failed to render transcript of ticket {}: {}", ticket.id, e);
                return None;
            }
        };

        let mut content = format!("📋 Transcript for Ticket #{}", ticket.ticket_number);
        if closer == Closer::AutoClose {
            content.push_str(" (Auto-closed)");
        }

        let sent = match ChannelId::new(channel_id)
            .send_message(
                &self.http,
                CreateMessage::new().content(content).add_file(attachment),
            )
            .await
        {
            Ok(sent) => sent,
            Err(e) => {
                tracing::warn!("Failed to post transcript of ticket {}: {}", ticket.id, e);
                return None;
            }
        };

        let url = sent
            .attachments
            .first()
            .map(|attachment| attachment.url.clone())
            .unwrap_or_else(|| sent.link());

        if let Err(e) = TicketRepository::new(self.db)
            .set_transcript_url(ticket.id, &url)
            .await
        {
            tracing::warn!("Failed to store transcript url of ticket {}: {}", ticket.id, e);
        }

        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_by_is_stored_per_closer() {
        assert_eq!(Closer::Member(42).stored(), "42");
        assert_eq!(Closer::Dashboard(3).stored(), "dashboard:3");
        assert_eq!(Closer::AutoClose.stored(), "Auto-Close");

        assert_eq!(Closer::Member(42).display(), "<@42>");
        assert_eq!(Closer::Dashboard(3).display(), "Web Dashboard");
    }

    #[test]
    fn reasons_default_per_closer() {
        assert_eq!(Closer::Member(1).reason(None), "No reason provided");
        assert_eq!(Closer::Member(1).reason(Some("  ")), "No reason provided");
        assert_eq!(Closer::Member(1).reason(Some("solved")), "solved");
        assert_eq!(Closer::Dashboard(1).reason(None), "Web Dashboard");
        assert_eq!(
            Closer::AutoClose.reason(Some("ignored")),
            "Ticket closed due to inactivity"
        );
    }
}
