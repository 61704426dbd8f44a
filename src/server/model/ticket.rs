//! Ticket domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    model::ticket::{TicketDetailDto, TicketDto, TicketMessageDto, TicketResponseDto},
    server::{
        error::{internal::InternalError, AppError},
        util::parse::{parse_optional_u64, parse_u64_from_string},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(InternalError::UnknownStoredValue {
                kind: "ticket status",
                value: other.to_string(),
            }),
        }
    }
}

/// Support ticket opened from a panel option.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    pub bot_id: i32,
    pub guild_id: u64,
    /// Ticket channel or private thread.
    pub channel_id: u64,
    /// Member who opened the ticket.
    pub user_id: u64,
    pub panel_id: Option<i32>,
    pub option_id: Option<i32>,
    pub ticket_number: i32,
    pub status: TicketStatus,
    pub claimed_by: Option<u64>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Staff member id, or `Auto-Close` for inactivity closes.
    pub closed_by: Option<String>,
    pub close_reason: Option<String>,
    pub transcript_url: Option<String>,
    pub last_activity: DateTime<Utc>,
    pub first_response_at: Option<DateTime<Utc>>,
    pub response_time_seconds: Option<i64>,
    /// Set once the inactivity warning has been posted; cleared by new activity.
    pub warned_auto_close: bool,
}

impl Ticket {
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            bot_id: entity.bot_id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            user_id: parse_u64_from_string(entity.user_id)?,
            panel_id: entity.panel_id,
            option_id: entity.option_id,
            ticket_number: entity.ticket_number,
            status: entity.status.parse()?,
            claimed_by: parse_optional_u64(entity.claimed_by)?,
            opened_at: entity.opened_at,
            closed_at: entity.closed_at,
            closed_by: entity.closed_by,
            close_reason: entity.close_reason,
            transcript_url: entity.transcript_url,
            last_activity: entity.last_activity,
            first_response_at: entity.first_response_at,
            response_time_seconds: entity.response_time_seconds,
            warned_auto_close: entity.warned_auto_close,
        })
    }

    pub fn is_open(&self) -> bool {
        self.status == TicketStatus::Open
    }

    /// Four-digit display number, e.g. `0042`.
    pub fn padded_number(&self) -> String {
        format!("{:04}", self.ticket_number)
    }

    pub fn into_dto(self) -> TicketDto {
        TicketDto {
            id: self.id,
            guild_id: self.guild_id.to_string(),
            channel_id: self.channel_id.to_string(),
            user_id: self.user_id.to_string(),
            panel_id: self.panel_id,
            option_id: self.option_id,
            ticket_number: self.ticket_number,
            status: self.status.as_str().to_string(),
            claimed_by: self.claimed_by.map(|id| id.to_string()),
            opened_at: self.opened_at,
            closed_at: self.closed_at,
            closed_by: self.closed_by,
            close_reason: self.close_reason,
            transcript_url: self.transcript_url,
            last_activity: self.last_activity,
            response_time_seconds: self.response_time_seconds,
        }
    }
}

/// Answer to one intake question.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketResponse {
    pub question: String,
    pub response: String,
}

impl TicketResponse {
    pub fn from_entity(entity: entity::ticket_response::Model) -> Self {
        Self {
            question: entity.question,
            response: entity.response,
        }
    }

    pub fn into_dto(self) -> TicketResponseDto {
        TicketResponseDto {
            question: self.question,
            response: self.response,
        }
    }
}

/// Parameters for recording a newly created ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketParam {
    pub bot_id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub user_id: u64,
    pub panel_id: Option<i32>,
    pub option_id: Option<i32>,
    pub ticket_number: i32,
    pub responses: Vec<TicketResponse>,
}

/// Parameters for closing a ticket.
#[derive(Debug, Clone)]
pub struct CloseTicketParam {
    pub closed_by: String,
    pub reason: String,
}

/// Author details captured in a transcript snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotAuthor {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
    pub bot: bool,
}

/// One message archived when a ticket closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSnapshot {
    pub id: String,
    pub content: String,
    pub author: SnapshotAuthor,
    /// Unix milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub embeds: usize,
    #[serde(default)]
    pub mentions: Vec<String>,
}

impl MessageSnapshot {
    pub fn into_dto(self) -> TicketMessageDto {
        TicketMessageDto {
            id: self.id,
            content: self.content,
            author_id: self.author.id,
            author_username: self.author.username,
            author_avatar: self.author.avatar,
            author_bot: self.author.bot,
            timestamp: self.timestamp,
            attachments: self.attachments,
        }
    }
}

/// Encodes a snapshot for the ticket's `messages` column.
pub fn encode_snapshot(messages: &[MessageSnapshot]) -> Result<String, AppError> {
    Ok(serde_json::to_string(messages)?)
}

/// Decodes the `messages` column. A missing column yields no messages.
pub fn decode_snapshot(value: Option<&str>) -> Result<Vec<MessageSnapshot>, AppError> {
    match value {
        Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(json)?),
        _ => Ok(Vec::new()),
    }
}

/// Ticket plus the records shown on its detail page.
#[derive(Debug, Clone)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub responses: Vec<TicketResponse>,
    pub participants: Vec<u64>,
    pub messages: Vec<MessageSnapshot>,
}

impl TicketDetail {
    pub fn into_dto(self) -> TicketDetailDto {
        let archived = !self.ticket.is_open();
        TicketDetailDto {
            ticket: self.ticket.into_dto(),
            responses: self.responses.into_iter().map(TicketResponse::into_dto).collect(),
            participants: self.participants.iter().map(|id| id.to_string()).collect(),
            messages: self.messages.into_iter().map(MessageSnapshot::into_dto).collect(),
            archived,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MessageSnapshot {
        MessageSnapshot {
            id: "1".to_string(),
            content: "hello".to_string(),
            author: SnapshotAuthor {
                id: "2".to_string(),
                username: "alice".to_string(),
                avatar: None,
                bot: false,
            },
            timestamp: 1_700_000_000_000,
            attachments: vec!["https://cdn.example/a.png".to_string()],
            embeds: 0,
            mentions: vec![],
        }
    }

    #[test]
    fn snapshot_column_decodes_what_was_encoded() {
        let encoded = encode_snapshot(&[snapshot()]).unwrap();
        assert_eq!(decode_snapshot(Some(&encoded)).unwrap(), vec![snapshot()]);
    }

    #[test]
    fn empty_snapshot_column_has_no_messages() {
        assert!(decode_snapshot(None).unwrap().is_empty());
        assert!(decode_snapshot(Some("")).unwrap().is_empty());
    }

    #[test]
    fn ticket_number_is_zero_padded() {
        let ticket = Ticket {
            id: 1,
            bot_id: 1,
            guild_id: 1,
            channel_id: 1,
            user_id: 1,
            panel_id: None,
            option_id: None,
            ticket_number: 42,
            status: TicketStatus::Open,
            claimed_by: None,
            opened_at: Utc::now(),
            closed_at: None,
            closed_by: None,
            close_reason: None,
            transcript_url: None,
            last_activity: Utc::now(),
            first_response_at: None,
            response_time_seconds: None,
            warned_auto_close: false,
        };
        assert_eq!(ticket.padded_number(), "0042");
    }
}
