//! Ticket repository.
//!
//! Persists the ticket lifecycle: creation with intake responses, claim state,
//! activity tracking for auto-close, closing and the archived message snapshot.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::{
        stats::TicketTimes,
        ticket::{
            decode_snapshot, encode_snapshot, CloseTicketParam, CreateTicketParam, MessageSnapshot, Ticket,
            TicketResponse, TicketStatus,
        },
    },
    util::parse::parse_u64_from_string,
};

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a new open ticket with its intake responses.
    ///
    /// The opener is stored as the first participant.
    ///
    /// # Arguments
    /// - `param` - Ticket location, opener, reserved number and responses
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created ticket
    /// - `Err(AppError::DbErr)` - Database error, including a duplicate channel id
    pub async fn create(&self, param: CreateTicketParam) -> Result<Ticket, AppError> {
        let now = Utc::now();
        let entity = entity::ticket::ActiveModel {
            bot_id: ActiveValue::Set(param.bot_id),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            panel_id: ActiveValue::Set(param.panel_id),
            option_id: ActiveValue::Set(param.option_id),
            ticket_number: ActiveValue::Set(param.ticket_number),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            claimed_by: ActiveValue::Set(None),
            opened_at: ActiveValue::Set(now),
            closed_at: ActiveValue::Set(None),
            closed_by: ActiveValue::Set(None),
            close_reason: ActiveValue::Set(None),
            transcript_url: ActiveValue::Set(None),
            last_activity: ActiveValue::Set(now),
            first_response_at: ActiveValue::Set(None),
            response_time_seconds: ActiveValue::Set(None),
            warned_auto_close: ActiveValue::Set(false),
            messages: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for response in param.responses {
            entity::ticket_response::ActiveModel {
                ticket_id: ActiveValue::Set(entity.id),
                question: ActiveValue::Set(response.question),
                response: ActiveValue::Set(response.response),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        self.add_participant(entity.id, param.user_id, None).await?;

        Ticket::from_entity(entity)
    }

    pub async fn find_by_id(&self, ticket_id: i32) -> Result<Option<Ticket>, AppError> {
        entity::prelude::Ticket::find_by_id(ticket_id)
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Finds the ticket that owns a channel or thread.
    pub async fn find_by_channel(&self, channel_id: u64) -> Result<Option<Ticket>, AppError> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Finds the user's open ticket for a panel option, if any.
    pub async fn find_open_for_user_option(
        &self,
        bot_id: i32,
        guild_id: u64,
        user_id: u64,
        option_id: i32,
    ) -> Result<Option<Ticket>, AppError> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::BotId.eq(bot_id))
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::UserId.eq(user_id.to_string()))
            .filter(entity::ticket::Column::OptionId.eq(option_id))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open.as_str()))
            .one(self.db)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Finds a ticket by its guild-scoped number along with its archived messages.
    ///
    /// # Returns
    /// - `Ok(Some((ticket, snapshot)))` - Ticket and stored snapshot (empty while open)
    /// - `Ok(None)` - No ticket with that number
    pub async fn find_by_number(
        &self,
        bot_id: i32,
        guild_id: u64,
        ticket_number: i32,
    ) -> Result<Option<(Ticket, Vec<MessageSnapshot>)>, AppError> {
        let Some(entity) = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::BotId.eq(bot_id))
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::TicketNumber.eq(ticket_number))
            .order_by_desc(entity::ticket::Column::Id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let snapshot = decode_snapshot(entity.messages.as_deref())?;

        Ok(Some((Ticket::from_entity(entity)?, snapshot)))
    }

    /// Gets a guild's tickets newest first, optionally filtered by status.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Tickets per page
    ///
    /// # Returns
    /// - `Ok((tickets, total))` - Tickets on the page and the total matching count
    pub async fn get_paginated(
        &self,
        bot_id: i32,
        guild_id: u64,
        status: Option<TicketStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Ticket>, u64), AppError> {
        let mut query = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::BotId.eq(bot_id))
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()));
        if let Some(status) = status {
            query = query.filter(entity::ticket::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::ticket::Column::OpenedAt)
            .order_by_desc(entity::ticket::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let tickets = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Ticket::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((tickets, total))
    }

    /// Gets every open ticket served by a bot, used by the auto-close job.
    pub async fn get_open_by_bot(&self, bot_id: i32) -> Result<Vec<Ticket>, AppError> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::BotId.eq(bot_id))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open.as_str()))
            .order_by_asc(entity::ticket::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Ticket::from_entity)
            .collect()
    }

    /// Closes a ticket if it is still open.
    ///
    /// # Returns
    /// - `Ok(true)` - Ticket transitioned to closed
    /// - `Ok(false)` - Ticket was already closed or does not exist
    pub async fn close(&self, ticket_id: i32, param: CloseTicketParam) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .col_expr(
                entity::ticket::Column::Status,
                Expr::value(TicketStatus::Closed.as_str()),
            )
            .col_expr(entity::ticket::Column::ClosedAt, Expr::value(Utc::now()))
            .col_expr(entity::ticket::Column::ClosedBy, Expr::value(param.closed_by))
            .col_expr(entity::ticket::Column::CloseReason, Expr::value(param.reason))
            .filter(entity::ticket::Column::Id.eq(ticket_id))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Sets or clears the claiming staff member.
    pub async fn set_claim(&self, ticket_id: i32, staff_id: Option<u64>) -> Result<(), DbErr> {
        entity::prelude::Ticket::update_many()
            .col_expr(
                entity::ticket::Column::ClaimedBy,
                Expr::value(staff_id.map(|id| id.to_string())),
            )
            .filter(entity::ticket::Column::Id.eq(ticket_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn set_transcript_url(&self, ticket_id: i32, url: &str) -> Result<(), DbErr> {
        entity::prelude::Ticket::update_many()
            .col_expr(entity::ticket::Column::TranscriptUrl, Expr::value(url))
            .filter(entity::ticket::Column::Id.eq(ticket_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Stores the archived messages of a closed ticket.
    pub async fn save_snapshot(
        &self,
        ticket_id: i32,
        messages: &[MessageSnapshot],
    ) -> Result<(), AppError> {
        let encoded = encode_snapshot(messages)?;
        entity::prelude::Ticket::update_many()
            .col_expr(entity::ticket::Column::Messages, Expr::value(encoded))
            .filter(entity::ticket::Column::Id.eq(ticket_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Records a message in an open ticket channel.
    ///
    /// Refreshes `last_activity` and clears the auto-close warning. The first
    /// message from anyone other than the opener also sets the response time.
    ///
    /// # Arguments
    /// - `channel_id` - Channel the message was posted in
    /// - `author_id` - Message author
    /// - `at` - Message time
    ///
    /// # Returns
    /// - `Ok(Some(Ticket))` - Updated ticket
    /// - `Ok(None)` - Channel is not an open ticket
    pub async fn record_activity(
        &self,
        channel_id: u64,
        author_id: u64,
        at: DateTime<Utc>,
    ) -> Result<Option<Ticket>, AppError> {
        let Some(existing) = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open.as_str()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let is_owner = parse_u64_from_string(existing.user_id.clone())? == author_id;
        let needs_first_response = !is_owner && existing.first_response_at.is_none();
        let opened_at = existing.opened_at;

        let mut active: entity::ticket::ActiveModel = existing.into();
        active.last_activity = ActiveValue::Set(at);
        active.warned_auto_close = ActiveValue::Set(false);
        if needs_first_response {
            active.first_response_at = ActiveValue::Set(Some(at));
            active.response_time_seconds =
                ActiveValue::Set(Some((at - opened_at).num_seconds().max(0)));
        }

        let entity = active.update(self.db).await?;

        Ok(Some(Ticket::from_entity(entity)?))
    }

    pub async fn mark_warned(&self, ticket_id: i32) -> Result<(), DbErr> {
        entity::prelude::Ticket::update_many()
            .col_expr(entity::ticket::Column::WarnedAutoClose, Expr::value(true))
            .filter(entity::ticket::Column::Id.eq(ticket_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn responses(&self, ticket_id: i32) -> Result<Vec<TicketResponse>, DbErr> {
        let entities = entity::prelude::TicketResponse::find()
            .filter(entity::ticket_response::Column::TicketId.eq(ticket_id))
            .order_by_asc(entity::ticket_response::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(TicketResponse::from_entity).collect())
    }

    /// Adds a participant.
    ///
    /// # Returns
    /// - `Ok(true)` - Participant added
    /// - `Ok(false)` - User was already a participant
    pub async fn add_participant(
        &self,
        ticket_id: i32,
        user_id: u64,
        added_by: Option<u64>,
    ) -> Result<bool, DbErr> {
        let exists = entity::prelude::TicketParticipant::find()
            .filter(entity::ticket_participant::Column::TicketId.eq(ticket_id))
            .filter(entity::ticket_participant::Column::UserId.eq(user_id.to_string()))
            .count(self.db)
            .await?
            > 0;
        if exists {
            return Ok(false);
        }

        entity::ticket_participant::ActiveModel {
            ticket_id: ActiveValue::Set(ticket_id),
            user_id: ActiveValue::Set(user_id.to_string()),
            added_by: ActiveValue::Set(added_by.map(|id| id.to_string())),
            added_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    pub async fn remove_participant(&self, ticket_id: i32, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::TicketParticipant::delete_many()
            .filter(entity::ticket_participant::Column::TicketId.eq(ticket_id))
            .filter(entity::ticket_participant::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets participant user ids in the order they were added.
    pub async fn participants(&self, ticket_id: i32) -> Result<Vec<u64>, AppError> {
        entity::prelude::TicketParticipant::find()
            .filter(entity::ticket_participant::Column::TicketId.eq(ticket_id))
            .order_by_asc(entity::ticket_participant::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(|participant| parse_u64_from_string(participant.user_id))
            .collect()
    }

    /// Counts a guild's tickets, optionally by status.
    pub async fn count(
        &self,
        bot_id: i32,
        guild_id: u64,
        status: Option<TicketStatus>,
    ) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::BotId.eq(bot_id))
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()));
        if let Some(status) = status {
            query = query.filter(entity::ticket::Column::Status.eq(status.as_str()));
        }

        query.count(self.db).await
    }

    pub async fn count_claimed(&self, bot_id: i32, guild_id: u64) -> Result<u64, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::BotId.eq(bot_id))
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::ClaimedBy.is_not_null())
            .count(self.db)
            .await
    }

    /// Counts tickets across every tenant, optionally by status.
    pub async fn count_all(&self, status: Option<TicketStatus>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Ticket::find();
        if let Some(status) = status {
            query = query.filter(entity::ticket::Column::Status.eq(status.as_str()));
        }

        query.count(self.db).await
    }

    /// Average first-response time in whole seconds over tickets that received one.
    pub async fn average_response_seconds(
        &self,
        bot_id: i32,
        guild_id: u64,
    ) -> Result<Option<i64>, DbErr> {
        let times: Vec<Option<i64>> = entity::prelude::Ticket::find()
            .select_only()
            .column(entity::ticket::Column::ResponseTimeSeconds)
            .filter(entity::ticket::Column::BotId.eq(bot_id))
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::ResponseTimeSeconds.is_not_null())
            .into_tuple()
            .all(self.db)
            .await?;

        let times: Vec<i64> = times.into_iter().flatten().collect();
        if times.is_empty() {
            return Ok(None);
        }

        Ok(Some(times.iter().sum::<i64>() / times.len() as i64))
    }

    /// Gets open/close times of tickets opened or closed since `since`.
    pub async fn times_since(
        &self,
        bot_id: i32,
        guild_id: u64,
        since: DateTime<Utc>,
    ) -> Result<Vec<TicketTimes>, DbErr> {
        use sea_orm::ExprTrait;

        let rows: Vec<(DateTime<Utc>, Option<DateTime<Utc>>)> = entity::prelude::Ticket::find()
            .select_only()
            .column(entity::ticket::Column::OpenedAt)
            .column(entity::ticket::Column::ClosedAt)
            .filter(entity::ticket::Column::BotId.eq(bot_id))
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(
                entity::ticket::Column::OpenedAt
                    .gte(since)
                    .or(entity::ticket::Column::ClosedAt.gte(since)),
            )
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(opened_at, closed_at)| TicketTimes {
                opened_at,
                closed_at,
            })
            .collect())
    }
}
