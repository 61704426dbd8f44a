use crate::server::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{
        CloseTicketParam, CreateTicketParam, MessageSnapshot, SnapshotAuthor, TicketResponse,
        TicketStatus,
    },
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod close;
mod create;
mod find_open_for_user_option;
mod get_paginated;
mod open_per_option;
mod participants;
mod record_activity;
mod stats;
