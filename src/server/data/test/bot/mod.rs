use crate::server::{
    data::bot::BotRepository,
    error::AppError,
    model::bot::{ActivityKind, BotPresence, BotStatus, CreateBotParam, PresenceStatus},
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod status;
