use crate::server::{
    data::guild::GuildRepository,
    error::AppError,
    model::guild::{UpdateGuildSettingsParam, VouchSettings},
};
use test_utils::{builder::TestBuilder, factory};

mod next_ticket_number;
mod update_settings;
mod upsert;
