//! HTTP handlers for the dashboard API.
//!
//! Every handler authenticates through [`AuthGuard`](crate::server::middleware::auth::AuthGuard).
//! Routes below `/api/bots/{bot_id}` additionally resolve the bot and check that the
//! caller owns it.

use serenity::http::Http;
use std::sync::Arc;

use crate::server::{
    error::{bot::BotError, AppError},
    model::{bot::Bot, user::User},
    service::bot::BotService,
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod bot;
pub mod command;
pub mod community;
pub mod embed;
pub mod guild;
pub mod panel;
pub mod ticket;

/// Bot addressed by the route, if the user may manage it.
pub(crate) async fn owned_bot(state: &AppState, user: &User, bot_id: i32) -> Result<Bot, AppError> {
    BotService::new(&state.db, &state.bots, &state.cipher)
        .find_owned(user, bot_id)
        .await
}

/// HTTP client of a running bot, for operations that talk to Discord.
pub(crate) async fn running_http(state: &AppState, bot_id: i32) -> Result<Arc<Http>, AppError> {
    state
        .bots
        .http(bot_id)
        .await
        .ok_or_else(|| BotError::NotRunning.into())
}
