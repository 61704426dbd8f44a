use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures starting, stopping or registering a tenant bot.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Bot is already running")]
    AlreadyRunning,

    #[error("Bot is not running")]
    NotRunning,

    #[error("Invalid bot token. Please check the token in the Discord Developer Portal.")]
    InvalidToken,

    #[error(
        "Disallowed intents. Enable the Server Members and Message Content intents in the Discord Developer Portal."
    )]
    DisallowedIntents,

    #[error("Discord is rate limiting this bot. Please try again later.")]
    RateLimited,

    #[error("Bot token must be between 50 and 120 characters")]
    TokenLength,

    #[error("The provided token does not belong to a bot account")]
    NotABot,

    #[error("Bot limit reached ({0} bots)")]
    LimitReached(i32),

    #[error("Failed to connect bot: {0}")]
    Gateway(String),
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::AlreadyRunning | Self::NotRunning => StatusCode::CONFLICT,
            Self::LimitReached(_) => StatusCode::FORBIDDEN,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidToken | Self::DisallowedIntents | Self::TokenLength | Self::NotABot => {
                StatusCode::BAD_REQUEST
            }
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
