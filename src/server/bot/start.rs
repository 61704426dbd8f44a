use reqwest::StatusCode;
use serenity::{
    all::{ActivityData, Client, CurrentUser, GatewayIntents, OnlineStatus},
    gateway::GatewayError,
    http::HttpError,
};
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    bot::{handler::Handler, manager::BotRuntime},
    error::{bot::BotError, AppError},
    model::bot::{ActivityKind, BotPresence, PresenceStatus},
};

const STREAM_URL: &str = "https://twitch.tv/discord";
const DISCORD_API: &str = "https://discord.com/api/v10";

/// Gateway intents every tenant bot connects with.
///
/// `GUILD_MEMBERS` and `MESSAGE_CONTENT` are privileged and must be enabled
/// in the Discord Developer Portal for each bot application.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_EMOJIS_AND_STICKERS
        | GatewayIntents::GUILD_INVITES
}

/// Identity of a bot account as reported by `GET /users/@me`.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub id: u64,
    pub name: String,
    pub avatar: Option<String>,
    pub is_bot: bool,
}

/// Checks a token against `GET /users/@me`.
///
/// # Returns
/// - `Ok(BotIdentity)` - Token is valid
/// - `Err(AppError::BotErr(_))` - Token rejected or Discord rate limited the request
/// - `Err(AppError::ReqwestErr(_))` - Discord could not be reached
pub async fn verify_token(client: &reqwest::Client, token: &str) -> Result<BotIdentity, AppError> {
    let response = client
        .get(format!("{}/users/@me", DISCORD_API))
        .header("Authorization", format!("Bot {}", token))
        .send()
        .await?;

    match response.status() {
        StatusCode::UNAUTHORIZED => return Err(BotError::InvalidToken.into()),
        StatusCode::TOO_MANY_REQUESTS => return Err(BotError::RateLimited.into()),
        status if !status.is_success() => {
            return Err(BotError::Gateway(format!("Discord returned {}", status)).into())
        }
        _ => {}
    }

    let user = response.json::<CurrentUser>().await?;

    Ok(BotIdentity {
        id: user.id.get(),
        name: user.name.clone(),
        avatar: user.avatar_url(),
        is_bot: user.bot,
    })
}

/// Builds a gateway client for one tenant bot.
///
/// The client is not started; the caller spawns `client.start()`.
pub async fn build_client(
    token: &str,
    db: DatabaseConnection,
    runtime: Arc<BotRuntime>,
    presence: &BotPresence,
) -> Result<Client, AppError> {
    let client = Client::builder(token, intents())
        .event_handler(Handler::new(db, runtime))
        .activity(activity_data(presence))
        .status(online_status(presence.status))
        .await?;

    Ok(client)
}

pub fn activity_data(presence: &BotPresence) -> ActivityData {
    let name = presence.activity_name.as_str();
    match presence.activity {
        ActivityKind::Playing => ActivityData::playing(name),
        ActivityKind::Streaming => {
            ActivityData::streaming(name, STREAM_URL).unwrap_or_else(|_| ActivityData::playing(name))
        }
        ActivityKind::Listening => ActivityData::listening(name),
        ActivityKind::Watching => ActivityData::watching(name),
        ActivityKind::Competing => ActivityData::competing(name),
    }
}

pub fn online_status(status: PresenceStatus) -> OnlineStatus {
    match status {
        PresenceStatus::Online => OnlineStatus::Online,
        PresenceStatus::Idle => OnlineStatus::Idle,
        PresenceStatus::DoNotDisturb => OnlineStatus::DoNotDisturb,
        PresenceStatus::Invisible => OnlineStatus::Invisible,
    }
}

/// Maps connection failures to messages a dashboard user can act on.
pub fn friendly_error(err: &serenity::Error) -> BotError {
    match err {
        serenity::Error::Gateway(
            GatewayError::DisallowedGatewayIntents | GatewayError::InvalidGatewayIntents,
        ) => BotError::DisallowedIntents,
        serenity::Error::Gateway(GatewayError::InvalidAuthentication) => BotError::InvalidToken,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            match response.status_code.as_u16() {
                401 => BotError::InvalidToken,
                429 => BotError::RateLimited,
                _ => BotError::Gateway(err.to_string()),
            }
        }
        _ => BotError::Gateway(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_gateway_rejections() {
        let intents = serenity::Error::Gateway(GatewayError::DisallowedGatewayIntents);
        let auth = serenity::Error::Gateway(GatewayError::InvalidAuthentication);
        let other = serenity::Error::Gateway(GatewayError::NoAuthentication);

        assert!(matches!(friendly_error(&intents), BotError::DisallowedIntents));
        assert!(matches!(friendly_error(&auth), BotError::InvalidToken));
        assert!(matches!(friendly_error(&other), BotError::Gateway(_)));
    }

    #[test]
    fn maps_presence_kinds() {
        let presence = BotPresence {
            activity: ActivityKind::Watching,
            activity_name: "tickets".to_string(),
            status: PresenceStatus::DoNotDisturb,
        };

        let activity = activity_data(&presence);
        assert_eq!(activity.name, "tickets");
        assert_eq!(online_status(presence.status), OnlineStatus::DoNotDisturb);
        assert!(intents().contains(GatewayIntents::MESSAGE_CONTENT));
    }
}
