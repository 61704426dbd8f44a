use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::guild::{GuildConfigDto, UpdateGuildSettingsDto},
    server::{
        controller::{owned_bot, running_http},
        error::AppError,
        middleware::auth::AuthGuard,
        service::{guild::GuildService, stats::StatsService},
        state::AppState,
    },
};

/// GET /api/bots/{bot_id}/guilds - Guilds the bot has joined
pub async fn list_guilds(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(bot_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let guilds: Vec<GuildConfigDto> = GuildService::new(&state.db, bot.id)
        .list()
        .await?
        .into_iter()
        .map(|guild| guild.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(guilds)))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id} - Live guild details
///
/// Needs the bot to be running.
pub async fn get_guild_info(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    GuildService::new(&state.db, bot.id).config(guild_id).await?;
    let http = running_http(&state, bot.id).await?;

    let info = GuildService::info(&http, guild_id).await?;

    Ok((StatusCode::OK, Json(info)))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/channels
pub async fn get_guild_channels(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    GuildService::new(&state.db, bot.id).config(guild_id).await?;
    let http = running_http(&state, bot.id).await?;

    let channels = GuildService::channels(&http, guild_id).await?;

    Ok((StatusCode::OK, Json(channels)))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/roles
pub async fn get_guild_roles(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    GuildService::new(&state.db, bot.id).config(guild_id).await?;
    let http = running_http(&state, bot.id).await?;

    let roles = GuildService::roles(&http, guild_id).await?;

    Ok((StatusCode::OK, Json(roles)))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/emojis
pub async fn get_guild_emojis(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    GuildService::new(&state.db, bot.id).config(guild_id).await?;
    let http = running_http(&state, bot.id).await?;

    let emojis = GuildService::emojis(&http, guild_id).await?;

    Ok((StatusCode::OK, Json(emojis)))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/config - Stored ticket configuration
pub async fn get_guild_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let config = GuildService::new(&state.db, bot.id).config(guild_id).await?;

    Ok((StatusCode::OK, Json(config.into_dto())))
}

/// PUT /api/bots/{bot_id}/guilds/{guild_id}/settings - Update ticket settings
///
/// Only the fields of `UpdateGuildSettingsDto` can be changed; the ticket
/// counter and guild name are managed by the bot.
///
/// # Returns
/// - `200 OK`: Updated configuration
/// - `400 Bad Request`: Invalid snowflake, language or auto-close hours
/// - `404 Not Found`: Guild unknown to the bot
pub async fn update_guild_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
    Json(payload): Json<UpdateGuildSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let config = GuildService::new(&state.db, bot.id)
        .update_settings(guild_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(config.into_dto())))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/stats - Ticket totals and 7-day activity
pub async fn get_guild_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let stats = StatsService::new(&state.db, bot.id)
        .guild_stats(guild_id)
        .await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}
