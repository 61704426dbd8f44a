//! Welcome settings, sticky messages and invite tracking.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::community::{
        InviteJoinDto, InviteLeaderboardEntryDto, SaveStickyMessageDto, StickyMessageDto,
        WelcomeSettingsDto,
    },
    server::{
        controller::owned_bot,
        error::AppError,
        middleware::auth::AuthGuard,
        service::{invite::InviteService, sticky::StickyService, welcome::WelcomeService},
        state::AppState,
    },
};

/// GET /api/bots/{bot_id}/guilds/{guild_id}/welcome
///
/// Returns the defaults when the guild never saved settings.
pub async fn get_welcome(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let settings = WelcomeService::new(&state.db, bot.id).get(guild_id).await?;

    Ok((StatusCode::OK, Json(settings.into_dto())))
}

/// PUT /api/bots/{bot_id}/guilds/{guild_id}/welcome
pub async fn save_welcome(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
    Json(payload): Json<WelcomeSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let settings = WelcomeService::new(&state.db, bot.id)
        .save(guild_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(settings.into_dto())))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/sticky
pub async fn list_sticky(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let stickies: Vec<StickyMessageDto> = StickyService::new(&state.db, bot.id)
        .list(guild_id)
        .await?
        .into_iter()
        .map(|sticky| sticky.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(stickies)))
}

/// PUT /api/bots/{bot_id}/guilds/{guild_id}/sticky - Create or replace a channel's sticky
///
/// The running bot's sticky cache is reloaded so the change applies to the
/// next message in the channel.
pub async fn save_sticky(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
    Json(payload): Json<SaveStickyMessageDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let sticky = StickyService::new(&state.db, bot.id)
        .save(guild_id, payload)
        .await?;
    state.bots.reload_sticky(bot.id).await?;

    Ok((StatusCode::OK, Json(sticky.into_dto())))
}

/// DELETE /api/bots/{bot_id}/guilds/{guild_id}/sticky/{channel_id}
pub async fn delete_sticky(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, channel_id)): Path<(i32, u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    StickyService::new(&state.db, bot.id)
        .delete(guild_id, channel_id)
        .await?;
    state.bots.reload_sticky(bot.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/invites/leaderboard - Top 10 inviters
pub async fn get_invite_leaderboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let leaderboard: Vec<InviteLeaderboardEntryDto> = InviteService::new(&state.db, bot.id)
        .leaderboard(guild_id)
        .await?
        .into_iter()
        .map(|(inviter_id, uses)| InviteLeaderboardEntryDto { inviter_id, uses })
        .collect();

    Ok((StatusCode::OK, Json(leaderboard)))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/invites/recent - Last 50 joins
pub async fn get_recent_joins(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let joins: Vec<InviteJoinDto> = InviteService::new(&state.db, bot.id)
        .recent(guild_id)
        .await?
        .into_iter()
        .map(|join| join.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(joins)))
}
