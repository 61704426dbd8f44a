use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::embed::{EmbedDto, SaveEmbedDto},
    server::{
        controller::owned_bot,
        error::AppError,
        middleware::auth::AuthGuard,
        service::{
            audit::{AuditEntry, AuditEvent},
            embed::EmbedService,
        },
        state::AppState,
    },
};

/// GET /api/bots/{bot_id}/guilds/{guild_id}/embeds
pub async fn list_embeds(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let embeds: Vec<EmbedDto> = EmbedService::new(&state.db, bot.id)
        .list(guild_id)
        .await?
        .into_iter()
        .map(|embed| embed.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(embeds)))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/embeds/{embed_id}
pub async fn get_embed(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, embed_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let embed = EmbedService::new(&state.db, bot.id)
        .get(guild_id, embed_id)
        .await?;

    Ok((StatusCode::OK, Json(embed.into_dto())))
}

/// POST /api/bots/{bot_id}/guilds/{guild_id}/embeds
///
/// # Returns
/// - `201 Created`: Stored embed; blank name and color get defaults
/// - `400 Bad Request`: Malformed channel id
pub async fn create_embed(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
    Json(payload): Json<SaveEmbedDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let embed = EmbedService::new(&state.db, bot.id)
        .create(guild_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(embed.into_dto())))
}

/// PUT /api/bots/{bot_id}/guilds/{guild_id}/embeds/{embed_id}
pub async fn update_embed(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, embed_id)): Path<(i32, u64, i32)>,
    Json(payload): Json<SaveEmbedDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let embed = EmbedService::new(&state.db, bot.id)
        .update(guild_id, embed_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(embed.into_dto())))
}

/// DELETE /api/bots/{bot_id}/guilds/{guild_id}/embeds/{embed_id}
pub async fn delete_embed(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, embed_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let embed = EmbedService::new(&state.db, bot.id)
        .delete(guild_id, embed_id)
        .await?;
    state.audit.record(
        AuditEvent::SettingsChanged,
        AuditEntry::by(&user)
            .target(format!("Guild {}", guild_id))
            .details(format!("Deleted embed: {}", embed.name)),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/bots/{bot_id}/guilds/{guild_id}/embeds/{embed_id}/send
///
/// # Returns
/// - `204 No Content`: Embed posted to its channel
/// - `400 Bad Request`: No channel selected or nothing to show
/// - `404 Not Found`: Unknown embed
/// - `409 Conflict`: Bot is not running
pub async fn send_embed(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, embed_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    EmbedService::new(&state.db, bot.id)
        .send(state.bots.http(bot.id).await, guild_id, embed_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
