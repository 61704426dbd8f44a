use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::community::{CustomCommandDto, SaveCustomCommandDto},
    server::{
        controller::owned_bot, error::AppError, middleware::auth::AuthGuard,
        service::custom_command::CustomCommandService, state::AppState,
    },
};

/// GET /api/bots/{bot_id}/guilds/{guild_id}/commands
pub async fn list_commands(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let commands: Vec<CustomCommandDto> = CustomCommandService::new(&state.db, bot.id)
        .list(guild_id)
        .await?
        .into_iter()
        .map(|command| command.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(commands)))
}

/// POST /api/bots/{bot_id}/guilds/{guild_id}/commands
///
/// # Returns
/// - `201 Created`: Stored command with its lower-cased trigger
/// - `400 Bad Request`: Missing trigger or response
/// - `409 Conflict`: Trigger already used in the guild
pub async fn create_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
    Json(payload): Json<SaveCustomCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let command = CustomCommandService::new(&state.db, bot.id)
        .create(guild_id, payload, user.id)
        .await?;

    Ok((StatusCode::CREATED, Json(command.into_dto())))
}

/// PUT /api/bots/{bot_id}/guilds/{guild_id}/commands/{command_id}
pub async fn update_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, command_id)): Path<(i32, u64, i32)>,
    Json(payload): Json<SaveCustomCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let command = CustomCommandService::new(&state.db, bot.id)
        .update(guild_id, command_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(command.into_dto())))
}

/// DELETE /api/bots/{bot_id}/guilds/{guild_id}/commands/{command_id}
pub async fn delete_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, command_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    CustomCommandService::new(&state.db, bot.id)
        .delete(guild_id, command_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
