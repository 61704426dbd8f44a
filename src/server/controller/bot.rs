use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::MessageDto,
        bot::{AddBotDto, BotDto, UpdatePresenceDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::{
            audit::{AuditEntry, AuditEvent},
            bot::BotService,
        },
        state::AppState,
    },
};

/// Audit target naming a bot.
fn bot_label(bot_id: i32, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} (#{})", name, bot_id),
        None => format!("Bot #{}", bot_id),
    }
}

/// GET /api/bots - Bots of the current user
///
/// Each entry reports `connected` from the live registry, which may differ
/// from the stored status after a crash.
pub async fn list_bots(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let bots: Vec<BotDto> = BotService::new(&state.db, &state.bots, &state.cipher)
        .list(user.id)
        .await?
        .into_iter()
        .map(|(bot, connected)| bot.into_dto(connected))
        .collect();

    Ok((StatusCode::OK, Json(bots)))
}

/// POST /api/bots - Register a bot by token
///
/// # Returns
/// - `201 Created`: The stopped bot
/// - `400 Bad Request`: Token length, token rejected by Discord or not a bot account
/// - `403 Forbidden`: Bot limit reached
pub async fn add_bot(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(payload): Json<AddBotDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let bot = BotService::new(&state.db, &state.bots, &state.cipher)
        .add(&user, &payload.token)
        .await?;
    state.audit.record(
        AuditEvent::BotCreated,
        AuditEntry::by(&user).target(bot_label(bot.id, bot.name.as_deref())),
    );

    Ok((StatusCode::CREATED, Json(bot.into_dto(false))))
}

/// DELETE /api/bots/{bot_id}
pub async fn delete_bot(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(bot_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    BotService::new(&state.db, &state.bots, &state.cipher)
        .delete(&user, bot_id)
        .await?;
    state.audit.record(
        AuditEvent::BotDeleted,
        AuditEntry::by(&user).target(bot_label(bot_id, None)),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/bots/{bot_id}/start
///
/// # Returns
/// - `200 OK`: Bot connected
/// - `409 Conflict`: Bot is already running
/// - `400 Bad Request`: Token rejected or privileged intents disabled; stored as the bot's error
pub async fn start_bot(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(bot_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    BotService::new(&state.db, &state.bots, &state.cipher)
        .start(&user, bot_id)
        .await?;
    state.audit.record(
        AuditEvent::BotStarted,
        AuditEntry::by(&user).target(bot_label(bot_id, None)),
    );

    Ok((StatusCode::OK, Json(MessageDto::new("Bot started"))))
}

/// POST /api/bots/{bot_id}/stop
pub async fn stop_bot(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(bot_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    BotService::new(&state.db, &state.bots, &state.cipher)
        .stop(&user, bot_id)
        .await?;
    state.audit.record(
        AuditEvent::BotStopped,
        AuditEntry::by(&user).target(bot_label(bot_id, None)),
    );

    Ok((StatusCode::OK, Json(MessageDto::new("Bot stopped"))))
}

/// PUT /api/bots/{bot_id}/presence - Store and apply a presence
pub async fn update_presence(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(bot_id): Path<i32>,
    Json(payload): Json<UpdatePresenceDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    let applied = BotService::new(&state.db, &state.bots, &state.cipher)
        .update_presence(&user, bot_id, payload.into())
        .await?;

    let message = if applied {
        "Presence updated"
    } else {
        "Presence saved; it applies when the bot starts"
    };

    Ok((StatusCode::OK, Json(MessageDto::new(message))))
}
