use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::panel::{CreateFromTemplateDto, MovePanelDto, PanelDto, SavePanelDto, TemplateDto},
    server::{
        controller::{owned_bot, running_http},
        error::AppError,
        middleware::auth::AuthGuard,
        service::{
            audit::{AuditEntry, AuditEvent},
            panel::PanelService,
        },
        state::AppState,
    },
};

/// GET /api/bots/{bot_id}/guilds/{guild_id}/panels
pub async fn list_panels(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let panels: Vec<PanelDto> = PanelService::new(&state.db, bot.id)
        .list(guild_id)
        .await?
        .into_iter()
        .map(|panel| panel.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(panels)))
}

/// POST /api/bots/{bot_id}/guilds/{guild_id}/panels - Create and post a panel
///
/// A panel without options gets a single `Open Ticket` button.
///
/// # Returns
/// - `201 Created`: Stored panel with its message id
/// - `400 Bad Request`: Invalid layout or 25 panels already exist
/// - `409 Conflict`: Bot is not running
pub async fn create_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
    Json(payload): Json<SavePanelDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    let http = running_http(&state, bot.id).await?;

    let panel = PanelService::new(&state.db, bot.id)
        .create(&http, guild_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(panel.into_dto())))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/panels/{panel_id}
pub async fn get_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, panel_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let panel = PanelService::new(&state.db, bot.id)
        .get(guild_id, panel_id)
        .await?;

    Ok((StatusCode::OK, Json(panel.into_dto())))
}

/// PUT /api/bots/{bot_id}/guilds/{guild_id}/panels/{panel_id} - Replace a panel
///
/// The posted message is edited in place when the channel is unchanged,
/// otherwise it is deleted and the panel is posted to the new channel.
pub async fn update_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, panel_id)): Path<(i32, u64, i32)>,
    Json(payload): Json<SavePanelDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    let http = running_http(&state, bot.id).await?;

    let panel = PanelService::new(&state.db, bot.id)
        .update(&http, guild_id, panel_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(panel.into_dto())))
}

/// DELETE /api/bots/{bot_id}/guilds/{guild_id}/panels/{panel_id}
pub async fn delete_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, panel_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    let http = running_http(&state, bot.id).await?;

    PanelService::new(&state.db, bot.id)
        .delete(&http, guild_id, panel_id)
        .await?;
    state.audit.record(
        AuditEvent::PanelDeleted,
        AuditEntry::by(&user)
            .target(format!("Panel #{}", panel_id))
            .details(format!("Guild: {}", guild_id)),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/bots/{bot_id}/guilds/{guild_id}/panels/{panel_id}/resend
pub async fn resend_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, panel_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    let http = running_http(&state, bot.id).await?;

    let panel = PanelService::new(&state.db, bot.id)
        .resend(&http, guild_id, panel_id)
        .await?;

    Ok((StatusCode::OK, Json(panel.into_dto())))
}

/// POST /api/bots/{bot_id}/guilds/{guild_id}/panels/{panel_id}/move
pub async fn move_panel(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, panel_id)): Path<(i32, u64, i32)>,
    Json(payload): Json<MovePanelDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    let http = running_http(&state, bot.id).await?;

    let panel = PanelService::new(&state.db, bot.id)
        .move_to(&http, guild_id, panel_id, &payload.channel_id)
        .await?;

    Ok((StatusCode::OK, Json(panel.into_dto())))
}

/// POST /api/bots/{bot_id}/guilds/{guild_id}/panels/{panel_id}/template - Save as template
pub async fn save_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, panel_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let template = PanelService::new(&state.db, bot.id)
        .save_template(guild_id, panel_id)
        .await?;

    Ok((StatusCode::CREATED, Json(template.into_dto())))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/templates
pub async fn list_templates(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id)): Path<(i32, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let templates: Vec<TemplateDto> = PanelService::new(&state.db, bot.id)
        .templates(guild_id)
        .await?
        .into_iter()
        .map(|template| template.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(templates)))
}

/// GET /api/bots/{bot_id}/guilds/{guild_id}/templates/{template_id}
pub async fn get_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, template_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    let template = PanelService::new(&state.db, bot.id)
        .template(guild_id, template_id)
        .await?;

    Ok((StatusCode::OK, Json(template.into_dto())))
}

/// DELETE /api/bots/{bot_id}/guilds/{guild_id}/templates/{template_id}
pub async fn delete_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, template_id)): Path<(i32, u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;

    PanelService::new(&state.db, bot.id)
        .delete_template(guild_id, template_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/bots/{bot_id}/guilds/{guild_id}/templates/{template_id}/panel
///
/// Creates and posts a new panel from a template, optionally renamed.
pub async fn create_panel_from_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path((bot_id, guild_id, template_id)): Path<(i32, u64, i32)>,
    Json(payload): Json<CreateFromTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;
    let bot = owned_bot(&state, &user, bot_id).await?;
    let http = running_http(&state, bot.id).await?;

    let panel = PanelService::new(&state.db, bot.id)
        .create_from_template(&http, guild_id, template_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(panel.into_dto())))
}
