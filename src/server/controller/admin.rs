use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::PaginatedDto,
        user::{CreateInviteCodeDto, InviteCodeDto, UpdateUserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::{
            admin::AdminService,
            audit::{AuditEntry, AuditEvent},
        },
        state::AppState,
    },
};

#[derive(Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    20
}

/// GET /api/admin/stats - Platform counters
///
/// # Access Control
/// - `Admin` - Only admins can view platform statistics
pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    let stats = AdminService::new(&state.db, &state.bots, &state.cipher)
        .stats()
        .await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

/// GET /api/admin/users - Paginated users, newest first
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    let (users, total) = AdminService::new(&state.db, &state.bots, &state.cipher)
        .users(params.page, params.entries)
        .await?;

    Ok((
        StatusCode::OK,
        Json(PaginatedDto {
            items: users.into_iter().map(|user| user.into_dto()).collect(),
            total,
            page: params.page,
            limit: params.entries.clamp(1, 100),
        }),
    ))
}

/// PUT /api/admin/users/{user_id} - Approve, ban, promote or change the bot limit
///
/// Banning a user stops all of their bots.
///
/// # Access Control
/// - `Admin` - Admins cannot modify their own account
///
/// # Returns
/// - `200 OK`: Updated user
/// - `400 Bad Request`: Self-modification or negative bot limit
/// - `404 Not Found`: Unknown user
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    let banned = payload.is_banned;
    let user = AdminService::new(&state.db, &state.bots, &state.cipher)
        .update_user(&admin, user_id, payload.into())
        .await?;

    let event = match banned {
        Some(true) => Some(AuditEvent::UserBanned),
        Some(false) => Some(AuditEvent::UserUnbanned),
        None => None,
    };
    if let Some(event) = event {
        state.audit.record(
            event,
            AuditEntry::by(&admin).target(format!("{} (#{})", user.username, user.id)),
        );
    }

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// DELETE /api/admin/users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    AdminService::new(&state.db, &state.bots, &state.cipher)
        .delete_user(&admin, user_id)
        .await?;
    state.audit.record(
        AuditEvent::UserDeleted,
        AuditEntry::by(&admin).target(format!("User #{}", user_id)),
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/invite-codes
pub async fn get_invite_codes(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    let codes: Vec<InviteCodeDto> = AdminService::new(&state.db, &state.bots, &state.cipher)
        .invite_codes()
        .await?
        .into_iter()
        .map(|code| code.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(codes)))
}

/// POST /api/admin/invite-codes - Generate a registration code
pub async fn create_invite_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Json(payload): Json<CreateInviteCodeDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    let code = AdminService::new(&state.db, &state.bots, &state.cipher)
        .create_invite_code(&admin, payload.max_uses, payload.expires_in_days)
        .await?;

    state.audit.record(
        AuditEvent::InviteCreated,
        AuditEntry::by(&admin).details(format!("Code: `{}`", code.code)),
    );

    Ok((StatusCode::CREATED, Json(code.into_dto())))
}

/// DELETE /api/admin/invite-codes/{code_id}
pub async fn delete_invite_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    Path(code_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[Permission::Admin])
        .await?;

    AdminService::new(&state.db, &state.bots, &state.cipher)
        .delete_invite_code(code_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
