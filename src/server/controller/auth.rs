use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::MessageDto,
        user::{AuthResponseDto, LoginDto, RegisterDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        service::{
            audit::{AuditEntry, AuditEvent},
            auth::AuthService,
        },
        state::AppState,
    },
};

/// POST /api/auth/register - Create a dashboard account
///
/// The first account becomes an approved admin. Later accounts need an invite
/// code unless the server disables that requirement. On success the user is
/// logged in both through the returned bearer token and the session.
///
/// # Returns
/// - `201 Created`: `AuthResponseDto` with token and user
/// - `400 Bad Request`: Invalid email, weak password, taken email or invite code problem
pub async fn register(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(&state.db, &state.jwt);

    let (user, token) = auth_service
        .register(payload.into(), state.require_invite_code)
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;
    state
        .audit
        .record(AuditEvent::Register, AuditEntry::by(&user).ip(addr.ip()));

    Ok((
        StatusCode::CREATED,
        Json(AuthResponseDto {
            token,
            user: user.into_dto(),
        }),
    ))
}

/// POST /api/auth/login - Log in with email and password
///
/// # Returns
/// - `200 OK`: `AuthResponseDto` with token and user
/// - `401 Unauthorized`: Unknown email or wrong password
/// - `403 Forbidden`: Account banned or awaiting approval
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(&state.db, &state.jwt);

    let (user, token) = match auth_service.login(&payload.email, &payload.password).await {
        Ok(login) => login,
        Err(e) => {
            let entry = AuditEntry {
                username: Some(payload.email.clone()),
                ..Default::default()
            };
            state.audit.record(
                AuditEvent::LoginFailed,
                entry.ip(addr.ip()).details(e.to_string()),
            );
            return Err(e);
        }
    };

    let auth_session = AuthSession::new(&session);
    auth_session.clear().await;
    auth_session.set_user_id(user.id).await?;

    state
        .audit
        .record(AuditEvent::Login, AuditEntry::by(&user).ip(addr.ip()));

    Ok((
        StatusCode::OK,
        Json(AuthResponseDto {
            token,
            user: user.into_dto(),
        }),
    ))
}

/// POST /api/auth/logout - Clear the session
///
/// Bearer tokens stay valid until they expire; clients discard them.
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let auth_session = AuthSession::new(&session);
    if let Some(user_id) = auth_session.get_user_id().await? {
        let entry = AuditEntry {
            user_id: Some(user_id),
            ..Default::default()
        };
        state.audit.record(AuditEvent::Logout, entry);
    }
    auth_session.clear().await;

    Ok((StatusCode::OK, Json(MessageDto::new("Logged out"))))
}

/// GET /api/auth/me - Current user
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers, &session)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
