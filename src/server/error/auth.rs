use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token or session user was supplied with the request.
    #[error("Request is not authenticated")]
    UserNotInSession,

    /// Authenticated user id no longer exists.
    #[error("User {0} from session or token not found in database")]
    UserNotInDatabase(i32),

    /// Bearer token failed signature or expiry validation.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    /// Email or password did not match.
    ///
    /// The message is intentionally the same for unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account has been banned by an administrator.
    #[error("User {0} is banned")]
    Banned(i32),

    /// The account is awaiting administrator approval.
    #[error("User {0} is not approved")]
    NotApproved(i32),

    /// User lacks the permission required for the operation.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Registration requires an invite code and none was supplied.
    #[error("Invite code is required")]
    InviteCodeRequired,

    /// Invite code does not exist.
    #[error("Invalid invite code")]
    InviteCodeInvalid,

    /// Invite code has reached its use limit.
    #[error("Invite code has been fully used")]
    InviteCodeExhausted,

    /// Invite code is past its expiry.
    #[error("Invite code has expired")]
    InviteCodeExpired,

    /// Email is already registered.
    #[error("Email is already registered")]
    EmailTaken,

    /// Password does not meet the strength policy.
    #[error("{0}")]
    WeakPassword(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` / `InvalidToken` / `InvalidCredentials` → 401
/// - `Banned` / `NotApproved` / `AccessDenied` → 403
/// - invite code, email and password policy failures → 400
///
/// Access-denied details are logged at debug level while the client receives a
/// generic message.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) | Self::InvalidToken(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required".to_string())
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            Self::Banned(_) => (
                StatusCode::FORBIDDEN,
                "Your account has been banned".to_string(),
            ),
            Self::NotApproved(_) => (
                StatusCode::FORBIDDEN,
                "Your account is awaiting approval".to_string(),
            ),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Access denied".to_string()),
            Self::InviteCodeRequired
            | Self::InviteCodeInvalid
            | Self::InviteCodeExhausted
            | Self::InviteCodeExpired
            | Self::EmailTaken
            | Self::WeakPassword(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        tracing::debug!("{}", self);

        (status, Json(ErrorDto { error: message })).into_response()
    }
}
