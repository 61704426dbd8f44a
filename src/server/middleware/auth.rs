use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
    util::jwt::JwtKeys,
};

pub enum Permission {
    Admin,
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtKeys,
    token: Option<&'a str>,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    /// Creates a guard for one request.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `jwt` - Keys used to verify bearer tokens
    /// - `headers` - Request headers, searched for a bearer token
    /// - `session` - Request session, used when no bearer token is sent
    pub fn new(
        db: &'a DatabaseConnection,
        jwt: &'a JwtKeys,
        headers: &'a HeaderMap,
        session: &'a Session,
    ) -> Self {
        Self {
            db,
            jwt,
            token: bearer_token(headers),
            session,
        }
    }

    /// Resolves the requesting user and checks the given permissions.
    ///
    /// A bearer token takes precedence over the session. The account is
    /// re-read on every request so bans and admin changes apply immediately.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user holding every permission
    /// - `Err(AuthError::UserNotInSession)` - Neither token nor session user
    /// - `Err(AuthError::InvalidToken)` - Token signature or expiry rejected
    /// - `Err(AuthError::UserNotInDatabase)` - Account was deleted
    /// - `Err(AuthError::Banned)` - Account is banned
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let user_id = match self.token {
            Some(token) => self.jwt.verify(token)?.sub,
            None => match AuthSession::new(self.session).get_user_id().await? {
                Some(user_id) => user_id,
                None => return Err(AuthError::UserNotInSession.into()),
            },
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if user.is_banned {
            return Err(AuthError::Banned(user.id).into());
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted an admin operation without admin permissions"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn reads_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}
