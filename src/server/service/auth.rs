//! Dashboard account registration and login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::{InviteCodeRepository, UserRepository},
    error::{auth::AuthError, internal::InternalError, AppError},
    model::user::{CreateUserParam, RegisterParam, User},
    util::jwt::JwtKeys,
};

const MIN_PASSWORD_LEN: usize = 8;
const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=32;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `jwt` - Keys used to sign issued tokens
    ///
    /// # Returns
    /// - `AuthService` - New service instance
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtKeys) -> Self {
        Self { db, jwt }
    }

    /// Registers a dashboard account.
    ///
    /// The very first account becomes an approved admin and never needs an invite
    /// code. Later accounts need a valid code while `require_invite_code` is set;
    /// a supplied code is consumed either way.
    ///
    /// # Arguments
    /// - `param` - Registration request
    /// - `require_invite_code` - Whether registration is invite-only
    ///
    /// # Returns
    /// - `Ok((User, token))` - Created account and a signed bearer token
    /// - `Err(AppError::AuthErr(_))` - Invite code, email or password rejected
    /// - `Err(AppError::BadRequest)` - Malformed email or username
    pub async fn register(
        &self,
        param: RegisterParam,
        require_invite_code: bool,
    ) -> Result<(User, String), AppError> {
        let user_repo = UserRepository::new(self.db);
        let code_repo = InviteCodeRepository::new(self.db);

        let email = normalize_email(&param.email)?;
        let username = resolve_username(param.username.as_deref(), &email)?;
        validate_password(&param.password)?;

        let is_first_user = user_repo.count().await? == 0;

        let invite_code = param
            .invite_code
            .map(|code| code.trim().to_uppercase())
            .filter(|code| !code.is_empty());

        let mut invite = None;
        if let Some(code) = &invite_code {
            let Some(found) = code_repo.find_by_code(code).await? else {
                return Err(AuthError::InviteCodeInvalid.into());
            };
            if found.is_exhausted() {
                return Err(AuthError::InviteCodeExhausted.into());
            }
            if found.is_expired(Utc::now()) {
                return Err(AuthError::InviteCodeExpired.into());
            }
            invite = Some(found);
        } else if !is_first_user && require_invite_code {
            return Err(AuthError::InviteCodeRequired.into());
        }

        if user_repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let user = user_repo
            .create(CreateUserParam {
                email,
                password_hash: hash_password(&param.password)?,
                username,
                is_admin: is_first_user,
                is_approved: true,
                invited_by: invite.as_ref().and_then(|code| code.created_by),
                invite_code_used: invite.as_ref().map(|code| code.code.clone()),
            })
            .await?;

        if let Some(code) = invite {
            if !code_repo.consume(code.id, user.id).await? {
                tracing::warn!("Invite code {} ran out while registering user {}", code.code, user.id);
            }
        }

        if is_first_user {
            tracing::info!("First user {} registered as admin", user.id);
        }

        let token = self.jwt.issue(user.id, &user.email, user.is_admin)?;

        Ok((user, token))
    }

    /// Verifies credentials and issues a token.
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Returns
    /// - `Ok((User, token))` - Authenticated account and bearer token
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::Banned)` - Account is banned
    /// - `Err(AuthError::NotApproved)` - Account awaits approval
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(email.trim()).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if user.is_banned {
            return Err(AuthError::Banned(user.id).into());
        }

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_approved {
            return Err(AuthError::NotApproved(user.id).into());
        }

        let token = self.jwt.issue(user.id, &user.email, user.is_admin)?;

        Ok((user, token))
    }
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

    if !valid {
        return Err(AppError::BadRequest("Invalid email format".to_string()));
    }

    Ok(email)
}

fn resolve_username(username: Option<&str>, email: &str) -> Result<String, AppError> {
    let username = match username.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => email.split('@').next().unwrap_or_default().to_string(),
    };

    if !USERNAME_LEN.contains(&username.chars().count()) {
        return Err(AppError::BadRequest(
            "Username must be 3-32 characters".to_string(),
        ));
    }

    Ok(username)
}

/// Checks the password policy: at least 8 characters with an upper-case letter and a digit.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one number".to_string(),
        ));
    }

    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| InternalError::PasswordHash(e.to_string()))
}

/// Returns false for a wrong password as well as for an unreadable stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn register(email: &str, code: Option<&str>) -> RegisterParam {
        RegisterParam {
            email: email.to_string(),
            password: "Secret123".to_string(),
            username: None,
            invite_code: code.map(str::to_string),
        }
    }

    #[test]
    fn password_policy() {
        assert!(validate_password("short1A").is_err());
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
        assert!(validate_password("Good1Password").is_ok());
    }

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("Secret123").unwrap();

        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("secret123", &hash));
        assert!(!verify_password("Secret123", "not-a-hash"));
    }

    /// Tests that the first account needs no code and becomes admin.
    ///
    /// Expected: Ok with an approved admin named after the email local part
    #[tokio::test]
    async fn first_user_becomes_admin() -> Result<(), AppError> {
        let test = TestBuilder::new().with_account_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let keys = JwtKeys::new("secret");

        let (user, token) = AuthService::new(db, &keys)
            .register(register("Owner@Example.com", None), true)
            .await?;

        assert!(user.is_admin);
        assert!(user.is_approved);
        assert_eq!(user.email, "owner@example.com");
        assert_eq!(user.username, "owner");
        assert_eq!(keys.verify(&token).unwrap().sub, user.id);

        Ok(())
    }

    /// Tests that later accounts need an invite code while invites are required.
    ///
    /// Expected: Err(InviteCodeRequired), then Ok once invites are optional
    #[tokio::test]
    async fn later_users_need_invite_code() -> Result<(), AppError> {
        let test = TestBuilder::new().with_account_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let keys = JwtKeys::new("secret");
        factory::create_admin(db).await?;

        let service = AuthService::new(db, &keys);
        let result = service.register(register("b@example.com", None), true).await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InviteCodeRequired))
        ));

        let (user, _) = service.register(register("b@example.com", None), false).await?;
        assert!(!user.is_admin);

        Ok(())
    }

    /// Tests registering with a single-use code twice.
    ///
    /// Expected: first Ok and consumes the code, second Err(InviteCodeExhausted)
    #[tokio::test]
    async fn consumes_invite_code() -> Result<(), AppError> {
        let test = TestBuilder::new().with_account_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let keys = JwtKeys::new("secret");
        let admin = factory::create_admin(db).await?;
        factory::user::create_invite_code(db, admin.id, "WELCOME1", 1).await?;

        let service = AuthService::new(db, &keys);
        let (user, _) = service
            .register(register("c@example.com", Some("welcome1")), true)
            .await?;
        assert_eq!(user.invited_by, Some(admin.id));

        let second = service
            .register(register("d@example.com", Some("WELCOME1")), true)
            .await;
        assert!(matches!(
            second,
            Err(AppError::AuthErr(AuthError::InviteCodeExhausted))
        ));

        Ok(())
    }

    /// Tests login outcomes.
    ///
    /// Expected: wrong password is 401-style, banned account is rejected
    #[tokio::test]
    async fn login_rejects_bad_password_and_banned() -> Result<(), AppError> {
        let test = TestBuilder::new().with_account_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let keys = JwtKeys::new("secret");
        let service = AuthService::new(db, &keys);

        service.register(register("e@example.com", None), true).await?;

        assert!(service.login("e@example.com", "Secret123").await.is_ok());
        assert!(matches!(
            service.login("e@example.com", "Wrong1234").await,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));
        assert!(matches!(
            service.login("nobody@example.com", "Secret123").await,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));

        factory::user::UserFactory::new(db)
            .email("banned@example.com")
            .password_hash(hash_password("Secret123").unwrap())
            .banned(true)
            .build()
            .await?;
        assert!(matches!(
            service.login("banned@example.com", "Secret123").await,
            Err(AppError::AuthErr(AuthError::Banned(_)))
        ));

        Ok(())
    }
}
