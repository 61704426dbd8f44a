//! User factory for creating dashboard account entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .email("owner@example.com")
///     .admin(true)
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    username: String,
    password_hash: String,
    is_admin: bool,
    is_approved: bool,
    is_banned: bool,
    max_bots: i32,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - email: `"user{id}@example.com"`
    /// - username: `"user{id}"`
    /// - password_hash: a placeholder that never verifies
    /// - approved, not admin, not banned, `max_bots` 2
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("user{}@example.com", id),
            username: format!("user{}", id),
            password_hash: "unusable".to_string(),
            is_admin: false,
            is_approved: true,
            is_banned: false,
            max_bots: 2,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the stored password hash. Use a real argon2 hash for login tests.
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    pub fn admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    pub fn approved(mut self, is_approved: bool) -> Self {
        self.is_approved = is_approved;
        self
    }

    pub fn banned(mut self, is_banned: bool) -> Self {
        self.is_banned = is_banned;
        self
    }

    pub fn max_bots(mut self, max_bots: i32) -> Self {
        self.max_bots = max_bots;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            username: ActiveValue::Set(self.username),
            is_admin: ActiveValue::Set(self.is_admin),
            is_approved: ActiveValue::Set(self.is_approved),
            is_banned: ActiveValue::Set(self.is_banned),
            max_bots: ActiveValue::Set(self.max_bots),
            invited_by: ActiveValue::Set(None),
            invite_code_used: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an approved user with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates an approved admin user.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).admin(true).build().await
}

/// Inserts an invite code created by `created_by`.
///
/// # Arguments
/// - `db` - Database connection
/// - `created_by` - Id of the admin issuing the code
/// - `code` - Code text
/// - `max_uses` - Allowed uses, zero for unlimited
pub async fn create_invite_code(
    db: &DatabaseConnection,
    created_by: i32,
    code: impl Into<String>,
    max_uses: i32,
) -> Result<entity::invite_code::Model, DbErr> {
    entity::invite_code::ActiveModel {
        code: ActiveValue::Set(code.into()),
        created_by: ActiveValue::Set(Some(created_by)),
        used_by: ActiveValue::Set(None),
        max_uses: ActiveValue::Set(max_uses),
        uses_count: ActiveValue::Set(0),
        expires_at: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_multiple_unique_users() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_account_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_user(db).await?;
        let second = create_user(db).await?;

        assert_ne!(first.email, second.email);
        assert!(first.is_approved);
        assert!(!first.is_admin);

        Ok(())
    }
}
