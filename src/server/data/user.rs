//! User data repository for database operations.
//!
//! Provides the `UserRepository` for dashboard accounts and the `InviteCodeRepository`
//! for the codes that gate registration.

use crate::server::model::user::{
    CreateInviteCodeParam, CreateUserParam, InviteCode, UpdateUserParam, User,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

/// Repository providing database operations for dashboard accounts.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// # Arguments
    /// - `param` - Account fields; the password must already be hashed
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a duplicate email
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            email: ActiveValue::Set(param.email),
            password_hash: ActiveValue::Set(param.password_hash),
            username: ActiveValue::Set(param.username),
            is_admin: ActiveValue::Set(param.is_admin),
            is_approved: ActiveValue::Set(param.is_approved),
            is_banned: ActiveValue::Set(false),
            max_bots: ActiveValue::Set(2),
            invited_by: ActiveValue::Set(param.invited_by),
            invite_code_used: ActiveValue::Set(param.invite_code_used),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email. Emails are compared lower-cased.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email.to_lowercase()))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Counts all users. Zero means the next registration is the first.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    pub async fn count_banned(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::IsBanned.eq(true))
            .count(self.db)
            .await
    }

    /// Counts users awaiting approval.
    pub async fn count_pending(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::IsApproved.eq(false))
            .count(self.db)
            .await
    }

    /// Gets users with pagination, newest first.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users per page
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users on the page and total user count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let paginator = entity::prelude::User::find()
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(User::from_entity).collect(), total))
    }

    /// Applies administrative changes to a user.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, user_id: i32, param: UpdateUserParam) -> Result<Option<User>, DbErr> {
        let Some(existing) = entity::prelude::User::find_by_id(user_id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = existing.into();
        if let Some(is_admin) = param.is_admin {
            active.is_admin = ActiveValue::Set(is_admin);
        }
        if let Some(is_approved) = param.is_approved {
            active.is_approved = ActiveValue::Set(is_approved);
        }
        if let Some(is_banned) = param.is_banned {
            active.is_banned = ActiveValue::Set(is_banned);
        }
        if let Some(max_bots) = param.max_bots {
            active.max_bots = ActiveValue::Set(max_bots);
        }

        let entity = active.update(self.db).await?;

        Ok(Some(User::from_entity(entity)))
    }

    /// Deletes a user. Their bots cascade.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with that id
    pub async fn delete(&self, user_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

/// Repository for registration invite codes.
pub struct InviteCodeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InviteCodeRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateInviteCodeParam) -> Result<InviteCode, DbErr> {
        let entity = entity::invite_code::ActiveModel {
            code: ActiveValue::Set(param.code),
            created_by: ActiveValue::Set(Some(param.created_by)),
            used_by: ActiveValue::Set(None),
            max_uses: ActiveValue::Set(param.max_uses),
            uses_count: ActiveValue::Set(0),
            expires_at: ActiveValue::Set(param.expires_at),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(InviteCode::from_entity(entity))
    }

    /// Finds a code; the lookup is upper-cased.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DbErr> {
        let entity = entity::prelude::InviteCode::find()
            .filter(entity::invite_code::Column::Code.eq(code.to_uppercase()))
            .one(self.db)
            .await?;

        Ok(entity.map(InviteCode::from_entity))
    }

    /// Consumes one use of a code.
    ///
    /// The increment is guarded in SQL so two concurrent registrations cannot
    /// both take the last use.
    ///
    /// # Returns
    /// - `Ok(true)` - A use was consumed
    /// - `Ok(false)` - The code was already exhausted
    pub async fn consume(&self, code_id: i32, used_by: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::InviteCode::update_many()
            .col_expr(
                entity::invite_code::Column::UsesCount,
                Expr::col(entity::invite_code::Column::UsesCount).add(1),
            )
            .col_expr(entity::invite_code::Column::UsedBy, Expr::value(used_by))
            .filter(entity::invite_code::Column::Id.eq(code_id))
            .filter(
                Condition::any()
                    .add(entity::invite_code::Column::MaxUses.eq(0))
                    .add(
                        Expr::col(entity::invite_code::Column::UsesCount)
                            .lt(Expr::col(entity::invite_code::Column::MaxUses)),
                    ),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_all(&self) -> Result<Vec<InviteCode>, DbErr> {
        let entities = entity::prelude::InviteCode::find()
            .order_by_desc(entity::invite_code::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(InviteCode::from_entity).collect())
    }

    pub async fn delete(&self, code_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::InviteCode::delete_by_id(code_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
