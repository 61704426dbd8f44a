//! Platform administration: user moderation, invite codes and global counters.

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::server::{
    bot::manager::BotManager,
    data::{
        bot::BotRepository,
        ticket::TicketRepository,
        user::{InviteCodeRepository, UserRepository},
    },
    error::AppError,
    model::{
        stats::AdminStats,
        ticket::TicketStatus,
        user::{CreateInviteCodeParam, InviteCode, UpdateUserParam, User},
    },
    service::bot::BotService,
    util::crypto::TokenCipher,
};

const INVITE_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const INVITE_CODE_LENGTH: usize = 8;

/// Generates a random upper-case alphanumeric invite code.
pub fn generate_invite_code() -> String {
    let mut rng = rand::rng();

    (0..INVITE_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..INVITE_CODE_CHARSET.len());
            INVITE_CODE_CHARSET[idx] as char
        })
        .collect()
}

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    manager: &'a BotManager,
    cipher: &'a TokenCipher,
}

impl<'a> AdminService<'a> {
    /// Creates a new AdminService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `manager` - Registry of running bots, used to stop the bots of banned users
    /// - `cipher` - Token cipher handed to the bot service
    ///
    /// # Returns
    /// - `AdminService` - New service instance
    pub fn new(db: &'a DatabaseConnection, manager: &'a BotManager, cipher: &'a TokenCipher) -> Self {
        Self {
            db,
            manager,
            cipher,
        }
    }

    pub async fn stats(&self) -> Result<AdminStats, AppError> {
        let users = UserRepository::new(self.db);
        let bots = BotRepository::new(self.db);
        let tickets = TicketRepository::new(self.db);

        Ok(AdminStats {
            total_users: users.count().await?,
            banned_users: users.count_banned().await?,
            pending_users: users.count_pending().await?,
            total_bots: bots.count().await?,
            running_bots: self.manager.running_ids().await.len() as u64,
            total_tickets: tickets.count_all(None).await?,
            open_tickets: tickets.count_all(Some(TicketStatus::Open)).await?,
        })
    }

    /// Users on a zero-indexed page, newest first, with the total count.
    pub async fn users(&self, page: u64, per_page: u64) -> Result<(Vec<User>, u64), AppError> {
        Ok(UserRepository::new(self.db)
            .get_all_paginated(page, per_page.clamp(1, 100))
            .await?)
    }

    /// Applies approval, ban, admin and bot limit changes to another user.
    ///
    /// Banning a user stops every bot they own.
    ///
    /// # Arguments
    /// - `admin` - Admin performing the change
    /// - `user_id` - Target user
    /// - `param` - Fields to change
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::BadRequest)` - Admin tried to modify their own account or a negative bot limit
    /// - `Err(AppError::NotFound)` - Unknown user
    pub async fn update_user(
        &self,
        admin: &User,
        user_id: i32,
        param: UpdateUserParam,
    ) -> Result<User, AppError> {
        if admin.id == user_id {
            return Err(AppError::BadRequest(
                "You cannot modify your own account".to_string(),
            ));
        }
        if param.max_bots.is_some_and(|max| max < 0) {
            return Err(AppError::BadRequest("Bot limit cannot be negative".to_string()));
        }

        let banned = param.is_banned == Some(true);
        let user = UserRepository::new(self.db)
            .update(user_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if banned {
            BotService::new(self.db, self.manager, self.cipher)
                .stop_all_for_user(user.id)
                .await?;
            tracing::info!("Admin {} banned user {}", admin.id, user.id);
        }

        Ok(user)
    }

    /// Deletes another user after stopping their bots.
    pub async fn delete_user(&self, admin: &User, user_id: i32) -> Result<(), AppError> {
        if admin.id == user_id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        BotService::new(self.db, self.manager, self.cipher)
            .stop_all_for_user(user_id)
            .await?;

        if !UserRepository::new(self.db).delete(user_id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!("Admin {} deleted user {}", admin.id, user_id);

        Ok(())
    }

    /// Creates a registration invite code.
    ///
    /// # Arguments
    /// - `admin` - Creator of the code
    /// - `max_uses` - Allowed uses, zero for unlimited
    /// - `expires_in_days` - Optional lifetime
    pub async fn create_invite_code(
        &self,
        admin: &User,
        max_uses: i32,
        expires_in_days: Option<i64>,
    ) -> Result<InviteCode, AppError> {
        if max_uses < 0 {
            return Err(AppError::BadRequest("Max uses cannot be negative".to_string()));
        }
        if expires_in_days.is_some_and(|days| days <= 0) {
            return Err(AppError::BadRequest(
                "Expiry must be at least one day".to_string(),
            ));
        }

        Ok(InviteCodeRepository::new(self.db)
            .create(CreateInviteCodeParam {
                code: generate_invite_code(),
                created_by: admin.id,
                max_uses,
                expires_at: expires_in_days.map(|days| Utc::now() + Duration::days(days)),
            })
            .await?)
    }

    pub async fn invite_codes(&self) -> Result<Vec<InviteCode>, AppError> {
        Ok(InviteCodeRepository::new(self.db).get_all().await?)
    }

    pub async fn delete_invite_code(&self, code_id: i32) -> Result<(), AppError> {
        if !InviteCodeRepository::new(self.db).delete(code_id).await? {
            return Err(AppError::NotFound("Invite code not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_codes_are_upper_alphanumeric() {
        let code = generate_invite_code();
        assert_eq!(code.len(), INVITE_CODE_LENGTH);
        assert!(code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }
}
