//! User domain models and parameters.
//!
//! Provides domain models for dashboard accounts and the invite codes that gate
//! registration.

use chrono::{DateTime, Utc};

use crate::model::user::{InviteCodeDto, RegisterDto, UpdateUserDto, UserDto};

/// Dashboard account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Argon2 PHC string; never leaves the service layer.
    pub password_hash: String,
    pub username: String,
    pub is_admin: bool,
    pub is_approved: bool,
    pub is_banned: bool,
    /// Maximum number of bots this user may attach.
    pub max_bots: i32,
    pub invited_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            username: self.username,
            is_admin: self.is_admin,
            is_approved: self.is_approved,
            is_banned: self.is_banned,
            max_bots: self.max_bots,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            username: entity.username,
            is_admin: entity.is_admin,
            is_approved: entity.is_approved,
            is_banned: entity.is_banned,
            max_bots: entity.max_bots,
            invited_by: entity.invited_by,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for creating a user during registration.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub email: String,
    pub password_hash: String,
    pub username: String,
    pub is_admin: bool,
    pub is_approved: bool,
    pub invited_by: Option<i32>,
    pub invite_code_used: Option<String>,
}

/// Registration request as submitted, before validation.
#[derive(Debug, Clone)]
pub struct RegisterParam {
    pub email: String,
    pub password: String,
    pub username: Option<String>,
    pub invite_code: Option<String>,
}

impl From<RegisterDto> for RegisterParam {
    fn from(dto: RegisterDto) -> Self {
        Self {
            email: dto.email,
            password: dto.password,
            username: dto.username,
            invite_code: dto.invite_code,
        }
    }
}

/// Administrative account changes. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParam {
    pub is_admin: Option<bool>,
    pub is_approved: Option<bool>,
    pub is_banned: Option<bool>,
    pub max_bots: Option<i32>,
}

impl From<UpdateUserDto> for UpdateUserParam {
    fn from(dto: UpdateUserDto) -> Self {
        Self {
            is_admin: dto.is_admin,
            is_approved: dto.is_approved,
            is_banned: dto.is_banned,
            max_bots: dto.max_bots,
        }
    }
}

/// Registration invite code.
#[derive(Debug, Clone, PartialEq)]
pub struct InviteCode {
    pub id: i32,
    pub code: String,
    pub created_by: Option<i32>,
    pub used_by: Option<i32>,
    /// Zero means unlimited.
    pub max_uses: i32,
    pub uses_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl InviteCode {
    /// Whether every allowed use has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.max_uses > 0 && self.uses_count >= self.max_uses
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    pub fn from_entity(entity: entity::invite_code::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            created_by: entity.created_by,
            used_by: entity.used_by,
            max_uses: entity.max_uses,
            uses_count: entity.uses_count,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> InviteCodeDto {
        InviteCodeDto {
            id: self.id,
            code: self.code,
            created_by: self.created_by,
            used_by: self.used_by,
            max_uses: self.max_uses,
            uses_count: self.uses_count,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInviteCodeParam {
    pub code: String,
    pub created_by: i32,
    pub max_uses: i32,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn code(max_uses: i32, uses_count: i32) -> InviteCode {
        InviteCode {
            id: 1,
            code: "ABC".to_string(),
            created_by: None,
            used_by: None,
            max_uses,
            uses_count,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unlimited_code_is_never_exhausted() {
        assert!(!code(0, 500).is_exhausted());
    }

    #[test]
    fn limited_code_exhausts_at_max() {
        assert!(!code(2, 1).is_exhausted());
        assert!(code(2, 2).is_exhausted());
    }

    #[test]
    fn expiry_compares_against_now() {
        let now = Utc::now();
        let mut invite = code(1, 0);
        assert!(!invite.is_expired(now));

        invite.expires_at = Some(now - Duration::minutes(1));
        assert!(invite.is_expired(now));
    }
}
