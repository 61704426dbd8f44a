use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub is_admin: bool,
    pub is_approved: bool,
    pub is_banned: bool,
    pub max_bots: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct RegisterDto {
    pub email: String,
    pub password: String,
    /// Defaults to the local part of the email.
    #[serde(default)]
    pub username: Option<String>,
    pub invite_code: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponseDto {
    pub token: String,
    pub user: UserDto,
}

#[derive(Deserialize)]
pub struct UpdateUserDto {
    pub is_admin: Option<bool>,
    pub is_approved: Option<bool>,
    pub is_banned: Option<bool>,
    pub max_bots: Option<i32>,
}

#[derive(Serialize)]
pub struct InviteCodeDto {
    pub id: i32,
    pub code: String,
    pub created_by: Option<i32>,
    pub used_by: Option<i32>,
    pub max_uses: i32,
    pub uses_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateInviteCodeDto {
    /// Zero for unlimited uses.
    #[serde(default = "default_max_uses")]
    pub max_uses: i32,
    pub expires_in_days: Option<i64>,
}

fn default_max_uses() -> i32 {
    1
}

#[derive(Serialize)]
pub struct AdminStatsDto {
    pub total_users: u64,
    pub banned_users: u64,
    pub pending_users: u64,
    pub total_bots: u64,
    pub running_bots: u64,
    pub total_tickets: u64,
    pub open_tickets: u64,
}
