//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.

use sea_orm::DatabaseConnection;

use crate::server::{
    bot::manager::BotManager,
    service::audit::AuditLog,
    util::{crypto::TokenCipher, jwt::JwtKeys},
};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `BotManager` shares its client registry through an `Arc`
/// - `JwtKeys` and `TokenCipher` hold small key material
/// - `AuditLog` wraps a pooled `reqwest::Client`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Keys for issuing and verifying dashboard bearer tokens.
    pub jwt: JwtKeys,

    /// Cipher for stored bot tokens.
    pub cipher: TokenCipher,

    /// Registry of running tenant bots.
    ///
    /// Controllers reach Discord through the HTTP client of the bot that owns
    /// the guild being managed.
    pub bots: BotManager,

    /// Whether registration after the first account needs an invite code.
    pub require_invite_code: bool,

    /// Audit trail for logins and destructive actions.
    pub audit: AuditLog,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `jwt` - Bearer token keys
    /// - `cipher` - Bot token cipher
    /// - `bots` - Running bot registry
    /// - `require_invite_code` - Registration policy
    /// - `audit` - Audit trail
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtKeys,
        cipher: TokenCipher,
        bots: BotManager,
        require_invite_code: bool,
        audit: AuditLog,
    ) -> Self {
        Self {
            db,
            jwt,
            cipher,
            bots,
            require_invite_code,
            audit,
        }
    }
}
