use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Results a in 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored JSON id list column could not be decoded.
    #[error("Failed to decode stored id list '{value}'")]
    InvalidIdList {
        /// The raw column value
        value: String,
    },

    /// A stored enum-like column holds an unknown value.
    #[error("Unknown {kind} value '{value}' in database")]
    UnknownStoredValue {
        /// Which column kind (ticket status, bot status, ...)
        kind: &'static str,
        /// The raw column value
        value: String,
    },

    /// Bot token encryption failed.
    #[error("Failed to encrypt bot token")]
    TokenEncryption,

    /// Stored bot token could not be decrypted with the configured key.
    #[error("Failed to decrypt bot token: {0}")]
    TokenDecryption(String),

    /// Password hashing failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// JWT signing failed.
    #[error("Failed to sign session token: {0}")]
    TokenSigning(String),
}
