use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    /// Secret used to sign dashboard JWTs.
    pub jwt_secret: String,
    /// Passphrase the bot-token cipher key is derived from.
    pub encryption_key: String,

    /// Whether registration (after the first user) needs an invite code.
    pub require_invite_code: bool,
    /// Allowed CORS origin for the dashboard; any origin when unset.
    pub cors_origin: Option<String>,
    /// Discord webhook receiving security audit events.
    pub audit_webhook_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: std::env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            jwt_secret: required("JWT_SECRET")?,
            encryption_key: required("ENCRYPTION_KEY")?,
            require_invite_code: parse_flag("REQUIRE_INVITE_CODE", true)?,
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|o| !o.is_empty()),
            audit_webhook_url: std::env::var("AUDIT_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.is_empty()),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_flag(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidEnvVar {
                name: name.to_string(),
                reason: format!("expected true or false, got '{}'", value),
            }),
        },
    }
}
