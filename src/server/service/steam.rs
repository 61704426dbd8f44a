//! `/steam link|unlink` for options that require a linked Steam account.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::steam_link::SteamLinkRepository,
    error::AppError,
    util::locale::{Language, Text},
};

const STEAM64_PREFIX: &str = "7656";
const STEAM64_LEN: usize = 17;

/// Whether `value` is a Steam64 id: 17 digits starting with `7656`.
pub fn is_steam64_id(value: &str) -> bool {
    value.len() == STEAM64_LEN
        && value.starts_with(STEAM64_PREFIX)
        && value.bytes().all(|b| b.is_ascii_digit())
}

pub struct SteamService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SteamService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Links the user's Steam id and returns the reply text.
    pub async fn link(
        &self,
        user_id: u64,
        steam_id: &str,
        language: Language,
    ) -> Result<String, AppError> {
        let steam_id = steam_id.trim();
        if !is_steam64_id(steam_id) {
            return Ok(language.get(Text::SteamInvalid).to_string());
        }

        SteamLinkRepository::new(self.db)
            .link(user_id, steam_id, None)
            .await?;

        tracing::info!("User {} linked Steam id {}", user_id, steam_id);

        Ok(language.format(Text::SteamLinked, &[("steam_id", steam_id)]))
    }

    pub async fn unlink(&self, user_id: u64, language: Language) -> Result<String, AppError> {
        let removed = SteamLinkRepository::new(self.db).unlink(user_id).await?;

        Ok(if removed {
            language.get(Text::SteamUnlinked)
        } else {
            language.get(Text::SteamNotLinked)
        }
        .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_steam64_ids() {
        assert!(is_steam64_id("76561198000000000"));
    }

    #[test]
    fn rejects_other_formats() {
        assert!(!is_steam64_id("7656119800000000"));
        assert!(!is_steam64_id("86561198000000000"));
        assert!(!is_steam64_id("7656119800000000a"));
        assert!(!is_steam64_id("STEAM_0:1:12345"));
    }
}
