//! Welcome and goodbye messages and the join auto-role.

use sea_orm::DatabaseConnection;

use crate::{
    model::community::WelcomeSettingsDto,
    server::{
        data::welcome_settings::WelcomeSettingsRepository, error::AppError,
        model::community::WelcomeSettings, util::placeholder::render,
    },
};

/// Member data substituted into welcome and goodbye messages.
#[derive(Debug, Clone)]
pub struct MemberVars<'a> {
    pub user_id: u64,
    pub tag: &'a str,
    pub username: &'a str,
    pub server: &'a str,
    pub member_count: u64,
}

/// Renders a welcome message. `{USER}` becomes a mention.
pub fn render_welcome(template: &str, vars: &MemberVars) -> String {
    render_member(template, vars, &format!("<@{}>", vars.user_id))
}

/// Renders a goodbye message. `{USER}` becomes the bold username, since the
/// member can no longer be mentioned.
pub fn render_goodbye(template: &str, vars: &MemberVars) -> String {
    render_member(template, vars, &format!("**{}**", vars.username))
}

fn render_member(template: &str, vars: &MemberVars, user: &str) -> String {
    let count = vars.member_count.to_string();
    render(
        template,
        &[
            ("USER", user),
            ("USER_TAG", vars.tag),
            ("USER_NAME", vars.username),
            ("SERVER", vars.server),
            ("MEMBER_COUNT", &count),
        ],
    )
}

pub struct WelcomeService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> WelcomeService<'a> {
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    /// Settings of a guild, defaults when never saved.
    pub async fn get(&self, guild_id: u64) -> Result<WelcomeSettings, AppError> {
        WelcomeSettingsRepository::new(self.db)
            .get(guild_id, self.bot_id)
            .await
    }

    pub async fn save(
        &self,
        guild_id: u64,
        dto: WelcomeSettingsDto,
    ) -> Result<WelcomeSettings, AppError> {
        let settings = WelcomeSettings::from_dto(dto)?;
        if settings.welcome_enabled && settings.welcome_channel_id.is_none() {
            return Err(AppError::BadRequest(
                "A welcome channel is required when welcome messages are enabled".to_string(),
            ));
        }
        if settings.goodbye_enabled && settings.goodbye_channel_id.is_none() {
            return Err(AppError::BadRequest(
                "A goodbye channel is required when goodbye messages are enabled".to_string(),
            ));
        }

        WelcomeSettingsRepository::new(self.db)
            .save(guild_id, self.bot_id, settings)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> MemberVars<'static> {
        MemberVars {
            user_id: 42,
            tag: "alice#0001",
            username: "alice",
            server: "Guild",
            member_count: 128,
        }
    }

    #[test]
    fn welcome_mentions_the_member() {
        let out = render_welcome(
            "Welcome {USER} ({USER_TAG}) to {SERVER}! You are member #{MEMBER_COUNT}.",
            &vars(),
        );
        assert_eq!(out, "Welcome <@42> (alice#0001) to Guild! You are member #128.");
    }

    #[test]
    fn goodbye_uses_bold_username() {
        let out = render_goodbye("{USER} has left {server}.", &vars());
        assert_eq!(out, "**alice** has left Guild.");
    }

    #[test]
    fn default_messages_render() {
        let settings = WelcomeSettings::default();
        assert_eq!(
            render_welcome(&settings.welcome_message, &vars()),
            "Welcome <@42> to Guild!"
        );
        assert_eq!(
            render_goodbye(&settings.goodbye_message, &vars()),
            "**alice** has left the server."
        );
    }
}
