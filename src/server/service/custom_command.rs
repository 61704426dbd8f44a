//! Guild-scoped `!trigger` commands.

use sea_orm::DatabaseConnection;
use serenity::all::{CreateEmbed, CreateMessage};

use crate::{
    model::community::SaveCustomCommandDto,
    server::{
        data::custom_command::CustomCommandRepository,
        error::AppError,
        model::community::{CustomCommand, SaveCustomCommandParam},
        util::color::parse_hex_color,
    },
};

pub const COMMAND_PREFIX: char = '!';
const DEFAULT_EMBED_COLOR: u32 = 0x5865F2;

/// Extracts the lowercased trigger from a `!trigger ...` message.
///
/// # Returns
/// - `Some(String)` - First word after the prefix
/// - `None` - Message doesn't start with the prefix or has no word after it
pub fn parse_trigger(content: &str) -> Option<String> {
    let rest = content.trim_start().strip_prefix(COMMAND_PREFIX)?;
    let word = rest.split_whitespace().next()?;
    if rest.starts_with(char::is_whitespace) {
        return None;
    }

    Some(word.to_lowercase())
}

/// Reply sent when a command is triggered.
pub fn command_reply(command: &CustomCommand) -> CreateMessage {
    if !command.has_embed() {
        return CreateMessage::new().content(&command.response);
    }

    let mut embed = CreateEmbed::new().color(parse_hex_color(
        command.embed_color.as_deref(),
        DEFAULT_EMBED_COLOR,
    ));
    if let Some(title) = &command.embed_title {
        embed = embed.title(title);
    }
    embed = embed.description(
        command
            .embed_description
            .as_deref()
            .unwrap_or(&command.response),
    );

    CreateMessage::new().embed(embed)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct CustomCommandService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> CustomCommandService<'a> {
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    fn param(
        &self,
        guild_id: u64,
        dto: SaveCustomCommandDto,
        created_by: Option<i32>,
    ) -> Result<SaveCustomCommandParam, AppError> {
        let trigger = dto
            .trigger
            .trim()
            .trim_start_matches(COMMAND_PREFIX)
            .to_lowercase();
        if trigger.is_empty() || trigger.contains(char::is_whitespace) {
            return Err(AppError::BadRequest(
                "Trigger must be a single word".to_string(),
            ));
        }
        if dto.response.trim().is_empty() {
            return Err(AppError::BadRequest("Response is required".to_string()));
        }

        Ok(SaveCustomCommandParam {
            bot_id: self.bot_id,
            guild_id,
            trigger,
            response: dto.response,
            embed_title: non_empty(dto.embed_title),
            embed_description: non_empty(dto.embed_description),
            embed_color: non_empty(dto.embed_color),
            created_by,
        })
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<CustomCommand>, AppError> {
        CustomCommandRepository::new(self.db)
            .get_by_guild(self.bot_id, guild_id)
            .await
    }

    /// Creates a command.
    ///
    /// # Returns
    /// - `Ok(CustomCommand)` - Created command
    /// - `Err(AppError::BadRequest)` - Missing trigger or response
    /// - `Err(AppError::Conflict)` - Trigger already used in the guild
    pub async fn create(
        &self,
        guild_id: u64,
        dto: SaveCustomCommandDto,
        created_by: i32,
    ) -> Result<CustomCommand, AppError> {
        let param = self.param(guild_id, dto, Some(created_by))?;
        let repo = CustomCommandRepository::new(self.db);

        if repo
            .find_by_trigger(self.bot_id, guild_id, &param.trigger)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Command '{}' already exists",
                param.trigger
            )));
        }

        repo.create(param).await
    }

    pub async fn update(
        &self,
        guild_id: u64,
        command_id: i32,
        dto: SaveCustomCommandDto,
    ) -> Result<CustomCommand, AppError> {
        let param = self.param(guild_id, dto, None)?;
        let repo = CustomCommandRepository::new(self.db);

        if let Some(existing) = repo
            .find_by_trigger(self.bot_id, guild_id, &param.trigger)
            .await?
        {
            if existing.id != command_id {
                return Err(AppError::Conflict(format!(
                    "Command '{}' already exists",
                    param.trigger
                )));
            }
        }

        repo.update(command_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Command not found".to_string()))
    }

    pub async fn delete(&self, guild_id: u64, command_id: i32) -> Result<(), AppError> {
        if !CustomCommandRepository::new(self.db)
            .delete(self.bot_id, guild_id, command_id)
            .await?
        {
            return Err(AppError::NotFound("Command not found".to_string()));
        }

        Ok(())
    }

    /// Finds the command a guild message triggers, if any.
    pub async fn match_message(
        &self,
        guild_id: u64,
        content: &str,
    ) -> Result<Option<CustomCommand>, AppError> {
        let Some(trigger) = parse_trigger(content) else {
            return Ok(None);
        };

        CustomCommandRepository::new(self.db)
            .find_by_trigger(self.bot_id, guild_id, &trigger)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_word_lowercased() {
        assert_eq!(parse_trigger("!Rules please"), Some("rules".to_string()));
        assert_eq!(parse_trigger("  !faq"), Some("faq".to_string()));
    }

    #[test]
    fn ignores_plain_and_bare_prefix() {
        assert_eq!(parse_trigger("rules"), None);
        assert_eq!(parse_trigger("!"), None);
        assert_eq!(parse_trigger("! rules"), None);
    }
}
