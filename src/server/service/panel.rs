//! Ticket panels: persistence, posting to Discord and templates.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{
        ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor,
        CreateEmbedFooter, CreateMessage, EditMessage, MessageId,
    },
    http::Http,
};

use crate::{
    model::panel::{CreateFromTemplateDto, SavePanelDto},
    server::{
        data::{panel::PanelRepository, template::TemplateRepository},
        error::AppError,
        model::panel::{
            OptionButtonStyle, OptionWithQuestions, PanelEmbed, PanelWithOptions, SaveOptionParam,
            SavePanelParam, Template, TicketStyle,
        },
        service::ticket::builder::{parse_emoji, OPEN_BUTTON_PREFIX},
        util::color::{parse_hex_color, PRIMARY},
    },
};

pub const MAX_PANELS_PER_GUILD: u64 = 25;
const BUTTONS_PER_ROW: usize = 5;

/// Option added to a panel saved without any.
pub fn default_option() -> SaveOptionParam {
    SaveOptionParam {
        label: "Open Ticket".to_string(),
        emoji: Some("🎫".to_string()),
        style: OptionButtonStyle::Primary,
        category_name: None,
        ticket_prefix: None,
        support_role_ids: Vec::new(),
        required_roles: Vec::new(),
        welcome_message: None,
        ticket_message: None,
        staff_thread_message: None,
        steam_required: false,
        pings_enabled: true,
        is_disabled: false,
        ticket_style: TicketStyle::Channel,
        ticket_category_id: None,
        questions: Vec::new(),
    }
}

/// Embed of a posted panel.
pub fn panel_embed(embed: &PanelEmbed) -> CreateEmbed {
    let mut out = CreateEmbed::new().color(parse_hex_color(Some(&embed.color), PRIMARY));

    if let Some(title) = &embed.title {
        out = out.title(title);
    }
    if let Some(url) = &embed.title_url {
        out = out.url(url);
    }
    if let Some(description) = &embed.description {
        out = out.description(description);
    }
    if let Some(image) = &embed.image {
        out = out.image(image);
    }
    if let Some(thumbnail) = &embed.thumbnail {
        out = out.thumbnail(thumbnail);
    }
    if let Some(footer) = &embed.footer {
        let mut footer = CreateEmbedFooter::new(footer);
        if let Some(icon) = &embed.footer_icon {
            footer = footer.icon_url(icon);
        }
        out = out.footer(footer);
    }
    if let Some(name) = &embed.author_name {
        let mut author = CreateEmbedAuthor::new(name);
        if let Some(icon) = &embed.author_icon {
            author = author.icon_url(icon);
        }
        if let Some(url) = &embed.author_url {
            author = author.url(url);
        }
        out = out.author(author);
    }

    out
}

/// Option buttons laid out five per row.
pub fn option_rows(options: &[OptionWithQuestions]) -> Vec<CreateActionRow> {
    options
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| {
            let buttons = chunk
                .iter()
                .map(|entry| {
                    let option = &entry.option;
                    let style = match option.style {
                        OptionButtonStyle::Primary => ButtonStyle::Primary,
                        OptionButtonStyle::Secondary => ButtonStyle::Secondary,
                        OptionButtonStyle::Success => ButtonStyle::Success,
                        OptionButtonStyle::Danger => ButtonStyle::Danger,
                    };

                    let mut button =
                        CreateButton::new(format!("{}{}", OPEN_BUTTON_PREFIX, option.id))
                            .label(&option.label)
                            .style(style)
                            .disabled(option.is_disabled);
                    if let Some(emoji) = option.emoji.as_deref().and_then(parse_emoji) {
                        button = button.emoji(emoji);
                    }
                    button
                })
                .collect();

            CreateActionRow::Buttons(buttons)
        })
        .collect()
}

pub struct PanelService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> PanelService<'a> {
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    pub async fn list(&self, guild_id: u64) -> Result<Vec<PanelWithOptions>, AppError> {
        PanelRepository::new(self.db)
            .get_by_guild(self.bot_id, guild_id)
            .await
    }

    /// Loads a panel of this bot and guild.
    ///
    /// # Returns
    /// - `Ok(PanelWithOptions)` - Panel with options and questions
    /// - `Err(AppError::NotFound)` - Unknown panel or one of another bot or guild
    pub async fn get(&self, guild_id: u64, panel_id: i32) -> Result<PanelWithOptions, AppError> {
        PanelRepository::new(self.db)
            .find_with_options(panel_id)
            .await?
            .filter(|found| found.panel.bot_id == self.bot_id && found.panel.guild_id == guild_id)
            .ok_or_else(|| AppError::NotFound("Panel not found".to_string()))
    }

    /// Creates a panel and posts it.
    ///
    /// # Arguments
    /// - `http` - HTTP client of the bot
    /// - `guild_id` - Guild the panel belongs to
    /// - `dto` - Panel layout from the dashboard
    ///
    /// # Returns
    /// - `Ok(PanelWithOptions)` - Stored panel with its posted message id
    /// - `Err(AppError::BadRequest)` - Invalid layout or guild panel limit reached
    pub async fn create(
        &self,
        http: &Http,
        guild_id: u64,
        dto: SavePanelDto,
    ) -> Result<PanelWithOptions, AppError> {
        let param = SavePanelParam::from_dto(self.bot_id, guild_id, dto)?;
        self.create_from_param(http, param).await
    }

    async fn create_from_param(
        &self,
        http: &Http,
        mut param: SavePanelParam,
    ) -> Result<PanelWithOptions, AppError> {
        let repo = PanelRepository::new(self.db);
        if repo.count_by_guild(self.bot_id, param.guild_id).await? >= MAX_PANELS_PER_GUILD {
            return Err(AppError::BadRequest(format!(
                "A guild can have at most {} panels",
                MAX_PANELS_PER_GUILD
            )));
        }

        if param.blueprint.options.is_empty() {
            param.blueprint.options.push(default_option());
        }

        let mut panel = repo.create(param).await?;
        self.post(http, &mut panel).await?;

        tracing::info!(
            "Created panel {} in guild {} for bot {}",
            panel.panel.id,
            panel.panel.guild_id,
            self.bot_id
        );

        Ok(panel)
    }

    /// Replaces a panel's layout.
    ///
    /// The posted message is edited in place when the channel is unchanged;
    /// otherwise the old message is deleted and a new one posted.
    pub async fn update(
        &self,
        http: &Http,
        guild_id: u64,
        panel_id: i32,
        dto: SavePanelDto,
    ) -> Result<PanelWithOptions, AppError> {
        let existing = self.get(guild_id, panel_id).await?;
        let mut param = SavePanelParam::from_dto(self.bot_id, guild_id, dto)?;
        if param.blueprint.options.is_empty() {
            param.blueprint.options.push(default_option());
        }

        let mut panel = PanelRepository::new(self.db)
            .replace(panel_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Panel not found".to_string()))?;

        let same_channel = existing.panel.channel_id == panel.panel.channel_id;
        match existing.panel.message_id {
            Some(message_id) if same_channel => {
                let edit = EditMessage::new()
                    .content(panel.panel.embed.message_content.clone().unwrap_or_default())
                    .embed(panel_embed(&panel.panel.embed))
                    .components(option_rows(&panel.options));

                match ChannelId::new(panel.panel.channel_id)
                    .edit_message(http, MessageId::new(message_id), edit)
                    .await
                {
                    Ok(_) => panel.panel.message_id = Some(message_id),
                    Err(e) => {
                        tracing::warn!("Failed to edit panel {} message, reposting: {}", panel_id, e);
                        self.post(http, &mut panel).await?;
                    }
                }
            }
            _ => {
                self.remove_message(http, existing.panel.channel_id, existing.panel.message_id)
                    .await;
                self.post(http, &mut panel).await?;
            }
        }

        Ok(panel)
    }

    /// Deletes a panel and its posted message.
    pub async fn delete(&self, http: &Http, guild_id: u64, panel_id: i32) -> Result<(), AppError> {
        let existing = self.get(guild_id, panel_id).await?;
        self.remove_message(http, existing.panel.channel_id, existing.panel.message_id)
            .await;

        PanelRepository::new(self.db).delete(panel_id).await?;

        Ok(())
    }

    /// Deletes the posted message and posts the panel again in the same channel.
    pub async fn resend(
        &self,
        http: &Http,
        guild_id: u64,
        panel_id: i32,
    ) -> Result<PanelWithOptions, AppError> {
        let mut panel = self.get(guild_id, panel_id).await?;
        self.remove_message(http, panel.panel.channel_id, panel.panel.message_id)
            .await;
        self.post(http, &mut panel).await?;

        Ok(panel)
    }

    /// Moves a panel to another channel.
    pub async fn move_to(
        &self,
        http: &Http,
        guild_id: u64,
        panel_id: i32,
        channel_id: &str,
    ) -> Result<PanelWithOptions, AppError> {
        let channel_id = channel_id
            .trim()
            .parse::<u64>()
            .map_err(|_| AppError::BadRequest(format!("Invalid channel ID: {}", channel_id)))?;

        let mut panel = self.get(guild_id, panel_id).await?;
        self.remove_message(http, panel.panel.channel_id, panel.panel.message_id)
            .await;

        panel.panel.channel_id = channel_id;
        self.post(http, &mut panel).await?;

        Ok(panel)
    }

    /// Saves a panel's layout as a template named `{panel} Template`.
    pub async fn save_template(&self, guild_id: u64, panel_id: i32) -> Result<Template, AppError> {
        let panel = self.get(guild_id, panel_id).await?;
        let blueprint = panel.to_blueprint();

        TemplateRepository::new(self.db)
            .create(
                self.bot_id,
                guild_id,
                format!("{} Template", blueprint.name),
                &blueprint,
            )
            .await
    }

    pub async fn templates(&self, guild_id: u64) -> Result<Vec<Template>, AppError> {
        TemplateRepository::new(self.db)
            .get_by_guild(self.bot_id, guild_id)
            .await
    }

    pub async fn template(&self, guild_id: u64, template_id: i32) -> Result<Template, AppError> {
        TemplateRepository::new(self.db)
            .find(self.bot_id, guild_id, template_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Template not found".to_string()))
    }

    pub async fn delete_template(&self, guild_id: u64, template_id: i32) -> Result<(), AppError> {
        if !TemplateRepository::new(self.db)
            .delete(self.bot_id, guild_id, template_id)
            .await?
        {
            return Err(AppError::NotFound("Template not found".to_string()));
        }

        Ok(())
    }

    /// Creates and posts a new panel from a template.
    pub async fn create_from_template(
        &self,
        http: &Http,
        guild_id: u64,
        template_id: i32,
        dto: CreateFromTemplateDto,
    ) -> Result<PanelWithOptions, AppError> {
        let template = self.template(guild_id, template_id).await?;
        let channel_id = dto.channel_id.trim().parse::<u64>().map_err(|_| {
            AppError::BadRequest(format!("Invalid channel ID: {}", dto.channel_id))
        })?;

        let mut blueprint = template.blueprint;
        if let Some(name) = dto.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            blueprint.name = name;
        }

        self.create_from_param(
            http,
            SavePanelParam {
                bot_id: self.bot_id,
                guild_id,
                channel_id,
                blueprint,
            },
        )
        .await
    }

    /// Sends the panel message and stores its location.
    async fn post(&self, http: &Http, panel: &mut PanelWithOptions) -> Result<(), AppError> {
        let mut message = CreateMessage::new()
            .embed(panel_embed(&panel.panel.embed))
            .components(option_rows(&panel.options));
        if let Some(content) = &panel.panel.embed.message_content {
            message = message.content(content);
        }

        let sent = ChannelId::new(panel.panel.channel_id)
            .send_message(http, message)
            .await?;

        PanelRepository::new(self.db)
            .set_message(panel.panel.id, panel.panel.channel_id, Some(sent.id.get()))
            .await?;
        panel.panel.message_id = Some(sent.id.get());

        Ok(())
    }

    async fn remove_message(&self, http: &Http, channel_id: u64, message_id: Option<u64>) {
        let Some(message_id) = message_id else {
            return;
        };

        if let Err(e) = ChannelId::new(channel_id)
            .delete_message(http, MessageId::new(message_id))
            .await
        {
            tracing::warn!(
                "Failed to delete panel message {} in channel {}: {}",
                message_id,
                channel_id,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::panel::PanelOption;

    fn entry(id: i32) -> OptionWithQuestions {
        let option = default_option();
        OptionWithQuestions {
            option: PanelOption {
                id,
                panel_id: 1,
                label: option.label,
                emoji: option.emoji,
                style: option.style,
                category_name: None,
                ticket_prefix: None,
                support_role_ids: vec![],
                required_roles: vec![],
                welcome_message: None,
                ticket_message: None,
                staff_thread_message: None,
                steam_required: false,
                pings_enabled: true,
                is_disabled: false,
                ticket_style: TicketStyle::Channel,
                ticket_category_id: None,
                position: id,
            },
            questions: vec![],
        }
    }

    #[test]
    fn buttons_wrap_every_five() {
        let options: Vec<_> = (1..=7).map(entry).collect();
        assert_eq!(option_rows(&options).len(), 2);
        assert_eq!(option_rows(&options[..5]).len(), 1);
        assert!(option_rows(&[]).is_empty());
    }

    #[test]
    fn default_option_opens_a_ticket() {
        let option = default_option();
        assert_eq!(option.label, "Open Ticket");
        assert_eq!(option.emoji.as_deref(), Some("🎫"));
        assert!(option.questions.is_empty());
    }
}
