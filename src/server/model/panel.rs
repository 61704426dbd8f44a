//! Ticket panel domain models.
//!
//! A panel is one posted message with an embed and up to 25 option buttons. Each
//! option carries its own ticket routing rules and an optional intake form of at
//! most five questions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::panel::{
        PanelDto, PanelEmbedDto, PanelOptionDto, PanelQuestionDto, SavePanelDto, TemplateDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        util::parse::{parse_id_list, parse_id_strings, parse_optional_u64, parse_u64_from_string},
    },
};

/// Discord allows five action rows of five buttons per message.
pub const MAX_PANEL_OPTIONS: usize = 25;
/// Discord modals accept at most five text inputs.
pub const MAX_OPTION_QUESTIONS: usize = 5;

/// Button colour for a panel option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptionButtonStyle {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
}

impl OptionButtonStyle {
    pub fn parse_lenient(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "secondary" => Self::Secondary,
            "success" => Self::Success,
            "danger" => Self::Danger,
            _ => Self::Primary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// Whether a ticket is created as a channel or a private thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketStyle {
    #[default]
    Channel,
    Thread,
}

impl TicketStyle {
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("thread") {
            Self::Thread
        } else {
            Self::Channel
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Channel => "channel",
            Self::Thread => "thread",
        }
    }
}

/// Input style of an intake question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStyle {
    #[default]
    Short,
    Paragraph,
}

impl QuestionStyle {
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("paragraph") {
            Self::Paragraph
        } else {
            Self::Short
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Paragraph => "paragraph",
        }
    }
}

/// Embed shown on the posted panel message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelEmbed {
    pub message_content: Option<String>,
    pub title: Option<String>,
    pub title_url: Option<String>,
    pub description: Option<String>,
    /// Hex colour such as `#5865F2`.
    pub color: String,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
    pub footer_icon: Option<String>,
    pub author_name: Option<String>,
    pub author_icon: Option<String>,
    pub author_url: Option<String>,
}

impl PanelEmbed {
    pub fn from_dto(dto: PanelEmbedDto) -> Self {
        Self {
            message_content: non_empty(dto.message_content),
            title: non_empty(dto.title),
            title_url: non_empty(dto.title_url),
            description: non_empty(dto.description),
            color: non_empty(dto.color).unwrap_or_else(|| "#5865F2".to_string()),
            image: non_empty(dto.image),
            thumbnail: non_empty(dto.thumbnail),
            footer: non_empty(dto.footer),
            footer_icon: non_empty(dto.footer_icon),
            author_name: non_empty(dto.author_name),
            author_icon: non_empty(dto.author_icon),
            author_url: non_empty(dto.author_url),
        }
    }

    pub fn into_dto(self) -> PanelEmbedDto {
        PanelEmbedDto {
            message_content: self.message_content,
            title: self.title,
            title_url: self.title_url,
            description: self.description,
            color: Some(self.color),
            image: self.image,
            thumbnail: self.thumbnail,
            footer: self.footer,
            footer_icon: self.footer_icon,
            author_name: self.author_name,
            author_icon: self.author_icon,
            author_url: self.author_url,
        }
    }
}

/// Posted ticket panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: i32,
    pub bot_id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    /// Set once the panel message has been posted.
    pub message_id: Option<u64>,
    pub name: String,
    pub embed: PanelEmbed,
    pub created_at: DateTime<Utc>,
}

impl Panel {
    pub fn from_entity(entity: entity::panel::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            bot_id: entity.bot_id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            message_id: parse_optional_u64(entity.message_id)?,
            name: entity.name,
            embed: PanelEmbed {
                message_content: entity.message_content,
                title: entity.embed_title,
                title_url: entity.embed_title_url,
                description: entity.embed_description,
                color: entity.embed_color,
                image: entity.embed_image,
                thumbnail: entity.embed_thumbnail,
                footer: entity.embed_footer,
                footer_icon: entity.embed_footer_icon,
                author_name: entity.embed_author_name,
                author_icon: entity.embed_author_icon,
                author_url: entity.embed_author_url,
            },
            created_at: entity.created_at,
        })
    }
}

/// Ticket-opening option on a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOption {
    pub id: i32,
    pub panel_id: i32,
    pub label: String,
    pub emoji: Option<String>,
    pub style: OptionButtonStyle,
    pub category_name: Option<String>,
    /// Channel name prefix; falls back to `ticket`.
    pub ticket_prefix: Option<String>,
    pub support_role_ids: Vec<u64>,
    /// Roles of which the opener must hold at least one. Empty means unrestricted.
    pub required_roles: Vec<u64>,
    pub welcome_message: Option<String>,
    pub ticket_message: Option<String>,
    pub staff_thread_message: Option<String>,
    pub steam_required: bool,
    pub pings_enabled: bool,
    pub is_disabled: bool,
    pub ticket_style: TicketStyle,
    pub ticket_category_id: Option<u64>,
    pub position: i32,
}

impl PanelOption {
    pub fn from_entity(entity: entity::panel_option::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            panel_id: entity.panel_id,
            label: entity.label,
            emoji: entity.emoji,
            style: OptionButtonStyle::parse_lenient(&entity.style),
            category_name: entity.category_name,
            ticket_prefix: entity.ticket_prefix,
            support_role_ids: parse_id_list(&entity.support_role_ids)?,
            required_roles: parse_id_list(&entity.required_roles)?,
            welcome_message: entity.welcome_message,
            ticket_message: entity.ticket_message,
            staff_thread_message: entity.staff_thread_message,
            steam_required: entity.steam_required,
            pings_enabled: entity.pings_enabled,
            is_disabled: entity.is_disabled,
            ticket_style: TicketStyle::parse_lenient(&entity.ticket_style),
            ticket_category_id: parse_optional_u64(entity.ticket_category_id)?,
            position: entity.position,
        })
    }

    /// Prefix used in ticket channel names.
    pub fn prefix(&self) -> &str {
        self.ticket_prefix
            .as_deref()
            .filter(|prefix| !prefix.trim().is_empty())
            .unwrap_or("ticket")
    }
}

/// Intake question shown in the ticket modal.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelQuestion {
    pub id: i32,
    pub option_id: i32,
    pub question: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub min_length: i32,
    pub max_length: i32,
    pub style: QuestionStyle,
    pub position: i32,
}

impl PanelQuestion {
    pub fn from_entity(entity: entity::panel_question::Model) -> Self {
        Self {
            id: entity.id,
            option_id: entity.option_id,
            question: entity.question,
            placeholder: entity.placeholder,
            required: entity.required,
            min_length: entity.min_length,
            max_length: entity.max_length,
            style: QuestionStyle::parse_lenient(&entity.style),
            position: entity.position,
        }
    }
}

/// Option together with its ordered questions.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionWithQuestions {
    pub option: PanelOption,
    pub questions: Vec<PanelQuestion>,
}

/// Panel together with its ordered options.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelWithOptions {
    pub panel: Panel,
    pub options: Vec<OptionWithQuestions>,
}

impl PanelWithOptions {
    pub fn into_dto(self) -> PanelDto {
        let ids = |ids: Vec<u64>| ids.into_iter().map(|id| id.to_string()).collect();
        PanelDto {
            id: self.panel.id,
            bot_id: self.panel.bot_id,
            guild_id: self.panel.guild_id.to_string(),
            channel_id: self.panel.channel_id.to_string(),
            message_id: self.panel.message_id.map(|id| id.to_string()),
            name: self.panel.name,
            embed: self.panel.embed.into_dto(),
            options: self
                .options
                .into_iter()
                .map(|entry| {
                    let option = entry.option;
                    PanelOptionDto {
                        id: Some(option.id),
                        label: Some(option.label),
                        emoji: option.emoji,
                        style: Some(option.style.as_str().to_string()),
                        category_name: option.category_name,
                        ticket_prefix: option.ticket_prefix,
                        support_role_ids: ids(option.support_role_ids),
                        required_roles: ids(option.required_roles),
                        welcome_message: option.welcome_message,
                        ticket_message: option.ticket_message,
                        staff_thread_message: option.staff_thread_message,
                        steam_required: option.steam_required,
                        pings_enabled: option.pings_enabled,
                        is_disabled: option.is_disabled,
                        ticket_style: Some(option.ticket_style.as_str().to_string()),
                        ticket_category_id: option.ticket_category_id.map(|id| id.to_string()),
                        questions: entry
                            .questions
                            .into_iter()
                            .map(|question| PanelQuestionDto {
                                id: Some(question.id),
                                question: question.question,
                                placeholder: question.placeholder,
                                required: question.required,
                                min_length: Some(question.min_length),
                                max_length: Some(question.max_length),
                                style: Some(question.style.as_str().to_string()),
                            })
                            .collect(),
                    }
                })
                .collect(),
            created_at: self.panel.created_at,
        }
    }

    /// Captures the panel layout as a reusable blueprint.
    pub fn to_blueprint(&self) -> PanelBlueprint {
        PanelBlueprint {
            name: self.panel.name.clone(),
            embed: self.panel.embed.clone(),
            options: self
                .options
                .iter()
                .map(|entry| {
                    let option = &entry.option;
                    SaveOptionParam {
                        label: option.label.clone(),
                        emoji: option.emoji.clone(),
                        style: option.style,
                        category_name: option.category_name.clone(),
                        ticket_prefix: option.ticket_prefix.clone(),
                        support_role_ids: option.support_role_ids.clone(),
                        required_roles: option.required_roles.clone(),
                        welcome_message: option.welcome_message.clone(),
                        ticket_message: option.ticket_message.clone(),
                        staff_thread_message: option.staff_thread_message.clone(),
                        steam_required: option.steam_required,
                        pings_enabled: option.pings_enabled,
                        is_disabled: option.is_disabled,
                        ticket_style: option.ticket_style,
                        ticket_category_id: option.ticket_category_id,
                        questions: entry
                            .questions
                            .iter()
                            .map(|question| SaveQuestionParam {
                                question: question.question.clone(),
                                placeholder: question.placeholder.clone(),
                                required: question.required,
                                min_length: question.min_length,
                                max_length: question.max_length,
                                style: question.style,
                            })
                            .collect(),
                    }
                })
                .collect(),
        }
    }
}

/// Validated intake question ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveQuestionParam {
    pub question: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub min_length: i32,
    pub max_length: i32,
    pub style: QuestionStyle,
}

impl SaveQuestionParam {
    /// Validates a question from the dashboard, clamping lengths to modal limits.
    pub fn from_dto(dto: PanelQuestionDto) -> Result<Self, AppError> {
        let question = dto.question.trim().to_string();
        if question.is_empty() {
            return Err(AppError::BadRequest("Question text is required".to_string()));
        }

        let max_length = dto.max_length.unwrap_or(1000).clamp(1, 4000);
        let min_length = dto.min_length.unwrap_or(1).clamp(0, max_length);

        Ok(Self {
            // Modal labels are limited to 45 characters.
            question: question.chars().take(45).collect(),
            placeholder: non_empty(dto.placeholder).map(|p| p.chars().take(100).collect()),
            required: dto.required,
            min_length,
            max_length,
            style: dto
                .style
                .as_deref()
                .map(QuestionStyle::parse_lenient)
                .unwrap_or_default(),
        })
    }
}

/// Validated panel option ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveOptionParam {
    pub label: String,
    pub emoji: Option<String>,
    pub style: OptionButtonStyle,
    pub category_name: Option<String>,
    pub ticket_prefix: Option<String>,
    pub support_role_ids: Vec<u64>,
    pub required_roles: Vec<u64>,
    pub welcome_message: Option<String>,
    pub ticket_message: Option<String>,
    pub staff_thread_message: Option<String>,
    pub steam_required: bool,
    pub pings_enabled: bool,
    pub is_disabled: bool,
    pub ticket_style: TicketStyle,
    pub ticket_category_id: Option<u64>,
    pub questions: Vec<SaveQuestionParam>,
}

impl SaveOptionParam {
    pub fn from_dto(dto: PanelOptionDto) -> Result<Self, AppError> {
        if dto.questions.len() > MAX_OPTION_QUESTIONS {
            return Err(AppError::BadRequest(format!(
                "An option can have at most {} questions",
                MAX_OPTION_QUESTIONS
            )));
        }

        let ticket_category_id = match non_empty(dto.ticket_category_id) {
            Some(id) => Some(
                id.parse::<u64>()
                    .map_err(|_| AppError::BadRequest(format!("Invalid category ID: {}", id)))?,
            ),
            None => None,
        };

        Ok(Self {
            label: non_empty(dto.label)
                .map(|label| label.chars().take(80).collect())
                .unwrap_or_else(|| "Open Ticket".to_string()),
            emoji: non_empty(dto.emoji),
            style: dto
                .style
                .as_deref()
                .map(OptionButtonStyle::parse_lenient)
                .unwrap_or_default(),
            category_name: non_empty(dto.category_name),
            ticket_prefix: non_empty(dto.ticket_prefix),
            support_role_ids: parse_id_strings(&dto.support_role_ids)?,
            required_roles: parse_id_strings(&dto.required_roles)?,
            welcome_message: non_empty(dto.welcome_message),
            ticket_message: non_empty(dto.ticket_message),
            staff_thread_message: non_empty(dto.staff_thread_message),
            steam_required: dto.steam_required,
            pings_enabled: dto.pings_enabled,
            is_disabled: dto.is_disabled,
            ticket_style: dto
                .ticket_style
                .as_deref()
                .map(TicketStyle::parse_lenient)
                .unwrap_or_default(),
            ticket_category_id,
            questions: dto
                .questions
                .into_iter()
                .map(SaveQuestionParam::from_dto)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Complete panel layout. Stored as JSON inside templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelBlueprint {
    pub name: String,
    pub embed: PanelEmbed,
    pub options: Vec<SaveOptionParam>,
}

impl PanelBlueprint {
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(value: &str) -> Result<Self, AppError> {
        serde_json::from_str(value).map_err(|_| {
            InternalError::UnknownStoredValue {
                kind: "template panel data",
                value: value.chars().take(64).collect(),
            }
            .into()
        })
    }
}

/// Parameters for creating or replacing a panel.
#[derive(Debug, Clone)]
pub struct SavePanelParam {
    pub bot_id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub blueprint: PanelBlueprint,
}

impl SavePanelParam {
    pub fn from_dto(bot_id: i32, guild_id: u64, dto: SavePanelDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Panel name is required".to_string()));
        }
        if dto.options.len() > MAX_PANEL_OPTIONS {
            return Err(AppError::BadRequest(format!(
                "A panel can have at most {} options",
                MAX_PANEL_OPTIONS
            )));
        }
        let channel_id = dto
            .channel_id
            .parse::<u64>()
            .map_err(|_| AppError::BadRequest(format!("Invalid channel ID: {}", dto.channel_id)))?;

        Ok(Self {
            bot_id,
            guild_id,
            channel_id,
            blueprint: PanelBlueprint {
                name,
                embed: PanelEmbed::from_dto(dto.embed),
                options: dto
                    .options
                    .into_iter()
                    .map(SaveOptionParam::from_dto)
                    .collect::<Result<_, _>>()?,
            },
        })
    }
}

/// Saved panel template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: i32,
    pub bot_id: i32,
    pub guild_id: u64,
    pub name: String,
    pub blueprint: PanelBlueprint,
    pub created_at: DateTime<Utc>,
}

impl Template {
    pub fn from_entity(entity: entity::template::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            bot_id: entity.bot_id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            name: entity.name,
            blueprint: PanelBlueprint::from_json(&entity.panel_data)?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> TemplateDto {
        TemplateDto {
            id: self.id,
            name: self.name,
            panel_name: self.blueprint.name,
            option_count: self.blueprint.options.len(),
            created_at: self.created_at,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_dto(text: &str) -> PanelQuestionDto {
        PanelQuestionDto {
            id: None,
            question: text.to_string(),
            placeholder: None,
            required: true,
            min_length: Some(10),
            max_length: Some(9000),
            style: Some("paragraph".to_string()),
        }
    }

    fn option_dto(questions: usize) -> PanelOptionDto {
        PanelOptionDto {
            id: None,
            label: None,
            emoji: Some(" ".to_string()),
            style: Some("danger".to_string()),
            category_name: None,
            ticket_prefix: None,
            support_role_ids: vec!["42".to_string()],
            required_roles: vec![],
            welcome_message: None,
            ticket_message: None,
            staff_thread_message: None,
            steam_required: false,
            pings_enabled: true,
            is_disabled: false,
            ticket_style: Some("thread".to_string()),
            ticket_category_id: None,
            questions: (0..questions).map(|i| question_dto(&format!("Q{}", i))).collect(),
        }
    }

    /// Expected: label defaults, blank emoji dropped, styles parsed, lengths clamped
    #[test]
    fn option_from_dto_normalizes_fields() {
        let option = SaveOptionParam::from_dto(option_dto(1)).unwrap();

        assert_eq!(option.label, "Open Ticket");
        assert_eq!(option.emoji, None);
        assert_eq!(option.style, OptionButtonStyle::Danger);
        assert_eq!(option.ticket_style, TicketStyle::Thread);
        assert_eq!(option.support_role_ids, vec![42]);
        assert_eq!(option.questions[0].max_length, 4000);
        assert_eq!(option.questions[0].min_length, 10);
        assert_eq!(option.questions[0].style, QuestionStyle::Paragraph);
    }

    /// Expected: a sixth question is rejected
    #[test]
    fn option_rejects_more_than_five_questions() {
        let result = SaveOptionParam::from_dto(option_dto(6));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    /// Expected: blueprint JSON decodes back to the same layout
    #[test]
    fn blueprint_survives_json_storage() {
        let blueprint = PanelBlueprint {
            name: "Support".to_string(),
            embed: PanelEmbed {
                title: Some("Need help?".to_string()),
                color: "#D4AF37".to_string(),
                ..Default::default()
            },
            options: vec![SaveOptionParam::from_dto(option_dto(2)).unwrap()],
        };

        let json = blueprint.to_json().unwrap();
        assert_eq!(PanelBlueprint::from_json(&json).unwrap(), blueprint);
    }

    #[test]
    fn corrupt_blueprint_is_an_internal_error() {
        assert!(matches!(
            PanelBlueprint::from_json("{not json"),
            Err(AppError::InternalErr(_))
        ));
    }
}
