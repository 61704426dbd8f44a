//! Discord messages, embeds and components of the ticket workflow.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, CreateInputText,
    CreateModal, InputTextStyle, ReactionType, Timestamp,
};

use crate::server::{
    model::{
        panel::{PanelOption, PanelQuestion, QuestionStyle, MAX_OPTION_QUESTIONS},
        ticket::{Ticket, TicketResponse},
    },
    util::{
        color,
        locale::{Language, Text},
        placeholder::truncate_chars,
    },
};

pub const CLOSE_BUTTON: &str = "ticket_close";
pub const CLAIM_BUTTON: &str = "ticket_claim";
pub const UNCLAIM_BUTTON: &str = "ticket_unclaim";
pub const TRANSCRIPT_BUTTON: &str = "ticket_transcript";
pub const OPEN_BUTTON_PREFIX: &str = "ticket_open_";
pub const FORM_MODAL_PREFIX: &str = "ticket_form_";
pub const QUESTION_INPUT_PREFIX: &str = "q_";

const MODAL_TITLE_LEN: usize = 45;
const INPUT_LABEL_LEN: usize = 45;
const FIELD_VALUE_LEN: usize = 1024;
const DEFAULT_PLACEHOLDER: &str = "Enter your answer...";

/// Builder for ticket embeds and components.
pub struct TicketMessageBuilder;

impl TicketMessageBuilder {
    /// Action row shown on an open ticket.
    ///
    /// While claimed the middle button unclaims instead of claiming.
    pub fn action_row(claimed: bool) -> CreateActionRow {
        let middle = if claimed {
            CreateButton::new(UNCLAIM_BUTTON)
                .label("Unclaim")
                .emoji('❌')
                .style(ButtonStyle::Secondary)
        } else {
            CreateButton::new(CLAIM_BUTTON)
                .label("Claim")
                .emoji('✋')
                .style(ButtonStyle::Primary)
        };

        CreateActionRow::Buttons(vec![
            CreateButton::new(CLOSE_BUTTON)
                .label("Close Ticket")
                .emoji('🔒')
                .style(ButtonStyle::Danger),
            middle,
            CreateButton::new(TRANSCRIPT_BUTTON)
                .label("Transcript")
                .emoji('📋')
                .style(ButtonStyle::Secondary),
        ])
    }

    /// Intake form for an option's questions, at most five inputs.
    pub fn form_modal(option: &PanelOption, questions: &[PanelQuestion]) -> CreateModal {
        let rows = questions
            .iter()
            .take(MAX_OPTION_QUESTIONS)
            .map(|question| {
                let style = match question.style {
                    QuestionStyle::Short => InputTextStyle::Short,
                    QuestionStyle::Paragraph => InputTextStyle::Paragraph,
                };
                let input = CreateInputText::new(
                    style,
                    truncate_chars(&question.question, INPUT_LABEL_LEN),
                    format!("{}{}", QUESTION_INPUT_PREFIX, question.id),
                )
                .placeholder(
                    question
                        .placeholder
                        .clone()
                        .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
                )
                .required(question.required)
                .min_length(question.min_length.clamp(0, 4000) as u16)
                .max_length(question.max_length.clamp(1, 4000) as u16);

                CreateActionRow::InputText(input)
            })
            .collect();

        let title = truncate_chars(&format!("{} - Ticket Form", option.label), MODAL_TITLE_LEN);

        CreateModal::new(format!("{}{}", FORM_MODAL_PREFIX, option.id), title).components(rows)
    }

    /// Embed posted as the first message of a new ticket.
    pub fn welcome_embed(
        ticket: &Ticket,
        option: &PanelOption,
        responses: &[TicketResponse],
        language: Language,
    ) -> CreateEmbed {
        let mention = format!("<@{}>", ticket.user_id);
        let description = match option.welcome_message.as_deref() {
            Some(message) => message.to_string(),
            None => language.format(Text::TicketWelcome, &[("user", &mention)]),
        };

        let mut embed = CreateEmbed::new()
            .color(color::TICKET)
            .title(format!("🎫 Ticket #{}", ticket.ticket_number))
            .description(description)
            .field("Created By", mention, true)
            .field("Category", option.label.clone(), true)
            .field("Status", "🟢 Open", true)
            .timestamp(Timestamp::now())
            .footer(CreateEmbedFooter::new(format!("Ticket ID: {}", ticket.id)));

        if !responses.is_empty() {
            embed = embed.field("\u{200b}", "**📝 Form Responses**", false);
            for response in responses {
                embed = embed.field(
                    truncate_chars(&response.question, 256),
                    response_value(&response.response),
                    false,
                );
            }
        }

        embed
    }

    pub fn claimed_embed(staff_id: u64) -> CreateEmbed {
        CreateEmbed::new()
            .color(color::SUCCESS)
            .description(format!("✋ **<@{}>** has claimed this ticket.", staff_id))
            .timestamp(Timestamp::now())
    }

    pub fn unclaimed_embed(staff_id: u64) -> CreateEmbed {
        CreateEmbed::new()
            .color(color::WARNING)
            .description(format!("❌ **<@{}>** has unclaimed this ticket.", staff_id))
            .timestamp(Timestamp::now())
    }

    /// Embed announcing a close inside the ticket channel.
    pub fn close_embed(
        ticket_number: i32,
        closed_by: &str,
        reason: &str,
        transcript_url: Option<&str>,
    ) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .color(color::ERROR)
            .title("🔒 Ticket Closed")
            .description(format!("This ticket has been closed by {}", closed_by))
            .field("Closed By", closed_by, true)
            .field("Ticket ID", format!("#{}", ticket_number), true)
            .field("Reason", truncate_chars(reason, FIELD_VALUE_LEN), false)
            .timestamp(Timestamp::now());

        if let Some(url) = transcript_url {
            embed = embed.field("Transcript", format!("[View Transcript]({})", url), false);
        }

        embed
    }

    pub fn auto_close_embed(language: Language, transcript_url: Option<&str>) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .color(color::ERROR)
            .title("🔒 Ticket Auto-Closed")
            .description(language.get(Text::AutoClosed))
            .timestamp(Timestamp::now());

        if let Some(url) = transcript_url {
            embed = embed.field("Transcript", format!("[View Transcript]({})", url), false);
        }

        embed
    }

    pub fn auto_close_warning_embed(language: Language, hours_left: i32) -> CreateEmbed {
        CreateEmbed::new()
            .color(color::WARNING)
            .description(language.format(
                Text::AutoCloseWarning,
                &[("hours", &hours_left.to_string())],
            ))
            .timestamp(Timestamp::now())
    }

    pub fn log_created_embed(
        ticket_number: i32,
        user_id: u64,
        category: &str,
        channel_id: u64,
    ) -> CreateEmbed {
        CreateEmbed::new()
            .color(color::SUCCESS)
            .title("🎫 Ticket Created")
            .field("Ticket", format!("#{}", ticket_number), true)
            .field("User", format!("<@{}>", user_id), true)
            .field("Category", category, true)
            .field("Channel", format!("<#{}>", channel_id), false)
            .timestamp(Timestamp::now())
    }

    pub fn log_closed_embed(
        ticket_number: i32,
        closed_by: &str,
        reason: &str,
        transcript_url: Option<&str>,
    ) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .color(color::ERROR)
            .title("🔒 Ticket Closed")
            .field("Ticket", format!("#{}", ticket_number), true)
            .field("Closed By", closed_by, true)
            .field("Reason", truncate_chars(reason, FIELD_VALUE_LEN), true)
            .timestamp(Timestamp::now());

        if let Some(url) = transcript_url {
            embed = embed.field("Transcript", format!("[View]({})", url), true);
        }

        embed
    }

    /// Embed for `/ticket info`.
    pub fn info_embed(
        ticket: &Ticket,
        category: Option<&str>,
        participants: &[u64],
        responses: &[TicketResponse],
    ) -> CreateEmbed {
        let status = if ticket.is_open() { "🟢 Open" } else { "🔴 Closed" };
        let claimed = ticket
            .claimed_by
            .map(|id| format!("<@{}>", id))
            .unwrap_or_else(|| "*Unclaimed*".to_string());

        let mut embed = CreateEmbed::new()
            .color(color::PRIMARY)
            .title(format!("🎫 Ticket #{}", ticket.ticket_number))
            .field("Created By", format!("<@{}>", ticket.user_id), true)
            .field("Category", category.unwrap_or("Unknown"), true)
            .field("Status", status, true)
            .field("Claimed By", claimed, true)
            .field(
                "Created At",
                format!("<t:{}:F>", ticket.opened_at.timestamp()),
                true,
            )
            .timestamp(Timestamp::now());

        let added: Vec<String> = participants
            .iter()
            .filter(|id| **id != ticket.user_id)
            .map(|id| format!("<@{}>", id))
            .collect();
        if !added.is_empty() {
            embed = embed.field("Added Users", added.join(", "), false);
        }

        if !responses.is_empty() {
            embed = embed.field("\u{200b}", "**📝 Form Responses**", false);
            for response in responses {
                embed = embed.field(
                    truncate_chars(&response.question, 256),
                    response_value(&response.response),
                    false,
                );
            }
        }

        embed
    }

    /// Plain embed with a colour and description, used for short notices.
    pub fn notice(color: u32, description: impl Into<String>) -> CreateEmbed {
        CreateEmbed::new()
            .color(color)
            .description(description)
            .timestamp(Timestamp::now())
    }
}

/// Parses the emoji of a panel button.
///
/// Custom emojis use the `<:name:id>` or `<a:name:id>` form; anything else is
/// sent as a unicode emoji.
pub fn parse_emoji(value: &str) -> Option<ReactionType> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if value.starts_with('<') {
        return ReactionType::try_from(value).ok();
    }

    Some(ReactionType::Unicode(value.to_string()))
}

fn response_value(response: &str) -> String {
    if response.trim().is_empty() {
        "*No response*".to_string()
    } else {
        truncate_chars(response, FIELD_VALUE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_is_marked() {
        assert_eq!(response_value("  "), "*No response*");
        assert_eq!(response_value("fine"), "fine");
        assert_eq!(response_value(&"a".repeat(2000)).len(), FIELD_VALUE_LEN);
    }

    #[test]
    fn parses_unicode_and_custom_emojis() {
        assert_eq!(parse_emoji(""), None);
        assert_eq!(
            parse_emoji("🎫"),
            Some(ReactionType::Unicode("🎫".to_string()))
        );
        assert!(matches!(
            parse_emoji("<:ticket:123456789012345678>"),
            Some(ReactionType::Custom { .. })
        ));
    }
}
