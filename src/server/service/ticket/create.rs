//! Ticket creation: channel or private thread, persistence and welcome message.

use std::{collections::HashMap, future::Future};

use serenity::all::{
    ChannelId, ChannelType, CreateChannel, CreateMessage, CreateThread, GuildId,
    PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, User, UserId,
};

use crate::server::{
    data::{guild::GuildRepository, steam_link::SteamLinkRepository, ticket::TicketRepository},
    error::AppError,
    model::{
        guild::GuildConfig,
        panel::{OptionWithQuestions, Panel, PanelOption, PanelQuestion, TicketStyle},
        ticket::{CreateTicketParam, Ticket, TicketResponse},
    },
    util::{locale::Language, placeholder::render},
};

use super::{
    builder::{TicketMessageBuilder, QUESTION_INPUT_PREFIX},
    naming::{name_pattern, ticket_name, NameVars},
    TicketService,
};

/// Permissions granted to the opener and to added participants.
pub fn member_permissions() -> Permissions {
    Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::READ_MESSAGE_HISTORY
        | Permissions::ATTACH_FILES
        | Permissions::EMBED_LINKS
}

/// Awaits `step` for a freshly created ticket channel and runs `cleanup` when it fails.
///
/// The error of `step` is returned; a failed cleanup is only logged.
async fn or_discard<T, C>(
    channel_id: ChannelId,
    step: impl Future<Output = Result<T, AppError>>,
    cleanup: impl Future<Output = Result<C, serenity::Error>>,
) -> Result<T, AppError> {
    match step.await {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Err(delete_err) = cleanup.await {
                tracing::warn!(
                    "Failed to remove channel {} of unsaved ticket: {}",
                    channel_id,
                    delete_err
                );
            }
            Err(e)
        }
    }
}

/// Request to open a ticket for a member.
pub struct NewTicket<'u> {
    pub guild_id: u64,
    pub guild_name: String,
    pub opener: &'u User,
    pub panel: Panel,
    pub entry: OptionWithQuestions,
    pub responses: Vec<TicketResponse>,
}

/// Pairs each question with the value submitted in the intake modal.
///
/// Inputs are keyed by their custom id (`q_{question_id}`); unanswered
/// optional questions keep an empty response.
pub fn collect_responses(
    questions: &[PanelQuestion],
    values: &HashMap<String, String>,
) -> Vec<TicketResponse> {
    questions
        .iter()
        .map(|question| TicketResponse {
            question: question.question.clone(),
            response: values
                .get(&format!("{}{}", QUESTION_INPUT_PREFIX, question.id))
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
        })
        .collect()
}

/// Support roles of the option followed by the guild's, without duplicates.
pub fn support_roles(option: &PanelOption, guild: Option<&GuildConfig>) -> Vec<u64> {
    let mut roles: Vec<u64> = Vec::new();
    let guild_roles = guild.map(|guild| guild.support_role_ids.as_slice()).unwrap_or(&[]);

    for role in option.support_role_ids.iter().chain(guild_roles) {
        if !roles.contains(role) {
            roles.push(*role);
        }
    }

    roles
}

/// Content of the welcome message: opener mention, role pings and the
/// option's ticket message.
pub fn opening_content(
    option: &PanelOption,
    user_id: u64,
    ticket_number: i32,
    roles: &[u64],
) -> String {
    let mention = format!("<@{}>", user_id);
    let mut content = mention.clone();

    if option.pings_enabled {
        for role in roles {
            content.push_str(&format!(" <@&{}>", role));
        }
    }

    match option.ticket_message.as_deref().filter(|m| !m.trim().is_empty()) {
        Some(message) => {
            let message = render(
                message,
                &[
                    ("USER", &mention),
                    ("TICKET_NUMBER", &ticket_number.to_string()),
                ],
            );
            format!("{}\n\n{}", message, content)
        }
        None => content,
    }
}

/// Staff-only note posted after the welcome message.
pub fn staff_info(option: &PanelOption, user: &User, ticket_number: i32) -> Option<String> {
    let message = option
        .staff_thread_message
        .as_deref()
        .filter(|m| !m.trim().is_empty())?;

    let rendered = render(
        message,
        &[
            ("USER", &user.name),
            ("USER_ID", &user.id.to_string()),
            ("TICKET_NUMBER", &ticket_number.to_string()),
        ],
    );

    Some(format!("**Staff Info:**\n{}", rendered))
}

/// Overwrites of a ticket channel.
///
/// `@everyone` shares the guild's id.
pub fn ticket_overwrites(guild_id: u64, user_id: u64, roles: &[u64]) -> Vec<PermissionOverwrite> {
    let mut overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id)),
        },
        PermissionOverwrite {
            allow: member_permissions(),
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(UserId::new(user_id)),
        },
    ];

    overwrites.extend(roles.iter().map(|role| PermissionOverwrite {
        allow: member_permissions() | Permissions::MANAGE_MESSAGES,
        deny: Permissions::empty(),
        kind: PermissionOverwriteType::Role(RoleId::new(*role)),
    }));

    overwrites
}

impl<'a> TicketService<'a> {
    /// Creates a ticket channel or thread and records the ticket.
    ///
    /// Reserves the next ticket number, creates the Discord channel, stores the
    /// ticket with its responses and posts the welcome message. If storing the
    /// ticket fails the new channel is deleted again.
    ///
    /// # Arguments
    /// - `request` - Opener, option and form responses
    ///
    /// # Returns
    /// - `Ok(Ticket)` - The created ticket
    /// - `Err(AppError)` - Discord or database failure
    pub async fn create(&self, request: NewTicket<'_>) -> Result<Ticket, AppError> {
        let NewTicket {
            guild_id,
            guild_name,
            opener,
            panel,
            entry,
            responses,
        } = request;
        let option = &entry.option;

        let guild_repo = GuildRepository::new(self.db);
        let ticket_number = guild_repo.next_ticket_number(guild_id, self.bot_id).await?;
        let guild = guild_repo.find(guild_id, self.bot_id).await?;
        let roles = support_roles(option, guild.as_ref());

        let steam_id = SteamLinkRepository::new(self.db)
            .find(opener.id.get())
            .await?
            .map(|link| link.steam_id);

        let name = ticket_name(
            &name_pattern(option),
            &NameVars {
                username: &opener.name,
                user_id: opener.id.get(),
                discriminator: opener.discriminator.map(|d| d.get()),
                ticket_number,
                option_label: &option.label,
                guild_name: &guild_name,
                steam_id: steam_id.as_deref(),
            },
            option.ticket_style,
        );

        let channel_id = match option.ticket_style {
            TicketStyle::Channel => {
                let mut builder = CreateChannel::new(name)
                    .kind(ChannelType::Text)
                    .topic(format!(
                        "Ticket #{} | Created by {} | {}",
                        ticket_number,
                        opener.tag(),
                        option.label
                    ))
                    .permissions(ticket_overwrites(guild_id, opener.id.get(), &roles));

                let category = option
                    .ticket_category_id
                    .or(guild.as_ref().and_then(|guild| guild.ticket_category_id));
                if let Some(category) = category {
                    builder = builder.category(ChannelId::new(category));
                }

                GuildId::new(guild_id)
                    .create_channel(&self.http, builder)
                    .await?
                    .id
            }
            TicketStyle::Thread => {
                let thread = ChannelId::new(panel.channel_id)
                    .create_thread(
                        &self.http,
                        CreateThread::new(name)
                            .kind(ChannelType::PrivateThread)
                            .invitable(false),
                    )
                    .await?;
                or_discard(
                    thread.id,
                    async {
                        thread
                            .id
                            .add_thread_member(&self.http, opener.id)
                            .await
                            .map_err(AppError::from)
                    },
                    thread.id.delete(&self.http),
                )
                .await?;
                thread.id
            }
        };

        let ticket = or_discard(
            channel_id,
            TicketRepository::new(self.db).create(CreateTicketParam {
                bot_id: self.bot_id,
                guild_id,
                channel_id: channel_id.get(),
                user_id: opener.id.get(),
                panel_id: Some(panel.id),
                option_id: Some(option.id),
                ticket_number,
                responses: responses.clone(),
            }),
            channel_id.delete(&self.http),
        )
        .await?;

        let language = guild
            .as_ref()
            .map(|guild| Language::from_code(&guild.language))
            .unwrap_or(Language::English);

        let welcome = CreateMessage::new()
            .content(opening_content(option, opener.id.get(), ticket_number, &roles))
            .embed(TicketMessageBuilder::welcome_embed(
                &ticket, option, &responses, language,
            ))
            .components(vec![TicketMessageBuilder::action_row(false)]);
        if let Err(e) = channel_id.send_message(&self.http, welcome).await {
            tracing::warn!("Failed to send welcome message of ticket {}: {}", ticket.id, e);
        }

        if let Some(info) = staff_info(option, opener, ticket_number) {
            if let Err(e) = channel_id
                .send_message(&self.http, CreateMessage::new().content(info))
                .await
            {
                tracing::warn!("Failed to send staff info of ticket {}: {}", ticket.id, e);
            }
        }

        self.log_action(
            guild.as_ref(),
            TicketMessageBuilder::log_created_embed(
                ticket_number,
                opener.id.get(),
                &option.label,
                channel_id.get(),
            ),
        )
        .await;

        tracing::info!(
            "Created ticket #{} ({}) for user {} in guild {}",
            ticket_number,
            channel_id,
            opener.id,
            guild_id
        );

        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::{guild::VouchSettings, panel::QuestionStyle};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn option() -> PanelOption {
        PanelOption {
            id: 4,
            panel_id: 1,
            label: "Billing".to_string(),
            emoji: None,
            style: Default::default(),
            category_name: None,
            ticket_prefix: None,
            support_role_ids: vec![10, 20],
            required_roles: vec![],
            welcome_message: None,
            ticket_message: None,
            staff_thread_message: None,
            steam_required: false,
            pings_enabled: true,
            is_disabled: false,
            ticket_style: TicketStyle::Channel,
            ticket_category_id: None,
            position: 0,
        }
    }

    fn question(id: i32, text: &str) -> PanelQuestion {
        PanelQuestion {
            id,
            option_id: 4,
            question: text.to_string(),
            placeholder: None,
            required: false,
            min_length: 0,
            max_length: 100,
            style: QuestionStyle::Short,
            position: id,
        }
    }

    #[test]
    fn responses_follow_question_order() {
        let questions = vec![question(1, "Order id?"), question(2, "Details?")];
        let values = HashMap::from([
            ("q_2".to_string(), " broken ".to_string()),
            ("q_9".to_string(), "ignored".to_string()),
        ]);

        let responses = collect_responses(&questions, &values);

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].question, "Order id?");
        assert_eq!(responses[0].response, "");
        assert_eq!(responses[1].response, "broken");
    }

    #[test]
    fn support_roles_merge_without_duplicates() {
        let guild = GuildConfig {
            guild_id: 1,
            bot_id: 1,
            name: "Guild".to_string(),
            log_channel_id: None,
            transcript_channel_id: None,
            ticket_category_id: None,
            support_role_ids: vec![20, 30],
            admin_role_ids: vec![],
            ticket_counter: 0,
            language: "en".to_string(),
            timezone: "UTC".to_string(),
            auto_close_hours: 0,
            auto_close_warning_hours: 0,
            vouch_channel_id: None,
            vouch: VouchSettings::default(),
        };

        assert_eq!(support_roles(&option(), Some(&guild)), vec![10, 20, 30]);
        assert_eq!(support_roles(&option(), None), vec![10, 20]);
    }

    #[test]
    fn content_pings_roles_only_when_enabled() {
        let mut option = option();
        assert_eq!(opening_content(&option, 5, 1, &[10]), "<@5> <@&10>");

        option.pings_enabled = false;
        assert_eq!(opening_content(&option, 5, 1, &[10]), "<@5>");
    }

    #[test]
    fn ticket_message_is_prepended() {
        let mut option = option();
        option.pings_enabled = false;
        option.ticket_message = Some("Hi {USER}, this is ticket {ticket_number}".to_string());

        assert_eq!(
            opening_content(&option, 5, 12, &[]),
            "Hi <@5>, this is ticket 12\n\n<@5>"
        );
    }

    #[test]
    fn everyone_is_denied_and_roles_can_manage() {
        let overwrites = ticket_overwrites(100, 5, &[10]);

        assert_eq!(overwrites.len(), 3);
        assert_eq!(overwrites[0].deny, Permissions::VIEW_CHANNEL);
        assert!(matches!(
            overwrites[0].kind,
            PermissionOverwriteType::Role(role) if role.get() == 100
        ));
        assert_eq!(overwrites[1].allow, member_permissions());
        assert!(overwrites[2].allow.contains(Permissions::MANAGE_MESSAGES));
    }

    /// Tests that a failed setup step removes the channel it was made for.
    ///
    /// Expected: cleanup runs once and the step's error is returned
    #[tokio::test]
    async fn failed_step_discards_channel() {
        let discarded = AtomicBool::new(false);

        let result: Result<(), AppError> = or_discard(
            ChannelId::new(5),
            async { Err(AppError::BadRequest("member not added".to_string())) },
            async {
                discarded.store(true, Ordering::SeqCst);
                Ok::<_, serenity::Error>(())
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(discarded.load(Ordering::SeqCst));
    }

    /// Tests that a successful setup step keeps the channel.
    ///
    /// Expected: the step's value with no cleanup
    #[tokio::test]
    async fn successful_step_keeps_channel() {
        let discarded = AtomicBool::new(false);

        let result = or_discard(
            ChannelId::new(5),
            async { Ok::<_, AppError>(7) },
            async {
                discarded.store(true, Ordering::SeqCst);
                Ok::<_, serenity::Error>(())
            },
        )
        .await;

        assert_eq!(result.ok(), Some(7));
        assert!(!discarded.load(Ordering::SeqCst));
    }
}
