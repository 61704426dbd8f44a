//! Button presses, intake form submits and slash commands.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;
use serenity::all::{
    ActionRowComponent, CommandInteraction, ComponentInteraction, Context, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse,
    GuildId, Interaction, ModalInteraction, ResolvedOption, ResolvedValue, RoleId, User,
};

use crate::server::{
    bot::{commands::HELP_TEXT, manager::BotRuntime},
    error::AppError,
    model::{
        panel::{OptionWithQuestions, Panel},
        ticket::{Ticket, TicketResponse},
    },
    service::{
        stats::StatsService,
        steam::SteamService,
        ticket::{
            builder::{
                TicketMessageBuilder, CLAIM_BUTTON, CLOSE_BUTTON, FORM_MODAL_PREFIX,
                OPEN_BUTTON_PREFIX, TRANSCRIPT_BUTTON, UNCLAIM_BUTTON,
            },
            claim::ClaimOutcome,
            close::Closer,
            create::{collect_responses, NewTicket},
            open::OpenCheck,
            TicketService,
        },
        vouch::{parse_rating, VouchOutcome, VouchService},
    },
    util::{
        color,
        locale::{Language, Text},
    },
};

fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

fn public_embed(embed: CreateEmbed) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().embed(embed))
}

/// Guild name and icon from the cache.
fn guild_face(ctx: &Context, guild_id: GuildId) -> (String, Option<String>) {
    ctx.cache
        .guild(guild_id)
        .map(|guild| (guild.name.clone(), guild.icon_url()))
        .unwrap_or_default()
}

fn role_ids(roles: &[RoleId]) -> Vec<u64> {
    roles.iter().map(|role| role.get()).collect()
}

fn string_arg<'a>(args: &[ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    args.iter().find_map(|option| match option.value {
        ResolvedValue::String(value) if option.name == name => Some(value),
        _ => None,
    })
}

fn user_arg(args: &[ResolvedOption<'_>], name: &str) -> Option<u64> {
    args.iter().find_map(|option| match option.value {
        ResolvedValue::User(user, _) if option.name == name => Some(user.id.get()),
        _ => None,
    })
}

/// Dispatches an interaction to its handler; failures are logged.
pub async fn handle_interaction(
    db: &DatabaseConnection,
    runtime: &BotRuntime,
    ctx: Context,
    interaction: Interaction,
) {
    let service = TicketService::new(db, ctx.http.clone(), runtime.bot_id);

    let result = match &interaction {
        Interaction::Component(component) => {
            match parse_rating(&component.data.custom_id) {
                Some(rating) => handle_vouch(db, runtime.bot_id, &ctx, component, rating).await,
                None => handle_component(&service, &ctx, component).await,
            }
        }
        Interaction::Modal(modal) => handle_modal(&service, &ctx, modal).await,
        Interaction::Command(command) => {
            handle_command(&service, db, runtime, &ctx, command).await
        }
        _ => Ok(()),
    };

    if let Err(e) = result {
        tracing::error!(
            "Failed to handle interaction {} for bot {}: {}",
            interaction.id(),
            runtime.bot_id,
            e
        );
    }
}

/// Creates the ticket and returns the reply for the opener.
async fn open_ticket(
    service: &TicketService<'_>,
    guild_id: u64,
    opener: &User,
    panel: Panel,
    entry: OptionWithQuestions,
    responses: Vec<TicketResponse>,
    language: Language,
) -> String {
    let guild_name = match service.guild_config(guild_id).await {
        Ok(config) => config.map(|guild| guild.name).unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to load guild {} for ticket naming: {}", guild_id, e);
            String::new()
        }
    };

    let request = NewTicket {
        guild_id,
        guild_name,
        opener,
        panel,
        entry,
        responses,
    };

    match service.create(request).await {
        Ok(ticket) => language.format(
            Text::TicketCreated,
            &[("channel", &format!("<#{}>", ticket.channel_id))],
        ),
        Err(e) => {
            tracing::error!(
                "Failed to create ticket for {} in guild {}: {}",
                opener.id,
                guild_id,
                e
            );
            language.get(Text::TicketCreateFailed).to_string()
        }
    }
}

async fn handle_component(
    service: &TicketService<'_>,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), AppError> {
    let Some(guild_id) = component.guild_id.map(|id| id.get()) else {
        return Ok(());
    };
    let custom_id = component.data.custom_id.as_str();
    let language = service.language(guild_id).await;

    if let Some(option_id) = custom_id.strip_prefix(OPEN_BUTTON_PREFIX) {
        let Ok(option_id) = option_id.parse::<i32>() else {
            return Ok(());
        };
        let roles = component
            .member
            .as_ref()
            .map(|member| role_ids(&member.roles))
            .unwrap_or_default();

        match service
            .check_open(guild_id, component.user.id.get(), &roles, option_id)
            .await?
        {
            OpenCheck::Denied(denied) => {
                component
                    .create_response(&ctx.http, ephemeral(denied.message(language)))
                    .await?;
            }
            OpenCheck::Allowed { entry, .. } if !entry.questions.is_empty() => {
                let modal = TicketMessageBuilder::form_modal(&entry.option, &entry.questions);
                component
                    .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
                    .await?;
            }
            OpenCheck::Allowed { panel, entry } => {
                component.defer_ephemeral(&ctx.http).await?;
                let reply = open_ticket(
                    service,
                    guild_id,
                    &component.user,
                    panel,
                    entry,
                    Vec::new(),
                    language,
                )
                .await;
                component
                    .edit_response(&ctx.http, EditInteractionResponse::new().content(reply))
                    .await?;
            }
        }

        return Ok(());
    }

    if ![CLOSE_BUTTON, CLAIM_BUTTON, UNCLAIM_BUTTON, TRANSCRIPT_BUTTON].contains(&custom_id) {
        return Ok(());
    }

    let Some(ticket) = service.find_by_channel(component.channel_id.get()).await? else {
        component
            .create_response(&ctx.http, ephemeral(TicketService::not_ticket_reply(language)))
            .await?;
        return Ok(());
    };
    let user_id = component.user.id.get();

    match custom_id {
        CLOSE_BUTTON => {
            if !ticket.is_open() {
                component
                    .create_response(&ctx.http, ephemeral(language.get(Text::AlreadyClosed)))
                    .await?;
                return Ok(());
            }

            component.defer(&ctx.http).await?;
            let closed = service.close(&ticket, Closer::Member(user_id), None).await?;
            component
                .edit_response(
                    &ctx.http,
                    EditInteractionResponse::new().embed(closed.embed(language)),
                )
                .await?;
        }
        CLAIM_BUTTON | UNCLAIM_BUTTON => {
            let message_id = Some(component.message.id.get());
            let outcome = if custom_id == CLAIM_BUTTON {
                service.claim(&ticket, user_id, message_id).await?
            } else {
                service.unclaim(&ticket, user_id, message_id).await?
            };

            let response = match outcome {
                ClaimOutcome::Done => CreateInteractionResponse::Acknowledge,
                ClaimOutcome::Refused(reply) => ephemeral(reply),
            };
            component.create_response(&ctx.http, response).await?;
        }
        TRANSCRIPT_BUTTON => {
            component.defer_ephemeral(&ctx.http).await?;
            let file = service.transcript_file(&ticket).await?;
            component
                .edit_response(&ctx.http, EditInteractionResponse::new().new_attachment(file))
                .await?;
        }
        _ => {}
    }

    Ok(())
}

async fn handle_vouch(
    db: &DatabaseConnection,
    bot_id: i32,
    ctx: &Context,
    component: &ComponentInteraction,
    rating: u8,
) -> Result<(), AppError> {
    let Some(guild_id) = component.guild_id else {
        return Ok(());
    };
    let (guild_name, guild_icon) = guild_face(ctx, guild_id);

    let outcome = VouchService::new(db, bot_id)
        .record(
            &ctx.http,
            guild_id.get(),
            &guild_name,
            guild_icon,
            &component.user,
            rating,
        )
        .await;

    match outcome {
        Ok(VouchOutcome::Posted(reply)) => {
            component
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new().content(reply),
                    ),
                )
                .await?;
            component.message.delete(&ctx.http).await?;
        }
        Ok(VouchOutcome::NotConfigured) => {
            component
                .create_response(&ctx.http, ephemeral("Vouch channel not configured."))
                .await?;
        }
        Err(e) => {
            tracing::error!("Failed to post vouch in guild {}: {}", guild_id, e);
            component
                .create_response(&ctx.http, ephemeral("Error processing vouch."))
                .await?;
        }
    }

    Ok(())
}

async fn handle_modal(
    service: &TicketService<'_>,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), AppError> {
    let Some(guild_id) = modal.guild_id.map(|id| id.get()) else {
        return Ok(());
    };
    let Some(option_id) = modal
        .data
        .custom_id
        .strip_prefix(FORM_MODAL_PREFIX)
        .and_then(|id| id.parse::<i32>().ok())
    else {
        return Ok(());
    };
    let language = service.language(guild_id).await;

    let mut values = HashMap::new();
    for row in &modal.data.components {
        for component in &row.components {
            if let ActionRowComponent::InputText(input) = component {
                values.insert(
                    input.custom_id.clone(),
                    input.value.clone().unwrap_or_default(),
                );
            }
        }
    }

    let roles = modal
        .member
        .as_ref()
        .map(|member| role_ids(&member.roles))
        .unwrap_or_default();
    match service
        .check_open(guild_id, modal.user.id.get(), &roles, option_id)
        .await?
    {
        OpenCheck::Denied(denied) => {
            modal
                .create_response(&ctx.http, ephemeral(denied.message(language)))
                .await?;
        }
        OpenCheck::Allowed { panel, entry } => {
            modal.defer_ephemeral(&ctx.http).await?;
            let responses = collect_responses(&entry.questions, &values);
            let reply = open_ticket(
                service,
                guild_id,
                &modal.user,
                panel,
                entry,
                responses,
                language,
            )
            .await;
            modal
                .edit_response(&ctx.http, EditInteractionResponse::new().content(reply))
                .await?;
        }
    }

    Ok(())
}

async fn handle_command(
    service: &TicketService<'_>,
    db: &DatabaseConnection,
    runtime: &BotRuntime,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let Some(guild_id) = command.guild_id.map(|id| id.get()) else {
        return Ok(());
    };
    let language = service.language(guild_id).await;

    let options = command.data.options();
    let (subcommand, args) = match options.first() {
        Some(ResolvedOption {
            name,
            value: ResolvedValue::SubCommand(args),
            ..
        }) => (Some(*name), args.clone()),
        _ => (None, options.clone()),
    };

    let action = match (command.data.name.as_str(), subcommand) {
        ("ticket", Some(sub)) => sub,
        ("steam", Some("link")) => "steam_link",
        ("steam", Some("unlink")) => "steam_unlink",
        (name, _) => name,
    };

    match action {
        "help" => {
            let embed = CreateEmbed::new()
                .color(color::PRIMARY)
                .title("🎫 Ticket Bot Help")
                .description(HELP_TEXT);
            command
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .embed(embed)
                            .ephemeral(true),
                    ),
                )
                .await?;
        }
        "stats" => {
            let stats = StatsService::new(db, runtime.bot_id)
                .guild_stats(guild_id)
                .await?;
            command
                .create_response(
                    &ctx.http,
                    public_embed(StatsService::stats_embed(&stats, language)),
                )
                .await?;
        }
        "steam_link" => {
            let steam_id = string_arg(&args, "steam_id").unwrap_or_default();
            let reply = SteamService::new(db)
                .link(command.user.id.get(), steam_id, language)
                .await?;
            command.create_response(&ctx.http, ephemeral(reply)).await?;
        }
        "steam_unlink" => {
            let reply = SteamService::new(db)
                .unlink(command.user.id.get(), language)
                .await?;
            command.create_response(&ctx.http, ephemeral(reply)).await?;
        }
        "vouch" => {
            let Some(user_id) = user_arg(&args, "user") else {
                command
                    .create_response(&ctx.http, ephemeral("❌ Please specify a user."))
                    .await?;
                return Ok(());
            };
            let (guild_name, guild_icon) = guild_face(ctx, GuildId::new(guild_id));
            let prompt = VouchService::new(db, runtime.bot_id)
                .prompt(guild_id, user_id, &guild_name, guild_icon)
                .await?;

            command
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .content(prompt.content)
                            .embed(prompt.embed)
                            .components(vec![prompt.buttons]),
                    ),
                )
                .await?;
        }
        "close" | "add" | "remove" | "rename" | "info" => {
            let Some(ticket) = service.find_by_channel(command.channel_id.get()).await? else {
                command
                    .create_response(&ctx.http, ephemeral(TicketService::not_ticket_reply(language)))
                    .await?;
                return Ok(());
            };

            ticket_command(service, ctx, command, &ticket, action, &args, language).await?;
        }
        _ => {}
    }

    Ok(())
}

async fn ticket_command(
    service: &TicketService<'_>,
    ctx: &Context,
    command: &CommandInteraction,
    ticket: &Ticket,
    action: &str,
    args: &[ResolvedOption<'_>],
    language: Language,
) -> Result<(), AppError> {
    let response = match action {
        "close" => {
            if !ticket.is_open() {
                command
                    .create_response(&ctx.http, ephemeral(language.get(Text::AlreadyClosed)))
                    .await?;
                return Ok(());
            }

            command.defer(&ctx.http).await?;
            let closed = service
                .close(
                    ticket,
                    Closer::Member(command.user.id.get()),
                    string_arg(args, "reason"),
                )
                .await?;
            command
                .edit_response(
                    &ctx.http,
                    EditInteractionResponse::new().embed(closed.embed(language)),
                )
                .await?;
            return Ok(());
        }
        "add" => match user_arg(args, "user") {
            Some(user_id) => public_embed(
                service
                    .add_participant(ticket, user_id, command.user.id.get())
                    .await?,
            ),
            None => ephemeral("❌ Please specify a user."),
        },
        "remove" => match user_arg(args, "user") {
            Some(user_id) => public_embed(service.remove_participant(ticket, user_id).await?),
            None => ephemeral("❌ Please specify a user."),
        },
        "rename" => {
            let name = string_arg(args, "name").unwrap_or_default();
            match service.rename(ticket, name).await {
                Ok(reply) => CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new().content(reply),
                ),
                Err(AppError::BadRequest(reason)) => ephemeral(format!("❌ {}", reason)),
                Err(e) => return Err(e),
            }
        }
        "info" => CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .embed(service.info(ticket).await?)
                .ephemeral(true),
        ),
        _ => return Ok(()),
    };

    command.create_response(&ctx.http, response).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ids_keep_order() {
        let roles = [RoleId::new(3), RoleId::new(1)];
        assert_eq!(role_ids(&roles), vec![3, 1]);
    }
}
