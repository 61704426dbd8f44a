use serenity::all::{
    ChannelId, ChannelType, CreateEmbed, EditChannel, PermissionOverwrite,
    PermissionOverwriteType, Permissions, UserId,
};

use crate::server::{
    data::{panel::PanelRepository, ticket::TicketRepository},
    error::AppError,
    model::ticket::Ticket,
    util::{
        color,
        locale::{Language, Text},
    },
};

use super::{
    builder::TicketMessageBuilder, create::member_permissions, naming::sanitize_rename,
    TicketService,
};

impl<'a> TicketService<'a> {
    /// Gives a member access to a ticket.
    ///
    /// Channels get a member overwrite; threads get the member added.
    ///
    /// # Returns
    /// - `Ok(CreateEmbed)` - Reply for the command
    /// - `Err(AppError)` - Discord or database error
    pub async fn add_participant(
        &self,
        ticket: &Ticket,
        user_id: u64,
        added_by: u64,
    ) -> Result<CreateEmbed, AppError> {
        let channel_id = ChannelId::new(ticket.channel_id);

        if self.is_thread(channel_id).await {
            channel_id
                .add_thread_member(&self.http, UserId::new(user_id))
                .await?;
        } else {
            channel_id
                .create_permission(
                    &self.http,
                    PermissionOverwrite {
                        allow: member_permissions(),
                        deny: Permissions::empty(),
                        kind: PermissionOverwriteType::Member(UserId::new(user_id)),
                    },
                )
                .await?;
        }

        TicketRepository::new(self.db)
            .add_participant(ticket.id, user_id, Some(added_by))
            .await?;

        Ok(TicketMessageBuilder::notice(
            color::SUCCESS,
            format!("✅ <@{}> has been added to this ticket.", user_id),
        ))
    }

    /// Removes a member's access to a ticket. The owner cannot be removed.
    pub async fn remove_participant(
        &self,
        ticket: &Ticket,
        user_id: u64,
    ) -> Result<CreateEmbed, AppError> {
        if user_id == ticket.user_id {
            let language = self.language(ticket.guild_id).await;
            return Ok(TicketMessageBuilder::notice(
                color::ERROR,
                language.get(Text::CannotRemoveOwner),
            ));
        }

        let channel_id = ChannelId::new(ticket.channel_id);

        if self.is_thread(channel_id).await {
            channel_id
                .remove_thread_member(&self.http, UserId::new(user_id))
                .await?;
        } else {
            channel_id
                .delete_permission(
                    &self.http,
                    PermissionOverwriteType::Member(UserId::new(user_id)),
                )
                .await?;
        }

        TicketRepository::new(self.db)
            .remove_participant(ticket.id, user_id)
            .await?;

        Ok(TicketMessageBuilder::notice(
            color::WARNING,
            format!("❌ <@{}> has been removed from this ticket.", user_id),
        ))
    }

    /// Renames the ticket channel and returns the reply text.
    pub async fn rename(&self, ticket: &Ticket, name: &str) -> Result<String, AppError> {
        let name = sanitize_rename(name);
        if name.trim_matches('-').is_empty() {
            return Err(AppError::BadRequest("Invalid channel name".to_string()));
        }

        ChannelId::new(ticket.channel_id)
            .edit(&self.http, EditChannel::new().name(&name))
            .await?;

        Ok(format!("✅ Ticket renamed to **{}**", name))
    }

    /// Builds the `/ticket info` embed.
    pub async fn info(&self, ticket: &Ticket) -> Result<CreateEmbed, AppError> {
        let category = match ticket.option_id {
            Some(option_id) => PanelRepository::new(self.db)
                .find_option(option_id)
                .await?
                .map(|(_, entry)| entry.option.label),
            None => None,
        };

        let repo = TicketRepository::new(self.db);
        let participants = repo.participants(ticket.id).await?;
        let responses = repo.responses(ticket.id).await?;

        Ok(TicketMessageBuilder::info_embed(
            ticket,
            category.as_deref(),
            &participants,
            &responses,
        ))
    }

    /// Reply used when a ticket command runs outside a ticket.
    pub fn not_ticket_reply(language: Language) -> String {
        language.get(Text::NotTicketChannel).to_string()
    }

    async fn is_thread(&self, channel_id: ChannelId) -> bool {
        match channel_id.to_channel(&self.http).await {
            Ok(channel) => channel
                .guild()
                .map(|channel| channel.kind == ChannelType::PrivateThread)
                .unwrap_or(false),
            Err(e) => {
                tracing::warn!("Failed to fetch channel {}: {}", channel_id, e);
                false
            }
        }
    }
}
