use sea_orm::DatabaseConnection;
use serenity::all::{
    Context, EventHandler, Guild, GuildId, Interaction, InviteCreateEvent, InviteDeleteEvent,
    Member, Message, Ready, User,
};
use serenity::async_trait;
use std::sync::Arc;

use crate::server::bot::manager::BotRuntime;

pub mod guild;
pub mod interaction;
pub mod invite;
pub mod member;
pub mod message;
pub mod ready;

/// Event handler of one tenant bot
pub struct Handler {
    pub db: DatabaseConnection,
    pub runtime: Arc<BotRuntime>,
}

impl Handler {
    pub fn new(db: DatabaseConnection, runtime: Arc<BotRuntime>) -> Self {
        Self { db, runtime }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.db, &self.runtime, ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.db, &self.runtime, ctx, guild, is_new).await;
    }

    /// Called for button presses, modal submits and slash commands
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction(&self.db, &self.runtime, ctx, interaction).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.db, &self.runtime, ctx, message).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.db, &self.runtime, ctx, new_member).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        _member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(&self.db, &self.runtime, ctx, guild_id, user).await;
    }

    async fn invite_create(&self, _ctx: Context, data: InviteCreateEvent) {
        invite::handle_invite_create(&self.runtime, data).await;
    }

    async fn invite_delete(&self, _ctx: Context, data: InviteDeleteEvent) {
        invite::handle_invite_delete(&self.runtime, data).await;
    }
}
