//! Keeps the invite use cache in step with invites created and deleted while
//! the bot runs.

use serenity::all::{InviteCreateEvent, InviteDeleteEvent};

use crate::server::bot::manager::BotRuntime;

pub async fn handle_invite_create(runtime: &BotRuntime, data: InviteCreateEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    runtime
        .invites
        .insert_code(guild_id.get(), data.code, data.uses)
        .await;
}

pub async fn handle_invite_delete(runtime: &BotRuntime, data: InviteDeleteEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    runtime.invites.remove_code(guild_id.get(), &data.code).await;
}
