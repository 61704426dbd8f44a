use sea_orm::DatabaseConnection;
use serenity::all::{Context, Message};

use crate::server::{
    bot::manager::BotRuntime,
    data::ticket::TicketRepository,
    service::{
        custom_command::{command_reply, CustomCommandService},
        sticky::StickyService,
    },
};

/// Handles message creation in a guild channel.
///
/// Bot and DM messages are ignored. A message in an open ticket refreshes its
/// activity, a `!trigger` message is answered by a custom command and a
/// message in a sticky channel moves the sticky below it.
pub async fn handle_message(
    db: &DatabaseConnection,
    runtime: &BotRuntime,
    ctx: Context,
    message: Message,
) {
    if message.author.bot {
        return;
    }
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let bot_id = runtime.bot_id;
    let channel_id = message.channel_id.get();
    let at = message.timestamp.to_utc();

    if let Err(e) = TicketRepository::new(db)
        .record_activity(channel_id, message.author.id.get(), at)
        .await
    {
        tracing::error!("Failed to record activity in channel {}: {}", channel_id, e);
    }

    match CustomCommandService::new(db, bot_id)
        .match_message(guild_id.get(), &message.content)
        .await
    {
        Ok(Some(command)) => {
            if let Err(e) = message
                .channel_id
                .send_message(&ctx.http, command_reply(&command))
                .await
            {
                tracing::warn!("Failed to answer command '{}': {}", command.trigger, e);
            }
        }
        Ok(None) => {}
        Err(e) => tracing::error!("Failed to look up custom command: {}", e),
    }

    if let Some(entry) = runtime.sticky.get(channel_id).await {
        if let Err(e) = StickyService::new(db, bot_id)
            .repost(&ctx.http, &runtime.sticky, channel_id, entry)
            .await
        {
            tracing::warn!("Failed to repost sticky in channel {}: {}", channel_id, e);
        }
    }
}
