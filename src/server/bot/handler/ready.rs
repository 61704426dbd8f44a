//! Ready event handler for bot initialization.
//!
//! Fired once the bot completes the gateway handshake. Syncs a guild row for
//! every guild the bot is in, stores the guild count and registers the global
//! slash commands.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, Ready};

use crate::server::{
    bot::{commands, manager::BotRuntime},
    data::{bot::BotRepository, guild::GuildRepository},
};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `db` - Database connection
/// - `runtime` - State of the bot that connected
/// - `ctx` - Discord context
/// - `ready` - Ready event data containing the bot user and its guilds
pub async fn handle_ready(db: &DatabaseConnection, runtime: &BotRuntime, ctx: Context, ready: Ready) {
    let bot_id = runtime.bot_id;
    tracing::info!(
        "Bot {} ({}) is connected to Discord in {} guilds",
        bot_id,
        ready.user.name,
        ready.guilds.len()
    );

    match ctx.http.get_guilds(None, None).await {
        Ok(guilds) => {
            let guild_repo = GuildRepository::new(db);
            for guild in guilds {
                if let Err(e) = guild_repo.upsert(guild.id.get(), bot_id, &guild.name).await {
                    tracing::error!("Failed to sync guild {} for bot {}: {}", guild.id, bot_id, e);
                }
            }
        }
        Err(e) => tracing::error!("Failed to list guilds of bot {}: {}", bot_id, e),
    }

    if let Err(e) = BotRepository::new(db)
        .update_guilds_count(bot_id, ready.guilds.len() as i32)
        .await
    {
        tracing::error!("Failed to update guild count of bot {}: {}", bot_id, e);
    }

    match commands::register(&ctx.http).await {
        Ok(count) => tracing::debug!("Registered {} commands for bot {}", count, bot_id),
        Err(e) => tracing::error!("Failed to register commands for bot {}: {}", bot_id, e),
    }
}
