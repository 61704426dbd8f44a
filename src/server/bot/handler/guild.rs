use sea_orm::DatabaseConnection;
use serenity::all::{Context, Guild};

use crate::server::{
    bot::manager::BotRuntime,
    data::{bot::BotRepository, guild::GuildRepository},
    service::invite::InviteService,
};

/// Handles the guild_create event.
///
/// Fires for every guild once the bot connects and again when it joins a new
/// guild. Upserts the guild row and fills the invite cache; joining a new
/// guild also refreshes the stored guild count.
pub async fn handle_guild_create(
    db: &DatabaseConnection,
    runtime: &BotRuntime,
    ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    let bot_id = runtime.bot_id;
    let guild_id = guild.id.get();

    tracing::debug!(
        "Guild create event for bot {}: {} ({}) - member_count: {}",
        bot_id,
        guild.name,
        guild_id,
        guild.member_count,
    );

    if let Err(e) = GuildRepository::new(db)
        .upsert(guild_id, bot_id, &guild.name)
        .await
    {
        tracing::error!("Failed to upsert guild {} ({}): {}", guild_id, guild.name, e);
        return;
    }

    let snapshot = InviteService::new(db, bot_id)
        .refresh(&ctx.http, &runtime.invites, guild_id)
        .await;
    tracing::debug!(
        "Cached {} invites for guild {} (vanity: {})",
        snapshot.invites.len(),
        guild_id,
        snapshot.vanity.is_some()
    );

    if is_new == Some(true) {
        let count = ctx.cache.guild_count();
        if let Err(e) = BotRepository::new(db)
            .update_guilds_count(bot_id, count as i32)
            .await
        {
            tracing::error!("Failed to update guild count of bot {}: {}", bot_id, e);
        }
        tracing::info!("Bot {} joined guild {} ({})", bot_id, guild.name, guild_id);
    }
}
