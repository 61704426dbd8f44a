use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, Context, CreateMessage, GuildId, Member, RoleId, User};

use crate::server::{
    bot::manager::BotRuntime,
    service::{
        invite::InviteService,
        welcome::{render_goodbye, render_welcome, MemberVars, WelcomeService},
    },
};

/// Guild name and member count from the cache.
fn guild_details(ctx: &Context, guild_id: GuildId) -> (String, u64) {
    ctx.cache
        .guild(guild_id)
        .map(|guild| (guild.name.clone(), guild.member_count))
        .unwrap_or_default()
}

/// Handles the guild_member_addition event when a member joins a guild.
///
/// Attributes the join to an invite, assigns the auto-role and posts the
/// welcome message, each step independent of the others.
pub async fn handle_guild_member_addition(
    db: &DatabaseConnection,
    runtime: &BotRuntime,
    ctx: Context,
    new_member: Member,
) {
    let bot_id = runtime.bot_id;
    let guild_id = new_member.guild_id;
    let user = &new_member.user;

    if let Err(e) = InviteService::new(db, bot_id)
        .record_join(&ctx.http, &runtime.invites, guild_id.get(), user.id.get())
        .await
    {
        tracing::error!("Failed to record invite for member {}: {}", user.id, e);
    }

    let settings = match WelcomeService::new(db, bot_id).get(guild_id.get()).await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load welcome settings of guild {}: {}", guild_id, e);
            return;
        }
    };

    if settings.autorole_enabled {
        if let Some(role_id) = settings.autorole_id {
            if let Err(e) = new_member.add_role(&ctx.http, RoleId::new(role_id)).await {
                tracing::warn!(
                    "Failed to assign auto-role {} to {} in guild {}: {}",
                    role_id,
                    user.id,
                    guild_id,
                    e
                );
            }
        }
    }

    let Some(channel_id) = settings
        .welcome_channel_id
        .filter(|_| settings.welcome_enabled)
    else {
        return;
    };

    let (server, member_count) = guild_details(&ctx, guild_id);
    let tag = user.tag();
    let content = render_welcome(
        &settings.welcome_message,
        &MemberVars {
            user_id: user.id.get(),
            tag: &tag,
            username: &user.name,
            server: &server,
            member_count,
        },
    );

    if let Err(e) = ChannelId::new(channel_id)
        .send_message(&ctx.http, CreateMessage::new().content(content))
        .await
    {
        tracing::warn!("Failed to send welcome message in guild {}: {}", guild_id, e);
    }
}

/// Handles the guild_member_removal event by posting the goodbye message.
pub async fn handle_guild_member_removal(
    db: &DatabaseConnection,
    runtime: &BotRuntime,
    ctx: Context,
    guild_id: GuildId,
    user: User,
) {
    let settings = match WelcomeService::new(db, runtime.bot_id)
        .get(guild_id.get())
        .await
    {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Failed to load welcome settings of guild {}: {}", guild_id, e);
            return;
        }
    };

    let Some(channel_id) = settings
        .goodbye_channel_id
        .filter(|_| settings.goodbye_enabled)
    else {
        return;
    };

    let (server, member_count) = guild_details(&ctx, guild_id);
    let tag = user.tag();
    let content = render_goodbye(
        &settings.goodbye_message,
        &MemberVars {
            user_id: user.id.get(),
            tag: &tag,
            username: &user.name,
            server: &server,
            member_count,
        },
    );

    if let Err(e) = ChannelId::new(channel_id)
        .send_message(&ctx.http, CreateMessage::new().content(content))
        .await
    {
        tracing::warn!("Failed to send goodbye message in guild {}: {}", guild_id, e);
    }
}
