//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user, a bot owned by that user and a guild configured for the bot.
///
/// # Returns
/// - `Ok((user, bot, guild))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_guild_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::bot::Model,
        entity::guild::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let bot = crate::factory::bot::create_bot(db, user.id).await?;
    let guild = crate::factory::guild::create_guild(db, bot.id).await?;

    Ok((user, bot, guild))
}

/// Creates a panel with one option in the guild.
///
/// # Returns
/// - `Ok((panel, option))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_panel_with_option(
    db: &DatabaseConnection,
    bot_id: i32,
    guild_id: &str,
) -> Result<(entity::panel::Model, entity::panel_option::Model), DbErr> {
    let panel = crate::factory::panel::create_panel(db, bot_id, guild_id).await?;
    let option = crate::factory::panel::create_option(db, panel.id).await?;

    Ok((panel, option))
}
