//! Tenant Discord bots.
//!
//! Every registered bot runs its own gateway client in a separate tokio task,
//! tracked by the [`manager::BotManager`] registry. Events of all bots share
//! one [`handler::Handler`] implementation; each instance carries its bot's id
//! and in-memory caches so handlers stay scoped to a single tenant.
//!
//! # Gateway Intents
//!
//! Bots require the following gateway intents:
//! - `GUILDS` - Guild availability, used to sync guild rows
//! - `GUILD_MESSAGES` - Ticket activity, custom commands and sticky messages
//! - `MESSAGE_CONTENT` - Reading `!trigger` custom commands (privileged intent)
//! - `GUILD_MEMBERS` - Welcome, goodbye and auto-role (privileged intent)
//! - `GUILD_EMOJIS_AND_STICKERS` - Emoji lists for panel buttons
//! - `GUILD_INVITES` - Invite tracking
//!
//! Privileged intents must be enabled in the Discord Developer Portal; a bot
//! missing them fails to start with a "disallowed intents" error.

pub mod commands;
pub mod handler;
pub mod manager;
pub mod start;
