//! Database repository layer for all domain entities.
//!
//! Repositories use SeaORM entity models internally and return domain models, so
//! snowflake strings and JSON columns are decoded once at this boundary. All queries,
//! inserts, updates and deletes go through these repositories.

pub mod bot;
pub mod custom_command;
pub mod embed;
pub mod guild;
pub mod invite_join;
pub mod panel;
pub mod steam_link;
pub mod sticky_message;
pub mod template;
pub mod ticket;
pub mod user;
pub mod welcome_settings;

#[cfg(test)]
mod test;
