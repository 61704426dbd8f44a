pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_invite_code_table;
mod m20260301_000003_create_bot_table;
mod m20260301_000004_create_guild_table;
mod m20260301_000005_create_panel_table;
mod m20260301_000006_create_panel_option_table;
mod m20260301_000007_create_panel_question_table;
mod m20260301_000008_create_ticket_table;
mod m20260301_000009_create_ticket_response_table;
mod m20260301_000010_create_ticket_participant_table;
mod m20260301_000011_create_template_table;
mod m20260301_000012_create_custom_command_table;
mod m20260301_000013_create_welcome_settings_table;
mod m20260301_000014_create_sticky_message_table;
mod m20260301_000015_create_invite_join_table;
mod m20260301_000016_create_steam_link_table;
mod m20260301_000017_add_vouch_to_guild_table;
mod m20260301_000018_create_embed_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_invite_code_table::Migration),
            Box::new(m20260301_000003_create_bot_table::Migration),
            Box::new(m20260301_000004_create_guild_table::Migration),
            Box::new(m20260301_000005_create_panel_table::Migration),
            Box::new(m20260301_000006_create_panel_option_table::Migration),
            Box::new(m20260301_000007_create_panel_question_table::Migration),
            Box::new(m20260301_000008_create_ticket_table::Migration),
            Box::new(m20260301_000009_create_ticket_response_table::Migration),
            Box::new(m20260301_000010_create_ticket_participant_table::Migration),
            Box::new(m20260301_000011_create_template_table::Migration),
            Box::new(m20260301_000012_create_custom_command_table::Migration),
            Box::new(m20260301_000013_create_welcome_settings_table::Migration),
            Box::new(m20260301_000014_create_sticky_message_table::Migration),
            Box::new(m20260301_000015_create_invite_join_table::Migration),
            Box::new(m20260301_000016_create_steam_link_table::Migration),
            Box::new(m20260301_000017_add_vouch_to_guild_table::Migration),
            Box::new(m20260301_000018_create_embed_table::Migration),
        ]
    }
}
