use crate::server::{
    data::{
        custom_command::CustomCommandRepository, invite_join::InviteJoinRepository,
        steam_link::SteamLinkRepository, sticky_message::StickyMessageRepository,
        template::TemplateRepository, welcome_settings::WelcomeSettingsRepository,
    },
    error::AppError,
    model::{
        community::{RecordInviteJoinParam, SaveCustomCommandParam, WelcomeSettings},
        panel::{PanelBlueprint, PanelEmbed},
    },
};
use chrono::{Duration, Utc};
use entity::prelude::*;
use test_utils::{builder::TestBuilder, factory};

mod custom_command;
mod invite_join;
mod steam_link;
mod sticky_message;
mod template;
mod welcome_settings;
