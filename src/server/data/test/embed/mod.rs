use crate::server::{
    data::embed::EmbedRepository,
    error::AppError,
    model::embed::{EmbedContent, SaveEmbedParam},
};
use entity::prelude::*;
use test_utils::{builder::TestBuilder, factory};

mod crud;

fn embed(bot_id: i32, guild_id: u64, name: &str) -> SaveEmbedParam {
    SaveEmbedParam {
        bot_id,
        guild_id,
        name: name.to_string(),
        channel_id: Some(42),
        body: EmbedContent {
            title: Some("Rules".to_string()),
            color: "#000000".to_string(),
            ..Default::default()
        },
    }
}
