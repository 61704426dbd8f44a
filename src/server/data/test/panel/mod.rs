use crate::server::{
    data::panel::PanelRepository,
    error::AppError,
    model::panel::{
        OptionButtonStyle, PanelBlueprint, PanelEmbed, QuestionStyle, SaveOptionParam,
        SavePanelParam, SaveQuestionParam, TicketStyle,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find_option;
mod replace;

fn option(label: &str, questions: &[&str]) -> SaveOptionParam {
    SaveOptionParam {
        label: label.to_string(),
        emoji: Some("🎫".to_string()),
        style: OptionButtonStyle::Success,
        category_name: None,
        ticket_prefix: Some("help".to_string()),
        support_role_ids: vec![10],
        required_roles: vec![],
        welcome_message: None,
        ticket_message: None,
        staff_thread_message: None,
        steam_required: false,
        pings_enabled: true,
        is_disabled: false,
        ticket_style: TicketStyle::Channel,
        ticket_category_id: None,
        questions: questions
            .iter()
            .map(|q| SaveQuestionParam {
                question: q.to_string(),
                placeholder: None,
                required: true,
                min_length: 1,
                max_length: 200,
                style: QuestionStyle::Short,
            })
            .collect(),
    }
}

fn panel_param(bot_id: i32, guild_id: u64, options: Vec<SaveOptionParam>) -> SavePanelParam {
    SavePanelParam {
        bot_id,
        guild_id,
        channel_id: 4000,
        blueprint: PanelBlueprint {
            name: "Support".to_string(),
            embed: PanelEmbed {
                title: Some("Need help?".to_string()),
                color: "#5865F2".to_string(),
                ..Default::default()
            },
            options,
        },
    }
}
