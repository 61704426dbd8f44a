//! SeaORM entities for the ticketdesk database.

pub mod prelude;

pub mod bot;
pub mod custom_command;
pub mod embed;
pub mod guild;
pub mod invite_code;
pub mod invite_join;
pub mod panel;
pub mod panel_option;
pub mod panel_question;
pub mod steam_link;
pub mod sticky_message;
pub mod template;
pub mod ticket;
pub mod ticket_participant;
pub mod ticket_response;
pub mod user;
pub mod welcome_settings;
