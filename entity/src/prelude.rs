pub use super::bot::Entity as Bot;
pub use super::custom_command::Entity as CustomCommand;
pub use super::embed::Entity as Embed;
pub use super::guild::Entity as Guild;
pub use super::invite_code::Entity as InviteCode;
pub use super::invite_join::Entity as InviteJoin;
pub use super::panel::Entity as Panel;
pub use super::panel_option::Entity as PanelOption;
pub use super::panel_question::Entity as PanelQuestion;
pub use super::steam_link::Entity as SteamLink;
pub use super::sticky_message::Entity as StickyMessage;
pub use super::template::Entity as Template;
pub use super::ticket::Entity as Ticket;
pub use super::ticket_participant::Entity as TicketParticipant;
pub use super::ticket_response::Entity as TicketResponse;
pub use super::user::Entity as User;
pub use super::welcome_settings::Entity as WelcomeSettings;
