//! Checks run when a member presses a panel button or submits its form.

use crate::server::{
    data::{panel::PanelRepository, steam_link::SteamLinkRepository, ticket::TicketRepository},
    error::AppError,
    model::panel::{OptionWithQuestions, Panel, PanelOption},
    util::locale::{Language, Text},
};

use super::TicketService;

/// Reason a member may not open a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenDenied {
    OptionMissing,
    OptionDisabled,
    MissingRoles(Vec<u64>),
    SteamRequired,
    /// Channel of the member's open ticket for the same option.
    AlreadyOpen(u64),
}

impl OpenDenied {
    pub fn message(&self, language: Language) -> String {
        match self {
            Self::OptionMissing => language.get(Text::OptionMissing).to_string(),
            Self::OptionDisabled => language.get(Text::OptionDisabled).to_string(),
            Self::MissingRoles(roles) => {
                let roles = roles
                    .iter()
                    .map(|id| format!("<@&{}>", id))
                    .collect::<Vec<_>>()
                    .join(", ");
                language.format(Text::MissingRoles, &[("roles", &roles)])
            }
            Self::SteamRequired => language.get(Text::SteamRequired).to_string(),
            Self::AlreadyOpen(channel_id) => {
                language.format(Text::AlreadyOpen, &[("channel", &format!("<#{}>", channel_id))])
            }
        }
    }
}

/// Outcome of the open checks.
#[derive(Debug)]
pub enum OpenCheck {
    Allowed {
        panel: Panel,
        entry: OptionWithQuestions,
    },
    Denied(OpenDenied),
}

/// Checks an option's own rules against the member.
///
/// Runs in order: disabled, required roles, Steam link.
pub fn check_option_rules(
    option: &PanelOption,
    member_roles: &[u64],
    has_steam_link: bool,
) -> Result<(), OpenDenied> {
    if option.is_disabled {
        return Err(OpenDenied::OptionDisabled);
    }

    if !option.required_roles.is_empty()
        && !option
            .required_roles
            .iter()
            .any(|role| member_roles.contains(role))
    {
        return Err(OpenDenied::MissingRoles(option.required_roles.clone()));
    }

    if option.steam_required && !has_steam_link {
        return Err(OpenDenied::SteamRequired);
    }

    Ok(())
}

impl<'a> TicketService<'a> {
    /// Runs every open check for a member and a panel option.
    ///
    /// The option must belong to a panel of this bot in the same guild.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the button was pressed in
    /// - `user_id` - Member pressing the button
    /// - `member_roles` - Role ids the member holds
    /// - `option_id` - Option id parsed from the button's custom id
    ///
    /// # Returns
    /// - `Ok(OpenCheck::Allowed)` - Option, its panel and questions
    /// - `Ok(OpenCheck::Denied)` - Reason to show the member
    /// - `Err(AppError)` - Database error
    pub async fn check_open(
        &self,
        guild_id: u64,
        user_id: u64,
        member_roles: &[u64],
        option_id: i32,
    ) -> Result<OpenCheck, AppError> {
        let found = PanelRepository::new(self.db).find_option(option_id).await?;
        let Some((panel, entry)) = found
            .filter(|(panel, _)| panel.bot_id == self.bot_id && panel.guild_id == guild_id)
        else {
            return Ok(OpenCheck::Denied(OpenDenied::OptionMissing));
        };

        let has_steam_link = if entry.option.steam_required {
            SteamLinkRepository::new(self.db).find(user_id).await?.is_some()
        } else {
            false
        };

        if let Err(denied) = check_option_rules(&entry.option, member_roles, has_steam_link) {
            return Ok(OpenCheck::Denied(denied));
        }

        if let Some(existing) = TicketRepository::new(self.db)
            .find_open_for_user_option(self.bot_id, guild_id, user_id, option_id)
            .await?
        {
            return Ok(OpenCheck::Denied(OpenDenied::AlreadyOpen(existing.channel_id)));
        }

        Ok(OpenCheck::Allowed { panel, entry })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::panel::TicketStyle;

    fn option() -> PanelOption {
        PanelOption {
            id: 3,
            panel_id: 1,
            label: "Support".to_string(),
            emoji: None,
            style: Default::default(),
            category_name: None,
            ticket_prefix: None,
            support_role_ids: vec![],
            required_roles: vec![],
            welcome_message: None,
            ticket_message: None,
            staff_thread_message: None,
            steam_required: false,
            pings_enabled: true,
            is_disabled: false,
            ticket_style: TicketStyle::Channel,
            ticket_category_id: None,
            position: 0,
        }
    }

    #[test]
    fn disabled_option_is_checked_first() {
        let mut option = option();
        option.is_disabled = true;
        option.required_roles = vec![1];

        assert_eq!(
            check_option_rules(&option, &[], false),
            Err(OpenDenied::OptionDisabled)
        );
    }

    #[test]
    fn any_required_role_is_enough() {
        let mut option = option();
        option.required_roles = vec![10, 20];

        assert_eq!(
            check_option_rules(&option, &[5], false),
            Err(OpenDenied::MissingRoles(vec![10, 20]))
        );
        assert_eq!(check_option_rules(&option, &[5, 20], false), Ok(()));
    }

    #[test]
    fn steam_link_required_when_flagged() {
        let mut option = option();
        option.steam_required = true;

        assert_eq!(
            check_option_rules(&option, &[], false),
            Err(OpenDenied::SteamRequired)
        );
        assert_eq!(check_option_rules(&option, &[], true), Ok(()));
    }

    #[test]
    fn denial_messages_mention_roles_and_channel() {
        let roles = OpenDenied::MissingRoles(vec![1, 2]).message(Language::English);
        assert!(roles.ends_with("<@&1>, <@&2>"));

        let open = OpenDenied::AlreadyOpen(99).message(Language::English);
        assert_eq!(open, "❌ You already have an open ticket: <#99>");
    }
}
