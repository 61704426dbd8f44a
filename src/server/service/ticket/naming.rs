//! Ticket channel and thread naming.

use crate::server::{
    model::panel::{PanelOption, TicketStyle},
    util::placeholder::{render, truncate_chars},
};

const MAX_NAME_LEN: usize = 100;
const NO_STEAM: &str = "no-steam";

/// Values available to a naming pattern.
pub struct NameVars<'a> {
    pub username: &'a str,
    pub user_id: u64,
    pub discriminator: Option<u16>,
    pub ticket_number: i32,
    pub option_label: &'a str,
    pub guild_name: &'a str,
    pub steam_id: Option<&'a str>,
}

/// Picks the option's naming pattern.
///
/// Patterns without placeholders get the user and ticket number appended, so
/// a plain prefix such as `support` yields `support-{USER}-{TICKET_NUMBER}`.
pub fn name_pattern(option: &PanelOption) -> String {
    let base = option
        .ticket_prefix
        .as_deref()
        .or(option.category_name.as_deref())
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .unwrap_or("ticket");

    if base.contains('{') || base.contains('}') {
        base.to_string()
    } else {
        format!("{}-{{USER}}-{{TICKET_NUMBER}}", base)
    }
}

/// Renders a ticket name for the given style.
///
/// Thread names keep their case and symbols. Channel names are reduced to the
/// characters Discord accepts for text channels.
pub fn ticket_name(pattern: &str, vars: &NameVars<'_>, style: TicketStyle) -> String {
    let user_id = vars.user_id.to_string();
    let discriminator = vars.discriminator.unwrap_or(0).to_string();
    let ticket_number = vars.ticket_number.to_string();

    let raw = render(
        pattern,
        &[
            ("USER", vars.username),
            ("USER_NAME", vars.username),
            ("USERNAME", vars.username),
            ("USER_ID", &user_id),
            ("USER_DISCRIMINATOR", &discriminator),
            ("TICKET_NUMBER", &ticket_number),
            ("TYPE", vars.option_label),
            ("GUILD_NAME", vars.guild_name),
            ("STEAM_ID", vars.steam_id.unwrap_or(NO_STEAM)),
        ],
    );

    match style {
        TicketStyle::Thread => truncate_chars(&raw, MAX_NAME_LEN),
        TicketStyle::Channel => channel_safe(&raw),
    }
}

fn channel_safe(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    let mut in_whitespace = false;

    for c in raw.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' {
            name.push(c);
        }
    }

    truncate_chars(&name, MAX_NAME_LEN)
}

/// Normalizes a name given to `/rename`.
///
/// Lower-cases and replaces every character outside `[a-z0-9-]` with `-`.
pub fn sanitize_rename(name: &str) -> String {
    let name: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();

    truncate_chars(&name, MAX_NAME_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(username: &'a str, steam: Option<&'a str>) -> NameVars<'a> {
        NameVars {
            username,
            user_id: 123,
            discriminator: None,
            ticket_number: 7,
            option_label: "Bug Report",
            guild_name: "My Guild",
            steam_id: steam,
        }
    }

    fn option(prefix: Option<&str>, category: Option<&str>) -> PanelOption {
        PanelOption {
            id: 1,
            panel_id: 1,
            label: "Support".to_string(),
            emoji: None,
            style: Default::default(),
            category_name: category.map(str::to_string),
            ticket_prefix: prefix.map(str::to_string),
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
    fn plain_prefix_gets_user_and_number() {
        assert_eq!(name_pattern(&option(Some("help"), None)), "help-{USER}-{TICKET_NUMBER}");
        assert_eq!(name_pattern(&option(None, Some("billing"))), "billing-{USER}-{TICKET_NUMBER}");
        assert_eq!(name_pattern(&option(None, None)), "ticket-{USER}-{TICKET_NUMBER}");
        assert_eq!(name_pattern(&option(Some("{type}-{user_id}"), None)), "{type}-{user_id}");
    }

    #[test]
    fn channel_names_are_discord_safe() {
        let name = ticket_name("{TYPE} {user} #{ticket_number}", &vars("Ünï Çödé", None), TicketStyle::Channel);
        assert_eq!(name, "bug-report-n-d-7");
    }

    #[test]
    fn thread_names_keep_symbols() {
        let name = ticket_name("🎫 {TYPE} | {USERNAME}", &vars("Alice", None), TicketStyle::Thread);
        assert_eq!(name, "🎫 Bug Report | Alice");
    }

    #[test]
    fn missing_steam_link_renders_placeholder() {
        let pattern = "{STEAM_ID}-{USER_DISCRIMINATOR}";
        assert_eq!(ticket_name(pattern, &vars("a", None), TicketStyle::Channel), "no-steam-0");
        assert_eq!(
            ticket_name(pattern, &vars("a", Some("76561198000000000")), TicketStyle::Channel),
            "76561198000000000-0"
        );
    }

    #[test]
    fn names_are_capped_at_100_chars() {
        let long = "x".repeat(150);
        assert_eq!(ticket_name(&long, &vars("a", None), TicketStyle::Thread).chars().count(), 100);
        assert_eq!(ticket_name(&long, &vars("a", None), TicketStyle::Channel).len(), 100);
    }

    #[test]
    fn rename_replaces_invalid_characters() {
        assert_eq!(sanitize_rename("Urgent Issue!"), "urgent-issue-");
        assert_eq!(sanitize_rename("billing_42"), "billing-42");
    }
}
