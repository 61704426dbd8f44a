//! Global slash commands registered by every bot on ready.

use serenity::{
    all::{Command, CommandOptionType, CreateCommand, CreateCommandOption, Permissions},
    http::Http,
};

fn reason_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "reason", "Reason for closing")
        .required(false)
}

fn user_option(description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::User, "user", description).required(true)
}

fn name_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, "name", "New channel name")
        .required(true)
        .max_length(100)
}

/// Every slash command a bot serves.
pub fn commands() -> Vec<CreateCommand> {
    let ticket = CreateCommand::new("ticket")
        .description("Manage the current ticket")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "close", "Close this ticket")
                .add_sub_option(reason_option()),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Add a user to this ticket")
                .add_sub_option(user_option("User to add")),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "remove",
                "Remove a user from this ticket",
            )
            .add_sub_option(user_option("User to remove")),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "rename", "Rename this ticket")
                .add_sub_option(name_option()),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "info",
            "Show ticket details",
        ));

    let steam = CreateCommand::new("steam")
        .description("Manage your linked Steam account")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "link", "Link your Steam account")
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "steam_id",
                        "Your Steam64 ID (17 digits)",
                    )
                    .required(true),
                ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "unlink",
            "Unlink your Steam account",
        ));

    vec![
        ticket,
        CreateCommand::new("close")
            .description("Close this ticket")
            .add_option(reason_option()),
        CreateCommand::new("add")
            .description("Add a user to this ticket")
            .add_option(user_option("User to add")),
        CreateCommand::new("remove")
            .description("Remove a user from this ticket")
            .add_option(user_option("User to remove")),
        CreateCommand::new("rename")
            .description("Rename this ticket")
            .add_option(name_option()),
        CreateCommand::new("help").description("Show available commands"),
        CreateCommand::new("stats").description("Show ticket statistics for this server"),
        steam,
        CreateCommand::new("vouch")
            .description("Request a vouch/rating from a user for a transaction")
            .add_option(user_option("The user to request vouch from"))
            .default_member_permissions(Permissions::ADMINISTRATOR),
    ]
}

/// Replaces the bot's global commands.
pub async fn register(http: &Http) -> Result<usize, serenity::Error> {
    let registered = Command::set_global_commands(http, commands()).await?;
    Ok(registered.len())
}

/// Text of the `/help` embed.
pub const HELP_TEXT: &str = "**Ticket commands** (inside a ticket)\n\
`/close [reason]` - Close the ticket\n\
`/add <user>` - Add a user to the ticket\n\
`/remove <user>` - Remove a user from the ticket\n\
`/rename <name>` - Rename the ticket channel\n\
`/ticket info` - Show ticket details\n\n\
**General**\n\
`/stats` - Ticket statistics for this server\n\
`/steam link <steam_id>` - Link your Steam account\n\
`/steam unlink` - Unlink your Steam account\n\n\
**Admin**\n\
`/vouch <user>` - Ask a user to rate the server";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_every_top_level_command() {
        assert_eq!(commands().len(), 9);
    }
}
