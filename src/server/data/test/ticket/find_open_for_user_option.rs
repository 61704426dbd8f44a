use super::*;

/// Tests finding the user's open ticket for an option.
///
/// Expected: Ok(Some) while open, Ok(None) once closed
#[tokio::test]
async fn finds_only_open_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let (panel, option) =
        factory::helpers::create_panel_with_option(db, bot.id, &guild.id).await?;
    let guild_id: u64 = guild.id.parse().unwrap();
    let ticket = factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .user_id("55")
        .option(panel.id, option.id)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let found = repo
        .find_open_for_user_option(bot.id, guild_id, 55, option.id)
        .await?;
    assert_eq!(found.map(|t| t.id), Some(ticket.id));

    repo.close(
        ticket.id,
        CloseTicketParam {
            closed_by: "1".to_string(),
            reason: "done".to_string(),
        },
    )
    .await?;

    let after_close = repo
        .find_open_for_user_option(bot.id, guild_id, 55, option.id)
        .await?;
    assert!(after_close.is_none());

    Ok(())
}

/// Tests that other users and other options do not match.
///
/// Expected: Ok(None) for a different user and for a different option
#[tokio::test]
async fn ignores_other_users_and_options() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let (panel, option) =
        factory::helpers::create_panel_with_option(db, bot.id, &guild.id).await?;
    let other_option = factory::create_option(db, panel.id).await?;
    let guild_id: u64 = guild.id.parse().unwrap();
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .user_id("55")
        .option(panel.id, option.id)
        .build()
        .await?;

    let repo = TicketRepository::new(db);

    assert!(repo
        .find_open_for_user_option(bot.id, guild_id, 56, option.id)
        .await?
        .is_none());
    assert!(repo
        .find_open_for_user_option(bot.id, guild_id, 55, other_option.id)
        .await?
        .is_none());

    Ok(())
}
