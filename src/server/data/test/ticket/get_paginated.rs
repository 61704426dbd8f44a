use super::*;

/// Tests filtering the ticket list by status.
///
/// Expected: two open tickets out of three, total reflecting the filter
#[tokio::test]
async fn filters_by_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    factory::create_ticket(db, bot.id, &guild.id).await?;
    factory::create_ticket(db, bot.id, &guild.id).await?;
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .closed()
        .build()
        .await?;

    let guild_id: u64 = guild.id.parse().unwrap();
    let repo = TicketRepository::new(db);

    let (open, open_total) = repo
        .get_paginated(bot.id, guild_id, Some(TicketStatus::Open), 0, 20)
        .await?;
    let (_, all_total) = repo.get_paginated(bot.id, guild_id, None, 0, 20).await?;

    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|t| t.is_open()));
    assert_eq!(open_total, 2);
    assert_eq!(all_total, 3);

    Ok(())
}

/// Tests that the auto-close sweep sees only open tickets of the bot.
///
/// Expected: one open ticket for the first bot
#[tokio::test]
async fn lists_open_tickets_per_bot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let other_bot = factory::create_bot(db, user.id).await?;
    factory::create_ticket(db, bot.id, &guild.id).await?;
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .closed()
        .build()
        .await?;
    factory::create_ticket(db, other_bot.id, &guild.id).await?;

    let open = TicketRepository::new(db).get_open_by_bot(bot.id).await?;

    assert_eq!(open.len(), 1);
    assert_eq!(open[0].bot_id, bot.id);

    Ok(())
}
