use super::*;

/// Tests the average first-response time.
///
/// Expected: average of 60 and 180 seconds is 120, tickets without a response ignored
#[tokio::test]
async fn averages_response_times() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .response_time(60)
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .response_time(180)
        .build()
        .await?;
    factory::create_ticket(db, bot.id, &guild.id).await?;

    let average = TicketRepository::new(db)
        .average_response_seconds(bot.id, guild.id.parse().unwrap())
        .await?;

    assert_eq!(average, Some(120));

    Ok(())
}

/// Tests the activity window query.
///
/// Expected: tickets opened or closed in the window are returned, older ones are not
#[tokio::test]
async fn selects_tickets_active_since() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let now = Utc::now();
    factory::create_ticket(db, bot.id, &guild.id).await?;
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .opened_at(now - Duration::days(30))
        .closed_at(now - Duration::days(1))
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .opened_at(now - Duration::days(30))
        .closed_at(now - Duration::days(20))
        .build()
        .await?;

    let guild_id: u64 = guild.id.parse().unwrap();
    let repo = TicketRepository::new(db);
    let times = repo
        .times_since(bot.id, guild_id, now - Duration::days(7))
        .await?;

    assert_eq!(times.len(), 2);
    assert_eq!(repo.count(bot.id, guild_id, None).await?, 3);
    assert_eq!(
        repo.count(bot.id, guild_id, Some(TicketStatus::Closed)).await?,
        2
    );

    Ok(())
}
