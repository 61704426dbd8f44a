use super::*;

/// Tests that the opener's own messages do not count as a response.
///
/// Expected: last_activity refreshed, warning cleared, no first response
#[tokio::test]
async fn owner_message_refreshes_activity_only() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let stale = Utc::now() - Duration::hours(30);
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .channel_id("6001")
        .user_id("42")
        .last_activity(stale)
        .warned(true)
        .build()
        .await?;

    let now = Utc::now();
    let ticket = TicketRepository::new(db)
        .record_activity(6001, 42, now)
        .await?
        .unwrap();

    assert!(ticket.last_activity > stale);
    assert!(!ticket.warned_auto_close);
    assert!(ticket.first_response_at.is_none());

    Ok(())
}

/// Tests the first staff reply sets the response time once.
///
/// Expected: response time of 600 seconds, unchanged by a later reply
#[tokio::test]
async fn first_staff_reply_sets_response_time() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let opened = Utc::now() - Duration::minutes(30);
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .channel_id("6002")
        .user_id("42")
        .opened_at(opened)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let first = repo
        .record_activity(6002, 99, opened + Duration::minutes(10))
        .await?
        .unwrap();
    let later = repo
        .record_activity(6002, 98, opened + Duration::minutes(20))
        .await?
        .unwrap();

    assert_eq!(first.response_time_seconds, Some(600));
    assert_eq!(later.response_time_seconds, Some(600));

    Ok(())
}

/// Tests messages in closed tickets or unrelated channels.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_closed_and_unknown_channels() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .channel_id("6003")
        .closed()
        .build()
        .await?;

    let repo = TicketRepository::new(db);

    assert!(repo.record_activity(6003, 1, Utc::now()).await?.is_none());
    assert!(repo.record_activity(6999, 1, Utc::now()).await?.is_none());

    Ok(())
}
