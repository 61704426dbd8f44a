use super::*;

/// Tests closing an open ticket.
///
/// Expected: Ok(true) with status, closer and reason stored
#[tokio::test]
async fn closes_open_ticket() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let ticket = factory::create_ticket(db, bot.id, &guild.id).await?;

    let repo = TicketRepository::new(db);
    let closed = repo
        .close(
            ticket.id,
            CloseTicketParam {
                closed_by: "Auto-Close".to_string(),
                reason: "Ticket closed due to inactivity".to_string(),
            },
        )
        .await?;

    assert!(closed);
    let stored = repo.find_by_id(ticket.id).await?.unwrap();
    assert_eq!(stored.status, TicketStatus::Closed);
    assert!(stored.closed_at.is_some());
    assert_eq!(stored.closed_by.as_deref(), Some("Auto-Close"));
    assert_eq!(
        stored.close_reason.as_deref(),
        Some("Ticket closed due to inactivity")
    );

    Ok(())
}

/// Tests closing a ticket twice.
///
/// Expected: second close reports Ok(false) and keeps the first closer
#[tokio::test]
async fn refuses_to_close_twice() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let ticket = factory::create_ticket(db, bot.id, &guild.id).await?;
    let repo = TicketRepository::new(db);

    let first = CloseTicketParam {
        closed_by: "1".to_string(),
        reason: "first".to_string(),
    };
    let second = CloseTicketParam {
        closed_by: "2".to_string(),
        reason: "second".to_string(),
    };

    assert!(repo.close(ticket.id, first).await?);
    assert!(!repo.close(ticket.id, second).await?);
    assert_eq!(
        repo.find_by_id(ticket.id).await?.unwrap().closed_by.as_deref(),
        Some("1")
    );

    Ok(())
}

/// Tests storing and reading back the archived message snapshot.
///
/// Expected: find_by_number returns the saved snapshot
#[tokio::test]
async fn stores_snapshot_for_archive() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let ticket = factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .number(12)
        .closed()
        .build()
        .await?;

    let message = MessageSnapshot {
        id: "9".to_string(),
        content: "thanks!".to_string(),
        author: SnapshotAuthor {
            id: "42".to_string(),
            username: "alice".to_string(),
            avatar: None,
            bot: false,
        },
        timestamp: 1_700_000_000_000,
        attachments: vec![],
        embeds: 0,
        mentions: vec![],
    };

    let repo = TicketRepository::new(db);
    repo.save_snapshot(ticket.id, std::slice::from_ref(&message))
        .await?;

    let (found, snapshot) = repo
        .find_by_number(bot.id, guild.id.parse().unwrap(), 12)
        .await?
        .unwrap();

    assert_eq!(found.id, ticket.id);
    assert_eq!(snapshot, vec![message]);

    Ok(())
}
