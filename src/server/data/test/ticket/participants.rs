use super::*;

/// Tests adding and removing participants.
///
/// Expected: duplicate add reports false, removal drops the user
#[tokio::test]
async fn adds_and_removes_participants() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let ticket = factory::create_ticket(db, bot.id, &guild.id).await?;
    let repo = TicketRepository::new(db);

    assert!(repo.add_participant(ticket.id, 77, Some(1)).await?);
    assert!(!repo.add_participant(ticket.id, 77, Some(1)).await?);
    assert_eq!(repo.participants(ticket.id).await?, vec![77]);

    assert!(repo.remove_participant(ticket.id, 77).await?);
    assert!(repo.participants(ticket.id).await?.is_empty());

    Ok(())
}

/// Tests claiming and unclaiming.
///
/// Expected: claimed_by set then cleared
#[tokio::test]
async fn sets_and_clears_claim() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let ticket = factory::create_ticket(db, bot.id, &guild.id).await?;
    let repo = TicketRepository::new(db);

    repo.set_claim(ticket.id, Some(500)).await?;
    assert_eq!(repo.find_by_id(ticket.id).await?.unwrap().claimed_by, Some(500));

    repo.set_claim(ticket.id, None).await?;
    assert_eq!(repo.find_by_id(ticket.id).await?.unwrap().claimed_by, None);

    Ok(())
}
