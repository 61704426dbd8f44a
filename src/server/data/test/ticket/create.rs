use super::*;

/// Tests creating a ticket with responses.
///
/// Expected: Ok with an open ticket, stored responses, and the opener as participant
#[tokio::test]
async fn creates_ticket_with_responses_and_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let (panel, option) =
        factory::helpers::create_panel_with_option(db, bot.id, &guild.id).await?;

    let repo = TicketRepository::new(db);
    let ticket = repo
        .create(CreateTicketParam {
            bot_id: bot.id,
            guild_id: guild.id.parse().unwrap(),
            channel_id: 3001,
            user_id: 42,
            panel_id: Some(panel.id),
            option_id: Some(option.id),
            ticket_number: 7,
            responses: vec![TicketResponse {
                question: "Order id?".to_string(),
                response: "A-1".to_string(),
            }],
        })
        .await?;

    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.padded_number(), "0007");
    assert!(!ticket.warned_auto_close);
    assert_eq!(repo.responses(ticket.id).await?.len(), 1);
    assert_eq!(repo.participants(ticket.id).await?, vec![42]);
    assert_eq!(repo.find_by_channel(3001).await?.unwrap().id, ticket.id);

    Ok(())
}

/// Tests that two tickets cannot share a channel.
///
/// Expected: Err from the unique channel constraint
#[tokio::test]
async fn rejects_duplicate_channel() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    factory::ticket::TicketFactory::new(db, bot.id, &guild.id)
        .channel_id("3002")
        .build()
        .await?;

    let result = TicketRepository::new(db)
        .create(CreateTicketParam {
            bot_id: bot.id,
            guild_id: guild.id.parse().unwrap(),
            channel_id: 3002,
            user_id: 1,
            panel_id: None,
            option_id: None,
            ticket_number: 2,
            responses: vec![],
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
