use super::*;

fn open_param(
    bot_id: i32,
    guild_id: u64,
    channel_id: u64,
    panel_id: i32,
    option_id: i32,
) -> CreateTicketParam {
    CreateTicketParam {
        bot_id,
        guild_id,
        channel_id,
        user_id: 42,
        panel_id: Some(panel_id),
        option_id: Some(option_id),
        ticket_number: channel_id as i32,
        responses: vec![],
    }
}

/// Tests the database rule allowing one open ticket per user and option.
///
/// Expected: Err for a second open ticket on the same option
#[tokio::test]
async fn rejects_second_open_ticket_for_option() -> Result<(), AppError> {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let (panel, option) =
        factory::helpers::create_panel_with_option(db, bot.id, &guild.id).await?;
    let guild_id: u64 = guild.id.parse().unwrap();

    let repo = TicketRepository::new(db);
    repo.create(open_param(bot.id, guild_id, 5001, panel.id, option.id))
        .await?;

    let result = repo
        .create(open_param(bot.id, guild_id, 5002, panel.id, option.id))
        .await;

    assert!(result.is_err());
    assert!(repo.find_by_channel(5002).await?.is_none());

    Ok(())
}

/// Tests that a closed ticket does not block a new one on the same option.
///
/// Expected: Ok for the new ticket once the first is closed
#[tokio::test]
async fn closed_ticket_does_not_block_option() -> Result<(), AppError> {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let (panel, option) =
        factory::helpers::create_panel_with_option(db, bot.id, &guild.id).await?;
    let guild_id: u64 = guild.id.parse().unwrap();

    let repo = TicketRepository::new(db);
    let first = repo
        .create(open_param(bot.id, guild_id, 5003, panel.id, option.id))
        .await?;
    repo.close(
        first.id,
        CloseTicketParam {
            closed_by: "dashboard:1".to_string(),
            reason: "Web Dashboard".to_string(),
        },
    )
    .await?;

    let second = repo
        .create(open_param(bot.id, guild_id, 5004, panel.id, option.id))
        .await?;

    assert_eq!(second.status, TicketStatus::Open);
    assert_eq!(
        repo.find_open_for_user_option(bot.id, guild_id, 42, option.id)
            .await?
            .map(|ticket| ticket.id),
        Some(second.id)
    );

    Ok(())
}

/// Tests that a participant can only be stored once per ticket.
///
/// Expected: Err from a raw duplicate insert
#[tokio::test]
async fn rejects_duplicate_participant_row() -> Result<(), AppError> {
    use sea_orm::{ActiveModelTrait, ActiveValue};

    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let ticket = factory::create_ticket(db, bot.id, &guild.id).await?;

    let row = || entity::ticket_participant::ActiveModel {
        ticket_id: ActiveValue::Set(ticket.id),
        user_id: ActiveValue::Set("77".to_string()),
        added_by: ActiveValue::Set(None),
        added_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    };
    row().insert(db).await?;

    assert!(row().insert(db).await.is_err());
    assert!(!TicketRepository::new(db)
        .add_participant(ticket.id, 77, None)
        .await?);

    Ok(())
}
