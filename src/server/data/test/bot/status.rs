use super::*;

/// Tests that status changes are persisted with their error message.
///
/// Expected: error status stored, then cleared on a successful start
#[tokio::test]
async fn stores_and_clears_error_status() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = BotRepository::new(db);

    repo.set_status(bot.id, BotStatus::Error, Some("Invalid token".to_string()))
        .await?;
    let failed = repo.find_by_id(bot.id).await?.unwrap();
    assert_eq!(failed.status, BotStatus::Error);
    assert_eq!(failed.error_message.as_deref(), Some("Invalid token"));

    repo.set_status(bot.id, BotStatus::Running, None).await?;
    let running = repo.find_by_id(bot.id).await?.unwrap();
    assert_eq!(running.status, BotStatus::Running);
    assert_eq!(running.error_message, None);

    Ok(())
}

/// Tests restoring selects only bots stored as running.
///
/// Expected: Ok with the single running bot
#[tokio::test]
async fn selects_running_bots_for_restore() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_bot(db, user.id).await?;
    let running = factory::bot::BotFactory::new(db, user.id)
        .status("running")
        .build()
        .await?;

    let bots = BotRepository::new(db)
        .get_by_status(BotStatus::Running)
        .await?;

    assert_eq!(bots.len(), 1);
    assert_eq!(bots[0].id, running.id);

    Ok(())
}

/// Tests presence updates round-trip through the stored columns.
///
/// Expected: Ok with the watching presence and dnd status read back
#[tokio::test]
async fn updates_presence() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = BotRepository::new(db);

    let presence = BotPresence {
        activity: ActivityKind::Watching,
        activity_name: "the queue".to_string(),
        status: PresenceStatus::DoNotDisturb,
    };
    repo.update_presence(bot.id, &presence).await?;

    assert_eq!(repo.find_by_id(bot.id).await?.unwrap().presence, presence);

    Ok(())
}
