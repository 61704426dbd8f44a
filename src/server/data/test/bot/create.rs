use super::*;

/// Tests creating a bot stores it stopped with the default presence.
///
/// Expected: Ok with status `Stopped` and presence `Playing KingBot`
#[tokio::test]
async fn creates_stopped_bot_with_default_presence() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let bot = BotRepository::new(db)
        .create(CreateBotParam {
            user_id: user.id,
            encrypted_token: "00:11:22".to_string(),
            client_id: 123456789012345678,
            name: "Helper".to_string(),
            avatar: None,
        })
        .await?;

    assert_eq!(bot.status, BotStatus::Stopped);
    assert_eq!(bot.client_id, Some(123456789012345678));
    assert_eq!(bot.presence, BotPresence::default());
    assert_eq!(bot.stored_token, "00:11:22");

    Ok(())
}

/// Tests listing bots only returns the owner's bots.
///
/// Expected: Ok with exactly the two bots of the first user
#[tokio::test]
async fn lists_bots_per_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_bot(db, owner.id).await?;
    factory::create_bot(db, owner.id).await?;
    factory::create_bot(db, other.id).await?;

    let repo = BotRepository::new(db);
    let bots = repo.get_by_user(owner.id).await?;

    assert_eq!(bots.len(), 2);
    assert!(bots.iter().all(|bot| bot.user_id == owner.id));
    assert_eq!(repo.count_by_user(other.id).await?, 1);

    Ok(())
}
