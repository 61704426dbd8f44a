use super::*;

/// Tests that upserting an existing guild refreshes only its name.
///
/// Expected: Ok with new name and previously configured roles intact
#[tokio::test]
async fn refreshes_name_and_keeps_settings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    factory::guild::GuildFactory::new(db, bot.id)
        .id("4242")
        .support_roles(&[11, 12])
        .build()
        .await?;

    let guild = GuildRepository::new(db)
        .upsert(4242, bot.id, "Renamed")
        .await?;

    assert_eq!(guild.name, "Renamed");
    assert_eq!(guild.support_role_ids, vec![11, 12]);

    Ok(())
}

/// Tests that the same guild keeps separate rows per bot.
///
/// Expected: two bots see independent configurations of guild 77
#[tokio::test]
async fn keeps_one_row_per_bot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let first = factory::create_bot(db, user.id).await?;
    let second = factory::create_bot(db, user.id).await?;

    let repo = GuildRepository::new(db);
    repo.upsert(77, first.id, "Shared").await?;
    repo.upsert(77, second.id, "Shared").await?;

    assert_eq!(repo.get_by_bot(first.id).await?.len(), 1);
    assert_eq!(repo.get_by_bot(second.id).await?.len(), 1);
    assert_eq!(repo.find(77, second.id).await?.unwrap().bot_id, second.id);

    Ok(())
}
