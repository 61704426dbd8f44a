use super::*;

fn command(bot_id: i32, guild_id: u64, trigger: &str) -> SaveCustomCommandParam {
    SaveCustomCommandParam {
        bot_id,
        guild_id,
        trigger: trigger.to_string(),
        response: "See the rules channel".to_string(),
        embed_title: None,
        embed_description: None,
        embed_color: None,
        created_by: None,
    }
}

/// Tests trigger lookup is scoped to the guild.
///
/// Expected: found in its own guild, not in another guild
#[tokio::test]
async fn finds_trigger_within_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(CustomCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = CustomCommandRepository::new(db);
    repo.create(command(bot.id, 10, "rules")).await?;

    assert!(repo.find_by_trigger(bot.id, 10, "rules").await?.is_some());
    assert!(repo.find_by_trigger(bot.id, 11, "rules").await?.is_none());

    Ok(())
}

/// Tests updating and deleting a command.
///
/// Expected: new reply stored, then delete removes it
#[tokio::test]
async fn updates_and_deletes_command() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(CustomCommand)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = CustomCommandRepository::new(db);
    let created = repo.create(command(bot.id, 10, "rules")).await?;

    let mut changed = command(bot.id, 10, "faq");
    changed.embed_title = Some("FAQ".to_string());
    let updated = repo.update(created.id, changed).await?.unwrap();

    assert_eq!(updated.trigger, "faq");
    assert!(updated.has_embed());

    assert!(repo.delete(bot.id, 10, created.id).await?);
    assert!(repo.get_by_guild(bot.id, 10).await?.is_empty());

    Ok(())
}

/// Tests that a trigger is unique within a guild.
///
/// Expected: Err for a duplicate trigger, Ok for the same trigger in another guild
#[tokio::test]
async fn rejects_duplicate_trigger_in_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = CustomCommandRepository::new(db);
    repo.create(command(bot.id, 10, "rules")).await?;

    assert!(repo.create(command(bot.id, 10, "rules")).await.is_err());
    assert!(repo.create(command(bot.id, 11, "rules")).await.is_ok());

    Ok(())
}
