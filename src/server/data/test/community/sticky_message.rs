use super::*;

/// Tests that replacing a sticky message forgets the posted copy.
///
/// Expected: one row per channel with new content and no last message id
#[tokio::test]
async fn upsert_resets_last_message() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(StickyMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = StickyMessageRepository::new(db);

    repo.upsert(bot.id, 1, 20, "Read the pins".to_string()).await?;
    repo.set_last_message(bot.id, 20, 999).await?;
    assert_eq!(repo.get_by_bot(bot.id).await?[0].last_message_id, Some(999));

    let replaced = repo.upsert(bot.id, 1, 20, "New rules".to_string()).await?;

    assert_eq!(replaced.content, "New rules");
    assert_eq!(replaced.last_message_id, None);
    assert_eq!(repo.get_by_guild(bot.id, 1).await?.len(), 1);

    Ok(())
}

/// Tests deleting a sticky message.
///
/// Expected: Ok(true) and the bot has no stickies left
#[tokio::test]
async fn deletes_sticky() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(StickyMessage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    factory::community::create_sticky(db, bot.id, "1", "20", "hi").await?;

    let repo = StickyMessageRepository::new(db);

    assert!(repo.delete(bot.id, 1, 20).await?);
    assert!(repo.get_by_bot(bot.id).await?.is_empty());

    Ok(())
}

/// Tests that a channel holds at most one sticky message per bot.
///
/// Expected: Err from a raw duplicate insert while upsert keeps one row
#[tokio::test]
async fn rejects_second_sticky_row_for_channel() -> Result<(), AppError> {
    use sea_orm::{ActiveModelTrait, ActiveValue};

    let test = TestBuilder::new().with_migrations().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = StickyMessageRepository::new(db);
    repo.upsert(bot.id, 1, 20, "Read the pins".to_string()).await?;

    let duplicate = entity::sticky_message::ActiveModel {
        bot_id: ActiveValue::Set(bot.id),
        guild_id: ActiveValue::Set("1".to_string()),
        channel_id: ActiveValue::Set("20".to_string()),
        content: ActiveValue::Set("Second copy".to_string()),
        last_message_id: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await;

    assert!(duplicate.is_err());
    assert_eq!(repo.get_by_bot(bot.id).await?.len(), 1);

    Ok(())
}
