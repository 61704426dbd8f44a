use super::*;

/// Tests that embeds are listed per bot and guild, newest first.
///
/// Expected: only the two embeds of guild 5, second one first
#[tokio::test]
async fn lists_guild_embeds_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(Embed)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let other = factory::create_bot(db, user.id).await?;
    let repo = EmbedRepository::new(db);
    repo.create(embed(bot.id, 5, "first")).await?;
    repo.create(embed(bot.id, 5, "second")).await?;
    repo.create(embed(bot.id, 6, "elsewhere")).await?;
    repo.create(embed(other.id, 5, "other bot")).await?;

    let names: Vec<String> = repo
        .get_by_guild(bot.id, 5)
        .await?
        .into_iter()
        .map(|embed| embed.name)
        .collect();

    assert_eq!(names, vec!["second".to_string(), "first".to_string()]);

    Ok(())
}

/// Tests updating an embed's design and channel.
///
/// Expected: new fields stored; updating from another guild finds nothing
#[tokio::test]
async fn updates_embed_within_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(Embed)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = EmbedRepository::new(db);
    let created = repo.create(embed(bot.id, 5, "rules")).await?;

    let mut changed = embed(bot.id, 5, "faq");
    changed.channel_id = None;
    changed.body.timestamp = true;
    changed.body.image_url = Some("https://cdn.example.com/banner.png".to_string());
    let updated = repo.update(created.id, changed).await?.unwrap();

    assert_eq!(updated.name, "faq");
    assert_eq!(updated.channel_id, None);
    assert!(updated.body.timestamp);
    assert_eq!(
        repo.find(bot.id, 5, created.id).await?.unwrap().body.image_url,
        Some("https://cdn.example.com/banner.png".to_string())
    );
    assert!(repo
        .update(created.id, embed(bot.id, 6, "moved"))
        .await?
        .is_none());

    Ok(())
}

/// Tests deleting an embed scoped by guild.
///
/// Expected: false from the wrong guild, true once, then gone
#[tokio::test]
async fn deletes_embed_within_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(Embed)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = EmbedRepository::new(db);
    let created = repo.create(embed(bot.id, 5, "rules")).await?;

    assert!(!repo.delete(bot.id, 6, created.id).await?);
    assert!(repo.delete(bot.id, 5, created.id).await?);
    assert!(repo.find(bot.id, 5, created.id).await?.is_none());

    Ok(())
}
