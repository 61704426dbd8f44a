use super::*;

/// Tests numbering for a guild without a configuration row.
///
/// Expected: the row is created and the first number is 1
#[tokio::test]
async fn starts_at_one_for_new_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;

    let repo = GuildRepository::new(db);

    assert_eq!(repo.next_ticket_number(555, bot.id).await?, 1);
    assert_eq!(repo.find(555, bot.id).await?.unwrap().ticket_counter, 1);

    Ok(())
}

/// Tests consecutive reservations yield consecutive numbers.
///
/// Expected: 1, 2, 3
#[tokio::test]
async fn increments_sequentially() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let guild_id: u64 = guild.id.parse().unwrap();

    let repo = GuildRepository::new(db);
    let numbers = vec![
        repo.next_ticket_number(guild_id, bot.id).await?,
        repo.next_ticket_number(guild_id, bot.id).await?,
        repo.next_ticket_number(guild_id, bot.id).await?,
    ];

    assert_eq!(numbers, vec![1, 2, 3]);

    Ok(())
}
