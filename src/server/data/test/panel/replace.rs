use super::*;

/// Tests that replacing a panel recreates its options.
///
/// Expected: Ok(Some) with the new option set and the new channel
#[tokio::test]
async fn replaces_options() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let guild_id: u64 = guild.id.parse().unwrap();
    let repo = PanelRepository::new(db);

    let created = repo
        .create(panel_param(bot.id, guild_id, vec![option("Old", &["Q"])]))
        .await?;

    let mut param = panel_param(bot.id, guild_id, vec![option("A", &[]), option("B", &[])]);
    param.channel_id = 4001;
    let replaced = repo.replace(created.panel.id, param).await?.unwrap();

    assert_eq!(replaced.panel.channel_id, 4001);
    let labels: Vec<&str> = replaced
        .options
        .iter()
        .map(|entry| entry.option.label.as_str())
        .collect();
    assert_eq!(labels, vec!["A", "B"]);

    Ok(())
}

/// Tests that deleting a panel removes it and its options.
///
/// Expected: Ok(true), then the panel and its option can no longer be found
#[tokio::test]
async fn delete_removes_options() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let (panel, option) =
        factory::helpers::create_panel_with_option(db, bot.id, &guild.id).await?;

    let repo = PanelRepository::new(db);

    assert!(repo.delete(panel.id).await?);
    assert!(repo.find_by_id(panel.id).await?.is_none());
    assert!(repo.find_option(option.id).await?.is_none());

    Ok(())
}
