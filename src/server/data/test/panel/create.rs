use super::*;

/// Tests that options and questions are stored in the given order.
///
/// Expected: Ok with two options, positions 0 and 1, and ordered questions
#[tokio::test]
async fn stores_options_and_questions_in_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let guild_id: u64 = guild.id.parse().unwrap();

    let panel = PanelRepository::new(db)
        .create(panel_param(
            bot.id,
            guild_id,
            vec![
                option("Billing", &["Invoice number?", "What happened?"]),
                option("Bug", &[]),
            ],
        ))
        .await?;

    assert_eq!(panel.panel.message_id, None);
    assert_eq!(panel.panel.embed.title.as_deref(), Some("Need help?"));
    assert_eq!(panel.options.len(), 2);
    assert_eq!(panel.options[0].option.label, "Billing");
    assert_eq!(panel.options[0].option.position, 0);
    assert_eq!(panel.options[1].option.position, 1);
    assert_eq!(panel.options[0].questions[1].question, "What happened?");
    assert_eq!(panel.options[0].option.support_role_ids, vec![10]);

    Ok(())
}

/// Tests the per-guild panel count used to enforce the panel limit.
///
/// Expected: count only includes panels of the bot in that guild
#[tokio::test]
async fn counts_panels_per_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    factory::create_panel(db, bot.id, &guild.id).await?;
    factory::create_panel(db, bot.id, &guild.id).await?;
    factory::create_panel(db, bot.id, "1").await?;

    let count = PanelRepository::new(db)
        .count_by_guild(bot.id, guild.id.parse().unwrap())
        .await?;

    assert_eq!(count, 2);

    Ok(())
}
