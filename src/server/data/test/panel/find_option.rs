use super::*;

/// Tests loading an option with its panel and questions.
///
/// Expected: Ok(Some) with matching panel id and ordered questions
#[tokio::test]
async fn loads_option_with_panel_and_questions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, bot, guild) = factory::helpers::create_guild_with_dependencies(db).await?;
    let (panel, option) =
        factory::helpers::create_panel_with_option(db, bot.id, &guild.id).await?;
    factory::create_question(db, option.id, "Second", 1).await?;
    factory::create_question(db, option.id, "First", 0).await?;

    let (found_panel, found) = PanelRepository::new(db)
        .find_option(option.id)
        .await?
        .unwrap();

    assert_eq!(found_panel.id, panel.id);
    assert_eq!(found.option.id, option.id);
    let questions: Vec<&str> = found.questions.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(questions, vec!["First", "Second"]);

    Ok(())
}

/// Tests an unknown option id from a forged button.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_option() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(PanelRepository::new(db).find_option(12345).await?.is_none());

    Ok(())
}
