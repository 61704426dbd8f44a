use super::*;

/// Tests storing and loading a template blueprint.
///
/// Expected: blueprint read back equal, scoped to its guild
#[tokio::test]
async fn stores_blueprint_per_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(Template)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let blueprint = PanelBlueprint {
        name: "Support".to_string(),
        embed: PanelEmbed {
            color: "#5865F2".to_string(),
            ..Default::default()
        },
        options: vec![],
    };

    let repo = TemplateRepository::new(db);
    let created = repo
        .create(bot.id, 7, "Support Template".to_string(), &blueprint)
        .await?;

    let found = repo.find(bot.id, 7, created.id).await?.unwrap();
    assert_eq!(found.blueprint, blueprint);
    assert!(repo.find(bot.id, 8, created.id).await?.is_none());

    assert!(repo.delete(bot.id, 7, created.id).await?);
    assert!(repo.get_by_guild(bot.id, 7).await?.is_empty());

    Ok(())
}
