use super::*;

/// Tests a partial settings update.
///
/// Expected: provided fields change, cleared channel becomes None, others untouched
#[tokio::test]
async fn applies_whitelisted_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    factory::guild::GuildFactory::new(db, bot.id)
        .id("900")
        .ticket_category("321")
        .build()
        .await?;

    let updated = GuildRepository::new(db)
        .update_settings(
            900,
            bot.id,
            UpdateGuildSettingsParam {
                log_channel_id: Some(Some(1000)),
                ticket_category_id: Some(None),
                support_role_ids: Some(vec![5, 6]),
                auto_close_hours: Some(24),
                auto_close_warning_hours: Some(2),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.log_channel_id, Some(1000));
    assert_eq!(updated.ticket_category_id, None);
    assert_eq!(updated.support_role_ids, vec![5, 6]);
    assert_eq!(updated.auto_close_hours, 24);
    assert_eq!(updated.auto_close_warning_hours, 2);
    assert_eq!(updated.language, "en");

    Ok(())
}

/// Tests updating a guild the bot has never seen.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_guild() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;

    let result = GuildRepository::new(db)
        .update_settings(1, bot.id, UpdateGuildSettingsParam::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests storing and clearing the vouch settings.
///
/// Expected: channel and texts read back, default texts clear the column
#[tokio::test]
async fn stores_vouch_settings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    factory::guild::GuildFactory::new(db, bot.id)
        .id("901")
        .build()
        .await?;

    let vouch = VouchSettings {
        title: Some("Rate our service".to_string()),
        ..Default::default()
    };
    let repo = GuildRepository::new(db);
    let updated = repo
        .update_settings(
            901,
            bot.id,
            UpdateGuildSettingsParam {
                vouch_channel_id: Some(Some(77)),
                vouch: Some(vouch.clone()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.vouch_channel_id, Some(77));
    assert_eq!(updated.vouch, vouch);

    let reset = repo
        .update_settings(
            901,
            bot.id,
            UpdateGuildSettingsParam {
                vouch: Some(VouchSettings::default()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(reset.vouch, VouchSettings::default());
    assert_eq!(reset.vouch_channel_id, Some(77));

    Ok(())
}
