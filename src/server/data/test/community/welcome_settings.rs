use super::*;

/// Tests reading settings that were never saved.
///
/// Expected: defaults with welcome disabled
#[tokio::test]
async fn returns_defaults_when_unsaved() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WelcomeSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let settings = WelcomeSettingsRepository::new(db).get(1, 1).await?;

    assert_eq!(settings, WelcomeSettings::default());
    assert!(!settings.welcome_enabled);

    Ok(())
}

/// Tests saving twice overwrites the row.
///
/// Expected: second save wins
#[tokio::test]
async fn save_overwrites_previous_settings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WelcomeSettings)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WelcomeSettingsRepository::new(db);
    repo.save(
        1,
        1,
        WelcomeSettings {
            welcome_enabled: true,
            welcome_channel_id: Some(30),
            ..Default::default()
        },
    )
    .await?;
    repo.save(
        1,
        1,
        WelcomeSettings {
            welcome_enabled: false,
            autorole_enabled: true,
            autorole_id: Some(40),
            ..Default::default()
        },
    )
    .await?;

    let stored = repo.get(1, 1).await?;

    assert!(!stored.welcome_enabled);
    assert_eq!(stored.welcome_channel_id, None);
    assert_eq!(stored.autorole_id, Some(40));

    Ok(())
}
