use super::*;

/// Tests that only provided fields change.
///
/// Expected: Ok(Some) with banned set and admin status untouched
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;

    let updated = UserRepository::new(db)
        .update(
            admin.id,
            UpdateUserParam {
                is_banned: Some(true),
                max_bots: Some(5),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert!(updated.is_banned);
    assert!(updated.is_admin);
    assert_eq!(updated.max_bots, 5);

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update(999, UpdateUserParam::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests that deleting a user removes their bots as well.
///
/// Expected: Ok(true) and no bots left for the user
#[tokio::test]
async fn delete_cascades_to_bots() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_bot(db, user.id).await?;

    let deleted = UserRepository::new(db).delete(user.id).await?;

    assert!(deleted);
    let remaining = crate::server::data::bot::BotRepository::new(db)
        .count_by_user(user.id)
        .await?;
    assert_eq!(remaining, 0);

    Ok(())
}
