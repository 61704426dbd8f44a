use super::*;

/// Tests pagination returns the total item count alongside the page.
///
/// Expected: Ok with 2 users on the first page and a total of 3
#[tokio::test]
async fn paginates_with_total_count() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::create_user(db).await?;
    }

    let repo = UserRepository::new(db);
    let (first, total) = repo.get_all_paginated(0, 2).await?;
    let (second, _) = repo.get_all_paginated(1, 2).await?;

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
    assert_eq!(total, 3);

    Ok(())
}

/// Tests the pending and banned counters used by the admin overview.
///
/// Expected: one pending and one banned user counted
#[tokio::test]
async fn counts_pending_and_banned_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    factory::user::UserFactory::new(db).approved(false).build().await?;
    factory::user::UserFactory::new(db).banned(true).build().await?;

    let repo = UserRepository::new(db);

    assert_eq!(repo.count_pending().await?, 1);
    assert_eq!(repo.count_banned().await?, 1);

    Ok(())
}
