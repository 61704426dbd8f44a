use super::*;

/// Tests creating a user with default limits.
///
/// Expected: Ok with user stored unbanned and `max_bots` 2
#[tokio::test]
async fn creates_user_with_defaults() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.create(new_user("new@example.com")).await?;

    assert_eq!(user.email, "new@example.com");
    assert!(!user.is_banned);
    assert!(!user.is_approved);
    assert_eq!(user.max_bots, 2);
    assert_eq!(repo.count().await?, 1);

    Ok(())
}

/// Tests that a second account with the same email is rejected.
///
/// Expected: Err from the unique email constraint
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(new_user("dup@example.com")).await?;

    let result = repo.create(new_user("dup@example.com")).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests email lookup ignores case.
///
/// Expected: Ok(Some) for an upper-cased lookup of a stored lower-case email
#[tokio::test]
async fn finds_user_by_email_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("case@example.com")
        .build()
        .await?;

    let found = UserRepository::new(db)
        .find_by_email("CASE@example.com")
        .await?;

    assert!(found.is_some());

    Ok(())
}
