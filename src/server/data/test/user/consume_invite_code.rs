use super::*;

/// Tests that a single-use code can be consumed exactly once.
///
/// Expected: first consume succeeds, second reports the code exhausted
#[tokio::test]
async fn single_use_code_is_consumed_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let invitee = factory::create_user(db).await?;
    let code = factory::user::create_invite_code(db, admin.id, "ONCE", 1).await?;

    let repo = InviteCodeRepository::new(db);

    assert!(repo.consume(code.id, invitee.id).await?);
    assert!(!repo.consume(code.id, invitee.id).await?);

    let stored = repo.find_by_code("once").await?.unwrap();
    assert_eq!(stored.uses_count, 1);
    assert_eq!(stored.used_by, Some(invitee.id));
    assert!(stored.is_exhausted());

    Ok(())
}

/// Tests that a code with `max_uses` 0 never runs out.
///
/// Expected: every consume succeeds
#[tokio::test]
async fn unlimited_code_keeps_counting() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let code = factory::user::create_invite_code(db, admin.id, "OPEN", 0).await?;

    let repo = InviteCodeRepository::new(db);
    for _ in 0..3 {
        assert!(repo.consume(code.id, admin.id).await?);
    }

    assert_eq!(repo.find_by_code("OPEN").await?.unwrap().uses_count, 3);

    Ok(())
}
