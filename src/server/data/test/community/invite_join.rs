use super::*;

/// Tests leaderboard ordering and exclusion of unattributed joins.
///
/// Expected: inviter 1 with 3 uses ahead of inviter 2 with 1, `unknown` absent
#[tokio::test]
async fn ranks_inviters_by_joins() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(InviteJoin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let now = Utc::now();
    for (member, inviter) in [
        ("10", "1"),
        ("11", "1"),
        ("12", "2"),
        ("13", "1"),
        ("14", "unknown"),
        ("15", "unknown"),
    ] {
        factory::community::create_invite_join(db, bot.id, "5", member, Some(inviter), now)
            .await?;
    }

    let board = InviteJoinRepository::new(db).leaderboard(bot.id, 5, 10).await?;

    assert_eq!(board, vec![("1".to_string(), 3), ("2".to_string(), 1)]);

    Ok(())
}

/// Tests recording a vanity URL join and the recent list order.
///
/// Expected: newest join first, stored with the vanity code and no inviter
#[tokio::test]
async fn records_vanity_join_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(InviteJoin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    factory::community::create_invite_join(
        db,
        bot.id,
        "5",
        "10",
        Some("1"),
        Utc::now() - Duration::hours(1),
    )
    .await?;

    let repo = InviteJoinRepository::new(db);
    repo.record(RecordInviteJoinParam {
        bot_id: bot.id,
        guild_id: 5,
        user_id: 11,
        inviter_id: None,
        code: Some("shop".to_string()),
    })
    .await?;

    let recent = repo.recent(bot.id, 5, 50).await?;

    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].user_id, 11);
    assert_eq!(recent[0].inviter_id, None);
    assert_eq!(recent[0].code.as_deref(), Some("shop"));

    Ok(())
}

/// Tests the leaderboard when members joined through the vanity URL.
///
/// Expected: only the attributed inviter is ranked
#[tokio::test]
async fn vanity_joins_stay_off_leaderboard() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_account_tables()
        .with_table(InviteJoin)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let bot = factory::create_bot(db, user.id).await?;
    let repo = InviteJoinRepository::new(db);
    for (member, inviter, code) in [
        (10, Some("1"), "abc"),
        (11, None, "shop"),
        (12, None, "shop"),
        (13, Some("unknown"), "unknown"),
    ] {
        repo.record(RecordInviteJoinParam {
            bot_id: bot.id,
            guild_id: 5,
            user_id: member,
            inviter_id: inviter.map(str::to_string),
            code: Some(code.to_string()),
        })
        .await?;
    }

    let board = repo.leaderboard(bot.id, 5, 10).await?;

    assert_eq!(board, vec![("1".to_string(), 1)]);

    Ok(())
}
