use super::*;

/// Tests relinking replaces the Steam id.
///
/// Expected: latest Steam id stored, unlink removes it
#[tokio::test]
async fn links_relinks_and_unlinks() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(SteamLink)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SteamLinkRepository::new(db);
    repo.link(42, "76561198000000001", None).await?;
    repo.link(42, "76561198000000002", Some("gamer".to_string()))
        .await?;

    let link = repo.find(42).await?.unwrap();
    assert_eq!(link.steam_id, "76561198000000002");
    assert_eq!(link.steam_name.as_deref(), Some("gamer"));

    assert!(repo.unlink(42).await?);
    assert!(repo.find(42).await?.is_none());

    Ok(())
}
