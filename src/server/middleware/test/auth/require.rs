use super::*;

/// Tests a session login is accepted without a bearer token.
///
/// Expected: Ok(User) for the user stored in the session
#[tokio::test]
async fn grants_access_from_session() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let jwt = JwtKeys::new("secret");
    let headers = HeaderMap::new();

    let user = factory::user::UserFactory::new(db).build().await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, &jwt, &headers, session).require(&[]).await?;

    assert_eq!(result.id, user.id);

    Ok(())
}

/// Tests a bearer token identifies the user.
///
/// Expected: Ok(User) for the token's subject
#[tokio::test]
async fn grants_access_from_bearer_token() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let jwt = JwtKeys::new("secret");

    let user = factory::user::UserFactory::new(db).build().await?;
    let headers = bearer(&jwt.issue(user.id, &user.email, false)?);

    let result = AuthGuard::new(db, &jwt, &headers, session).require(&[]).await?;

    assert_eq!(result.id, user.id);

    Ok(())
}

/// Tests a token signed with another secret is rejected even with a session user.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_foreign_token() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let jwt = JwtKeys::new("secret");

    let user = factory::user::UserFactory::new(db).build().await?;
    AuthSession::new(session).set_user_id(user.id).await?;
    let headers = bearer(&JwtKeys::new("other").issue(user.id, &user.email, false)?);

    let result = AuthGuard::new(db, &jwt, &headers, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests a request with neither token nor session is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_anonymous_request() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let jwt = JwtKeys::new("secret");
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &jwt, &headers, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a banned user is refused even with a valid token.
///
/// Expected: Err(AuthError::Banned)
#[tokio::test]
async fn rejects_banned_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let jwt = JwtKeys::new("secret");

    let user = factory::user::UserFactory::new(db)
        .banned(true)
        .build()
        .await?;
    let headers = bearer(&jwt.issue(user.id, &user.email, false)?);

    let result = AuthGuard::new(db, &jwt, &headers, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::Banned(id))) if id == user.id
    ));

    Ok(())
}

/// Tests the admin permission is checked against the stored account, not the token claim.
///
/// Expected: Err(AuthError::AccessDenied) for a token claiming admin on a regular account
#[tokio::test]
async fn denies_admin_to_regular_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let jwt = JwtKeys::new("secret");

    let user = factory::user::UserFactory::new(db).build().await?;
    let headers = bearer(&jwt.issue(user.id, &user.email, true)?);

    let result = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == user.id
    ));

    Ok(())
}

/// Tests an admin passes the admin permission.
///
/// Expected: Ok(User) with `is_admin`
#[tokio::test]
async fn grants_admin_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_account_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();
    let jwt = JwtKeys::new("secret");
    let headers = HeaderMap::new();

    let admin = factory::user::create_admin(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let result = AuthGuard::new(db, &jwt, &headers, session)
        .require(&[Permission::Admin])
        .await?;

    assert!(result.is_admin);

    Ok(())
}
