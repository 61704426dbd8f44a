mod model;
mod server;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::server::{
    bot::manager::BotManager,
    config::Config,
    error::AppError,
    router,
    scheduler::auto_close,
    service::audit::AuditLog,
    startup,
    state::AppState,
    util::{crypto::TokenCipher, jwt::JwtKeys},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;

    let jwt = JwtKeys::new(&config.jwt_secret);
    let cipher = TokenCipher::new(&config.encryption_key);
    let audit = AuditLog::new(http_client.clone(), config.audit_webhook_url.clone());
    let bots = BotManager::new(db.clone(), cipher.clone(), http_client);

    // Bring back every bot that was running before the restart
    bots.restore_bots().await?;

    let scheduler_db = db.clone();
    let scheduler_bots = bots.clone();
    tokio::spawn(async move {
        if let Err(e) = auto_close::start_scheduler(scheduler_db, scheduler_bots).await {
            tracing::error!("Auto-close scheduler error: {}", e);
        }
    });

    let app = router::router(&config)?
        .with_state(AppState::new(
            db,
            jwt,
            cipher,
            bots,
            config.require_invite_code,
            audit,
        ))
        .layer(session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
