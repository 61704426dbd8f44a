use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{bot::manager::BotManager, error::AppError, service::ticket::TicketService};

/// Every five minutes, at second zero.
const AUTO_CLOSE_SCHEDULE: &str = "0 */5 * * * *";

/// Starts the auto-close scheduler
///
/// Each run sweeps the open tickets of every running bot, warning tickets that
/// approach their guild's inactivity limit and closing those past it. Bots
/// that are stopped are skipped; their tickets are handled once they run again.
///
/// # Arguments
/// - `db`: Database connection
/// - `bots`: Registry used to reach each running bot
pub async fn start_scheduler(db: DatabaseConnection, bots: BotManager) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(AUTO_CLOSE_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();
        let bots = bots.clone();

        Box::pin(async move {
            process_auto_close(&db, &bots).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Auto-close scheduler started");

    Ok(())
}

async fn process_auto_close(db: &DatabaseConnection, bots: &BotManager) {
    for (bot_id, http) in bots.running().await {
        match TicketService::new(db, http, bot_id).run_auto_close().await {
            Ok(report) if report.warned > 0 || report.closed > 0 => {
                tracing::info!(
                    "Auto-close for bot {}: {} warned, {} closed",
                    bot_id,
                    report.warned,
                    report.closed
                );
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Error running auto-close for bot {}: {}", bot_id, e),
        }
    }
}
