//! Registry of running tenant bots.
//!
//! Every started bot gets its own gateway client running in a spawned task.
//! The registry keeps the client's HTTP handle and shard manager so the
//! dashboard and the scheduler can act through the right bot, and so the bot
//! can be shut down again.

use sea_orm::DatabaseConnection;
use serenity::{gateway::ShardManager, http::Http};
use std::{
    collections::{HashMap, HashSet},
    future::Future,
    sync::Arc,
};
use tokio::sync::RwLock;

use crate::server::{
    bot::start::{activity_data, build_client, friendly_error, online_status, verify_token},
    data::bot::BotRepository,
    error::{bot::BotError, AppError},
    model::bot::{BotPresence, BotStatus, UpdateBotInfoParam},
    service::{
        invite::InviteCache,
        sticky::{StickyCache, StickyService},
    },
    util::crypto::TokenCipher,
};

/// Per-bot state shared with its event handler.
pub struct BotRuntime {
    pub bot_id: i32,
    pub sticky: StickyCache,
    pub invites: InviteCache,
}

impl BotRuntime {
    pub fn new(bot_id: i32) -> Self {
        Self {
            bot_id,
            sticky: StickyCache::new(),
            invites: InviteCache::new(),
        }
    }
}

/// Registers `handle` under `bot_id` once `persist` has succeeded.
///
/// A failed `persist` leaves the registry untouched, so the bot does not look
/// running without a gateway task behind it.
///
/// # Returns
/// - `Ok(())` - Handle registered
/// - `Err(BotError::AlreadyRunning)` - Another handle holds the slot; `persist` is not run
/// - `Err(AppError)` - `persist` failed
async fn register_after<H>(
    clients: &RwLock<HashMap<i32, H>>,
    bot_id: i32,
    handle: H,
    persist: impl Future<Output = Result<(), AppError>>,
) -> Result<(), AppError> {
    if clients.read().await.contains_key(&bot_id) {
        return Err(BotError::AlreadyRunning.into());
    }

    persist.await?;

    let mut clients = clients.write().await;
    if clients.contains_key(&bot_id) {
        return Err(BotError::AlreadyRunning.into());
    }
    clients.insert(bot_id, handle);

    Ok(())
}

/// Handle to a running gateway client.
pub struct BotHandle {
    pub http: Arc<Http>,
    pub shard_manager: Arc<ShardManager>,
    pub runtime: Arc<BotRuntime>,
}

#[derive(Clone)]
pub struct BotManager {
    db: DatabaseConnection,
    cipher: TokenCipher,
    http_client: reqwest::Client,
    clients: Arc<RwLock<HashMap<i32, BotHandle>>>,
}

impl BotManager {
    pub fn new(db: DatabaseConnection, cipher: TokenCipher, http_client: reqwest::Client) -> Self {
        Self {
            db,
            cipher,
            http_client,
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Client used for REST calls made outside a bot's own gateway session.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub async fn is_running(&self, bot_id: i32) -> bool {
        self.clients.read().await.contains_key(&bot_id)
    }

    /// Ids of every bot with a registered client.
    pub async fn running_ids(&self) -> HashSet<i32> {
        self.clients.read().await.keys().copied().collect()
    }

    pub async fn http(&self, bot_id: i32) -> Option<Arc<Http>> {
        self.clients
            .read()
            .await
            .get(&bot_id)
            .map(|handle| handle.http.clone())
    }

    pub async fn runtime(&self, bot_id: i32) -> Option<Arc<BotRuntime>> {
        self.clients
            .read()
            .await
            .get(&bot_id)
            .map(|handle| handle.runtime.clone())
    }

    /// HTTP handles of all running bots.
    pub async fn running(&self) -> Vec<(i32, Arc<Http>)> {
        self.clients
            .read()
            .await
            .iter()
            .map(|(id, handle)| (*id, handle.http.clone()))
            .collect()
    }

    /// Starts a bot's gateway connection.
    ///
    /// Decrypts the stored token, verifies it against the REST API, registers
    /// the client and spawns the gateway task. Identity details are stored and
    /// the status becomes `running`. Failures are stored as status `error` with
    /// a friendly message.
    ///
    /// # Returns
    /// - `Ok(())` - Bot connected
    /// - `Err(BotError::AlreadyRunning)` - Bot already has a client
    /// - `Err(AppError::NotFound)` - Unknown bot
    /// - `Err(AppError::BotErr(_))` - Token rejected or connection refused
    pub async fn start_bot(&self, bot_id: i32) -> Result<(), AppError> {
        if self.is_running(bot_id).await {
            return Err(BotError::AlreadyRunning.into());
        }

        let bot_repo = BotRepository::new(&self.db);
        let Some(bot) = bot_repo.find_by_id(bot_id).await? else {
            return Err(AppError::NotFound("Bot not found".to_string()));
        };

        match self.connect(bot_id, &bot.stored_token, &bot.presence, bot.guilds_count).await {
            Ok(()) => {
                bot_repo.set_status(bot_id, BotStatus::Running, None).await?;
                tracing::info!("Bot {} started", bot_id);
                Ok(())
            }
            Err(e) => {
                let message = match &e {
                    AppError::BotErr(err) => err.to_string(),
                    other => other.to_string(),
                };
                tracing::error!("Failed to start bot {}: {}", bot_id, message);
                bot_repo
                    .set_status(bot_id, BotStatus::Error, Some(message))
                    .await?;
                Err(e)
            }
        }
    }

    async fn connect(
        &self,
        bot_id: i32,
        stored_token: &str,
        presence: &BotPresence,
        guilds_count: i32,
    ) -> Result<(), AppError> {
        let token = self.cipher.decrypt(stored_token)?;
        let identity = verify_token(&self.http_client, &token).await?;

        let runtime = Arc::new(BotRuntime::new(bot_id));
        StickyService::new(&self.db, bot_id)
            .load(&runtime.sticky)
            .await?;

        let mut client = build_client(&token, self.db.clone(), runtime.clone(), presence).await?;

        let handle = BotHandle {
            http: client.http.clone(),
            shard_manager: client.shard_manager.clone(),
            runtime,
        };
        let bot_repo = BotRepository::new(&self.db);
        register_after(
            &self.clients,
            bot_id,
            handle,
            async {
                bot_repo
                    .update_info(
                        bot_id,
                        UpdateBotInfoParam {
                            client_id: identity.id,
                            name: identity.name,
                            avatar: identity.avatar,
                            guilds_count,
                        },
                    )
                    .await
                    .map_err(AppError::from)
            },
        )
        .await?;

        let manager = self.clone();
        tokio::spawn(async move {
            if let Err(e) = client.start().await {
                let message = friendly_error(&e).to_string();
                tracing::error!("Bot {} gateway stopped: {}", bot_id, message);

                manager.clients.write().await.remove(&bot_id);
                if let Err(e) = BotRepository::new(&manager.db)
                    .set_status(bot_id, BotStatus::Error, Some(message))
                    .await
                {
                    tracing::error!("Failed to store error status of bot {}: {}", bot_id, e);
                }
            }
        });

        Ok(())
    }

    /// Shuts down a bot's shards and marks it stopped.
    ///
    /// Stopping a bot that is not running only updates the stored status.
    pub async fn stop_bot(&self, bot_id: i32) -> Result<(), AppError> {
        let handle = self.clients.write().await.remove(&bot_id);

        if let Some(handle) = handle {
            handle.shard_manager.shutdown_all().await;
            tracing::info!("Bot {} stopped", bot_id);
        }

        BotRepository::new(&self.db)
            .set_status(bot_id, BotStatus::Stopped, None)
            .await?;

        Ok(())
    }

    /// Applies a presence to every shard of a running bot.
    ///
    /// # Returns
    /// - `true` - Presence applied live
    /// - `false` - Bot is not running; it picks the presence up on next start
    pub async fn apply_presence(&self, bot_id: i32, presence: &BotPresence) -> bool {
        let clients = self.clients.read().await;
        let Some(handle) = clients.get(&bot_id) else {
            return false;
        };

        let runners = handle.shard_manager.runners.lock().await;
        for runner in runners.values() {
            runner
                .runner_tx
                .set_presence(Some(activity_data(presence)), online_status(presence.status));
        }

        true
    }

    /// Reloads a running bot's sticky cache after dashboard changes.
    pub async fn reload_sticky(&self, bot_id: i32) -> Result<(), AppError> {
        if let Some(runtime) = self.runtime(bot_id).await {
            StickyService::new(&self.db, bot_id)
                .load(&runtime.sticky)
                .await?;
        }

        Ok(())
    }

    /// Starts every bot whose stored status is `running`.
    ///
    /// Failures are logged and stored per bot; they never abort startup.
    pub async fn restore_bots(&self) -> Result<(), AppError> {
        let bots = BotRepository::new(&self.db)
            .get_by_status(BotStatus::Running)
            .await?;

        tracing::info!("Restoring {} bots", bots.len());

        for bot in bots {
            if let Err(e) = self.start_bot(bot.id).await {
                tracing::warn!("Could not restore bot {}: {}", bot.id, e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(entries: &[(i32, &'static str)]) -> RwLock<HashMap<i32, &'static str>> {
        RwLock::new(entries.iter().copied().collect())
    }

    /// Tests registering a handle when the identity cannot be stored.
    ///
    /// Expected: the error is returned and no handle is left behind
    #[tokio::test]
    async fn failed_persist_leaves_no_handle() {
        let clients = registry(&[]);

        let result = register_after(&clients, 1, "handle", async {
            Err(AppError::InternalError("database gone".to_string()))
        })
        .await;

        assert!(matches!(result, Err(AppError::InternalError(_))));
        assert!(clients.read().await.is_empty());
    }

    /// Tests registering a handle after the identity is stored.
    ///
    /// Expected: Ok and the handle is registered
    #[tokio::test]
    async fn persisted_handle_is_registered() {
        let clients = registry(&[]);

        register_after(&clients, 1, "handle", async { Ok(()) })
            .await
            .unwrap();

        assert_eq!(clients.read().await.get(&1), Some(&"handle"));
    }

    /// Tests registering over an existing handle.
    ///
    /// Expected: Err(AlreadyRunning), the old handle stays and nothing is persisted
    #[tokio::test]
    async fn occupied_slot_is_not_replaced() {
        let clients = registry(&[(1, "old")]);
        let mut persisted = false;

        let result = register_after(&clients, 1, "new", async {
            persisted = true;
            Ok(())
        })
        .await;

        assert!(matches!(
            result,
            Err(AppError::BotErr(BotError::AlreadyRunning))
        ));
        assert!(!persisted);
        assert_eq!(clients.read().await.get(&1), Some(&"old"));
    }
}
