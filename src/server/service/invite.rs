//! Invite tracking.
//!
//! Discord does not say which invite a new member used, so the bot keeps the
//! use count of every invite per guild and, on join, looks for the code whose
//! count went up.

use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serenity::{
    all::GuildId,
    http::{Http, LightMethod, Request, Route},
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::server::{
    data::invite_join::{InviteJoinRepository, UNKNOWN_INVITER},
    error::AppError,
    model::community::{InviteJoin, RecordInviteJoinParam},
};

const LEADERBOARD_SIZE: u64 = 10;
const RECENT_JOINS: u64 = 50;

/// Current state of one invite code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteUse {
    pub code: String,
    pub uses: u64,
    pub inviter_id: Option<u64>,
}

/// Invites of a guild as fetched from Discord.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteSnapshot {
    pub invites: Vec<InviteUse>,
    /// Vanity URL, when the guild has one and the bot may read it.
    pub vanity: Option<InviteUse>,
}

/// Cached use counts of one guild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildInvites {
    pub codes: HashMap<String, u64>,
    pub vanity_uses: Option<u64>,
}

/// Per-bot map of guild id to invite use counts.
#[derive(Clone, Default)]
pub struct InviteCache {
    guilds: Arc<RwLock<HashMap<u64, GuildInvites>>>,
}

impl InviteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_guild(&self, guild_id: u64, snapshot: &InviteSnapshot) {
        let invites = GuildInvites {
            codes: snapshot
                .invites
                .iter()
                .map(|invite| (invite.code.clone(), invite.uses))
                .collect(),
            vanity_uses: snapshot.vanity.as_ref().map(|vanity| vanity.uses),
        };
        self.guilds.write().await.insert(guild_id, invites);
    }

    pub async fn guild(&self, guild_id: u64) -> GuildInvites {
        self.guilds
            .read()
            .await
            .get(&guild_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Records a newly created invite, only for guilds already cached.
    pub async fn insert_code(&self, guild_id: u64, code: String, uses: u64) {
        if let Some(guild) = self.guilds.write().await.get_mut(&guild_id) {
            guild.codes.insert(code, uses);
        }
    }

    pub async fn remove_code(&self, guild_id: u64, code: &str) {
        if let Some(guild) = self.guilds.write().await.get_mut(&guild_id) {
            guild.codes.remove(code);
        }
    }
}

/// Finds the first invite whose use count grew since it was cached.
///
/// Codes missing from the cache count as zero previous uses.
pub fn detect_used_invite<'i>(
    cached: &HashMap<String, u64>,
    current: &'i [InviteUse],
) -> Option<&'i InviteUse> {
    current
        .iter()
        .find(|invite| invite.uses > cached.get(&invite.code).copied().unwrap_or(0))
}

/// Where a new member came from.
#[derive(Debug, PartialEq, Eq)]
pub enum JoinSource<'i> {
    Invite(&'i InviteUse),
    Vanity(&'i InviteUse),
    Unknown,
}

/// Attributes a join by comparing the cached counts with a fresh snapshot.
///
/// Regular codes win. The vanity URL is credited only when its count grew
/// past a cached value; a guild whose vanity count was never cached yields
/// `Unknown`.
pub fn attribute_join<'i>(cached: &GuildInvites, current: &'i InviteSnapshot) -> JoinSource<'i> {
    if let Some(invite) = detect_used_invite(&cached.codes, &current.invites) {
        return JoinSource::Invite(invite);
    }

    match (&current.vanity, cached.vanity_uses) {
        (Some(vanity), Some(before)) if vanity.uses > before => JoinSource::Vanity(vanity),
        _ => JoinSource::Unknown,
    }
}

impl JoinSource<'_> {
    /// Inviter and code to store. Vanity joins have no inviter.
    fn stored(&self) -> (Option<String>, Option<String>) {
        match self {
            Self::Invite(invite) => (
                Some(
                    invite
                        .inviter_id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| UNKNOWN_INVITER.to_string()),
                ),
                Some(invite.code.clone()),
            ),
            Self::Vanity(vanity) => (None, Some(vanity.code.clone())),
            Self::Unknown => (
                Some(UNKNOWN_INVITER.to_string()),
                Some(UNKNOWN_INVITER.to_string()),
            ),
        }
    }
}

pub struct InviteService<'a> {
    db: &'a DatabaseConnection,
    bot_id: i32,
}

impl<'a> InviteService<'a> {
    /// Creates a new InviteService instance scoped to one bot.
    pub fn new(db: &'a DatabaseConnection, bot_id: i32) -> Self {
        Self { db, bot_id }
    }

    /// Fetches a guild's invites and vanity URL and stores their use counts.
    ///
    /// Missing Manage Server permission is logged and leaves the cache empty.
    pub async fn refresh(&self, http: &Http, cache: &InviteCache, guild_id: u64) -> InviteSnapshot {
        let snapshot = InviteSnapshot {
            invites: fetch_invites(http, guild_id).await,
            vanity: fetch_vanity(http, guild_id).await,
        };
        cache.set_guild(guild_id, &snapshot).await;
        snapshot
    }

    /// Attributes a member join to an invite and records it.
    ///
    /// The cache is refreshed afterwards.
    pub async fn record_join(
        &self,
        http: &Http,
        cache: &InviteCache,
        guild_id: u64,
        user_id: u64,
    ) -> Result<(), AppError> {
        let cached = cache.guild(guild_id).await;
        let current = self.refresh(http, cache, guild_id).await;
        let (inviter_id, code) = attribute_join(&cached, &current).stored();

        tracing::info!(
            "Member {} joined guild {} via {} (inviter {})",
            user_id,
            guild_id,
            code.as_deref().unwrap_or(UNKNOWN_INVITER),
            inviter_id.as_deref().unwrap_or("vanity")
        );

        InviteJoinRepository::new(self.db)
            .record(RecordInviteJoinParam {
                bot_id: self.bot_id,
                guild_id,
                user_id,
                inviter_id,
                code,
            })
            .await?;

        Ok(())
    }

    /// Top inviters of a guild, unknown inviters and vanity joins excluded.
    pub async fn leaderboard(&self, guild_id: u64) -> Result<Vec<(String, i64)>, AppError> {
        Ok(InviteJoinRepository::new(self.db)
            .leaderboard(self.bot_id, guild_id, LEADERBOARD_SIZE)
            .await?)
    }

    pub async fn recent(&self, guild_id: u64) -> Result<Vec<InviteJoin>, AppError> {
        InviteJoinRepository::new(self.db)
            .recent(self.bot_id, guild_id, RECENT_JOINS)
            .await
    }
}

async fn fetch_invites(http: &Http, guild_id: u64) -> Vec<InviteUse> {
    match GuildId::new(guild_id).invites(http).await {
        Ok(invites) => invites
            .into_iter()
            .map(|invite| InviteUse {
                code: invite.code,
                uses: invite.uses,
                inviter_id: invite.inviter.map(|user| user.id.get()),
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to fetch invites for guild {}: {}", guild_id, e);
            Vec::new()
        }
    }
}

#[derive(Deserialize)]
struct VanityInvite {
    code: Option<String>,
    #[serde(default)]
    uses: u64,
}

/// Reads the vanity URL with its use count; serenity's helper only returns the code.
async fn fetch_vanity(http: &Http, guild_id: u64) -> Option<InviteUse> {
    let request = Request::new(
        Route::GuildVanityUrl {
            guild_id: GuildId::new(guild_id),
        },
        LightMethod::Get,
    );

    match http.fire::<VanityInvite>(request).await {
        Ok(VanityInvite {
            code: Some(code),
            uses,
        }) => Some(InviteUse {
            code,
            uses,
            inviter_id: None,
        }),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("No vanity URL for guild {}: {}", guild_id, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invite(code: &str, uses: u64, inviter: Option<u64>) -> InviteUse {
        InviteUse {
            code: code.to_string(),
            uses,
            inviter_id: inviter,
        }
    }

    #[test]
    fn detects_code_whose_uses_grew() {
        let cached = HashMap::from([("abc".to_string(), 3), ("def".to_string(), 1)]);
        let current = vec![invite("abc", 3, Some(1)), invite("def", 2, Some(2))];

        assert_eq!(detect_used_invite(&cached, &current), Some(&current[1]));
    }

    #[test]
    fn new_code_counts_from_zero() {
        let cached = HashMap::new();
        let current = vec![invite("fresh", 1, Some(7))];

        assert_eq!(
            detect_used_invite(&cached, &current).map(|i| i.code.as_str()),
            Some("fresh")
        );
    }

    #[test]
    fn nothing_grew() {
        let cached = HashMap::from([("abc".to_string(), 3)]);
        let current = vec![invite("abc", 3, None), invite("new", 0, None)];

        assert!(detect_used_invite(&cached, &current).is_none());
    }

    fn snapshot(invites: Vec<InviteUse>, vanity_uses: Option<u64>) -> InviteSnapshot {
        InviteSnapshot {
            invites,
            vanity: vanity_uses.map(|uses| invite("shop", uses, None)),
        }
    }

    fn cached(codes: &[(&str, u64)], vanity_uses: Option<u64>) -> GuildInvites {
        GuildInvites {
            codes: codes
                .iter()
                .map(|(code, uses)| (code.to_string(), *uses))
                .collect(),
            vanity_uses,
        }
    }

    #[tokio::test]
    async fn cache_updates_only_known_guilds() {
        let cache = InviteCache::new();
        cache.insert_code(1, "x".to_string(), 0).await;
        assert!(cache.guild(1).await.codes.is_empty());

        cache
            .set_guild(1, &snapshot(vec![invite("a", 2, None)], Some(9)))
            .await;
        cache.insert_code(1, "b".to_string(), 0).await;
        cache.remove_code(1, "a").await;

        assert_eq!(cache.guild(1).await, cached(&[("b", 0)], Some(9)));
    }

    #[test]
    fn vanity_credited_only_when_its_uses_grew() {
        let current = snapshot(vec![invite("abc", 3, Some(1))], Some(10));

        assert_eq!(
            attribute_join(&cached(&[("abc", 3)], Some(9)), &current),
            JoinSource::Vanity(current.vanity.as_ref().unwrap())
        );
        assert_eq!(
            attribute_join(&cached(&[("abc", 3)], Some(10)), &current),
            JoinSource::Unknown
        );
    }

    #[test]
    fn uncached_vanity_is_unknown() {
        let current = snapshot(vec![], Some(4));

        assert_eq!(attribute_join(&cached(&[], None), &current), JoinSource::Unknown);
    }

    #[test]
    fn regular_code_beats_vanity() {
        let current = snapshot(vec![invite("abc", 4, Some(1))], Some(10));

        assert_eq!(
            attribute_join(&cached(&[("abc", 3)], Some(9)), &current),
            JoinSource::Invite(&current.invites[0])
        );
    }

    #[test]
    fn vanity_join_is_stored_without_inviter() {
        let vanity = invite("shop", 2, None);
        let inviter_less = invite("abc", 1, None);

        assert_eq!(
            JoinSource::Vanity(&vanity).stored(),
            (None, Some("shop".to_string()))
        );
        assert_eq!(
            JoinSource::Invite(&inviter_less).stored(),
            (Some("unknown".to_string()), Some("abc".to_string()))
        );
        assert_eq!(
            JoinSource::Unknown.stored(),
            (Some("unknown".to_string()), Some("unknown".to_string()))
        );
    }
}
