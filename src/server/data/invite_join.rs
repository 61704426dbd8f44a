//! Invite join repository backing the invite leaderboard.

use crate::server::{
    error::AppError,
    model::community::{InviteJoin, RecordInviteJoinParam},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Inviter id recorded when a join cannot be attributed.
pub const UNKNOWN_INVITER: &str = "unknown";

pub struct InviteJoinRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InviteJoinRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a member join.
    ///
    /// `inviter_id` is stored as given; vanity URL joins have none. A missing
    /// code is stored as `unknown`.
    pub async fn record(&self, param: RecordInviteJoinParam) -> Result<(), DbErr> {
        entity::invite_join::ActiveModel {
            bot_id: ActiveValue::Set(param.bot_id),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            inviter_id: ActiveValue::Set(param.inviter_id),
            code: ActiveValue::Set(Some(
                param.code.unwrap_or_else(|| UNKNOWN_INVITER.to_string()),
            )),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Top inviters by attributed joins, excluding unknown and vanity joins.
    ///
    /// # Arguments
    /// - `limit` - Maximum number of inviters returned
    ///
    /// # Returns
    /// - `Ok(Vec<(inviter_id, uses)>)` - Inviters ordered by join count descending
    pub async fn leaderboard(
        &self,
        bot_id: i32,
        guild_id: u64,
        limit: u64,
    ) -> Result<Vec<(String, i64)>, DbErr> {
        entity::prelude::InviteJoin::find()
            .select_only()
            .column(entity::invite_join::Column::InviterId)
            .column_as(entity::invite_join::Column::Id.count(), "uses")
            .filter(entity::invite_join::Column::BotId.eq(bot_id))
            .filter(entity::invite_join::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::invite_join::Column::InviterId.is_not_null())
            .filter(entity::invite_join::Column::InviterId.ne(UNKNOWN_INVITER))
            .group_by(entity::invite_join::Column::InviterId)
            .order_by_desc(entity::invite_join::Column::Id.count())
            .limit(limit)
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Most recent joins, newest first.
    pub async fn recent(
        &self,
        bot_id: i32,
        guild_id: u64,
        limit: u64,
    ) -> Result<Vec<InviteJoin>, AppError> {
        entity::prelude::InviteJoin::find()
            .filter(entity::invite_join::Column::BotId.eq(bot_id))
            .filter(entity::invite_join::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::invite_join::Column::CreatedAt)
            .order_by_desc(entity::invite_join::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(InviteJoin::from_entity)
            .collect()
    }
}
