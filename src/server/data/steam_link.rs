//! Steam account link repository.

use crate::server::{error::AppError, model::community::SteamLink};
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

pub struct SteamLinkRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SteamLinkRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Links a Discord user to a Steam id, replacing any earlier link.
    pub async fn link(
        &self,
        user_id: u64,
        steam_id: &str,
        steam_name: Option<String>,
    ) -> Result<SteamLink, AppError> {
        let entity = entity::prelude::SteamLink::insert(entity::steam_link::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            steam_id: ActiveValue::Set(steam_id.to_string()),
            steam_name: ActiveValue::Set(steam_name),
            linked_at: ActiveValue::Set(chrono::Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::steam_link::Column::UserId)
                .update_columns([
                    entity::steam_link::Column::SteamId,
                    entity::steam_link::Column::SteamName,
                    entity::steam_link::Column::LinkedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        SteamLink::from_entity(entity)
    }

    pub async fn find(&self, user_id: u64) -> Result<Option<SteamLink>, AppError> {
        entity::prelude::SteamLink::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
            .map(SteamLink::from_entity)
            .transpose()
    }

    pub async fn unlink(&self, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::SteamLink::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
