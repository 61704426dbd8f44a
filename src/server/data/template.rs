//! Panel template repository.

use crate::server::{
    error::AppError,
    model::panel::{PanelBlueprint, Template},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

pub struct TemplateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TemplateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a panel blueprint as a named template.
    pub async fn create(
        &self,
        bot_id: i32,
        guild_id: u64,
        name: String,
        blueprint: &PanelBlueprint,
    ) -> Result<Template, AppError> {
        let entity = entity::template::ActiveModel {
            bot_id: ActiveValue::Set(bot_id),
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(name),
            panel_data: ActiveValue::Set(blueprint.to_json()?),
            created_at: ActiveValue::Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Template::from_entity(entity)
    }

    /// Finds a template scoped to the bot and guild.
    pub async fn find(
        &self,
        bot_id: i32,
        guild_id: u64,
        template_id: i32,
    ) -> Result<Option<Template>, AppError> {
        entity::prelude::Template::find_by_id(template_id)
            .filter(entity::template::Column::BotId.eq(bot_id))
            .filter(entity::template::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?
            .map(Template::from_entity)
            .transpose()
    }

    pub async fn get_by_guild(&self, bot_id: i32, guild_id: u64) -> Result<Vec<Template>, AppError> {
        entity::prelude::Template::find()
            .filter(entity::template::Column::BotId.eq(bot_id))
            .filter(entity::template::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::template::Column::CreatedAt)
            .order_by_desc(entity::template::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Template::from_entity)
            .collect()
    }

    pub async fn delete(&self, bot_id: i32, guild_id: u64, template_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Template::delete_many()
            .filter(entity::template::Column::Id.eq(template_id))
            .filter(entity::template::Column::BotId.eq(bot_id))
            .filter(entity::template::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
