//! Panel repository covering panels, their options and intake questions.

use crate::server::{
    error::AppError,
    model::panel::{
        OptionWithQuestions, Panel, PanelEmbed, PanelOption, PanelQuestion, PanelWithOptions,
        SaveOptionParam, SavePanelParam,
    },
    util::parse::encode_id_list,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct PanelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PanelRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a panel with its options and questions in the given order.
    ///
    /// The panel starts without a message id; set it with `set_message` once posted.
    ///
    /// # Returns
    /// - `Ok(PanelWithOptions)` - The stored panel
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, param: SavePanelParam) -> Result<PanelWithOptions, AppError> {
        let mut active = embed_columns(&param.blueprint.embed);
        active.bot_id = ActiveValue::Set(param.bot_id);
        active.guild_id = ActiveValue::Set(param.guild_id.to_string());
        active.channel_id = ActiveValue::Set(param.channel_id.to_string());
        active.message_id = ActiveValue::Set(None);
        active.name = ActiveValue::Set(param.blueprint.name.clone());
        active.created_at = ActiveValue::Set(chrono::Utc::now());

        let panel = active.insert(self.db).await?;
        insert_options(self.db, panel.id, &param.blueprint.options).await?;

        self.find_with_options(panel.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Panel not found".to_string()))
    }

    /// Replaces a panel's layout, recreating every option and question.
    ///
    /// # Returns
    /// - `Ok(Some(PanelWithOptions))` - Updated panel
    /// - `Ok(None)` - No panel with that id
    pub async fn replace(
        &self,
        panel_id: i32,
        param: SavePanelParam,
    ) -> Result<Option<PanelWithOptions>, AppError> {
        let Some(existing) = entity::prelude::Panel::find_by_id(panel_id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = embed_columns(&param.blueprint.embed);
        active.id = ActiveValue::Unchanged(existing.id);
        active.channel_id = ActiveValue::Set(param.channel_id.to_string());
        active.name = ActiveValue::Set(param.blueprint.name.clone());
        active.update(self.db).await?;

        entity::prelude::PanelOption::delete_many()
            .filter(entity::panel_option::Column::PanelId.eq(panel_id))
            .exec(self.db)
            .await?;
        insert_options(self.db, panel_id, &param.blueprint.options).await?;

        self.find_with_options(panel_id).await
    }

    /// Records where the panel message now lives.
    pub async fn set_message(
        &self,
        panel_id: i32,
        channel_id: u64,
        message_id: Option<u64>,
    ) -> Result<(), DbErr> {
        entity::prelude::Panel::update_many()
            .col_expr(
                entity::panel::Column::ChannelId,
                Expr::value(channel_id.to_string()),
            )
            .col_expr(
                entity::panel::Column::MessageId,
                Expr::value(message_id.map(|id| id.to_string())),
            )
            .filter(entity::panel::Column::Id.eq(panel_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, panel_id: i32) -> Result<Option<Panel>, AppError> {
        entity::prelude::Panel::find_by_id(panel_id)
            .one(self.db)
            .await?
            .map(Panel::from_entity)
            .transpose()
    }

    /// Loads a panel with its options and questions, each ordered by position.
    pub async fn find_with_options(
        &self,
        panel_id: i32,
    ) -> Result<Option<PanelWithOptions>, AppError> {
        let Some(panel) = self.find_by_id(panel_id).await? else {
            return Ok(None);
        };

        let options = self.options_for(panel.id).await?;

        Ok(Some(PanelWithOptions { panel, options }))
    }

    /// Gets every panel of a guild for the bot, oldest first.
    pub async fn get_by_guild(
        &self,
        bot_id: i32,
        guild_id: u64,
    ) -> Result<Vec<PanelWithOptions>, AppError> {
        let panels = entity::prelude::Panel::find()
            .filter(entity::panel::Column::BotId.eq(bot_id))
            .filter(entity::panel::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::panel::Column::Id)
            .all(self.db)
            .await?;

        let mut result = Vec::with_capacity(panels.len());
        for entity in panels {
            let panel = Panel::from_entity(entity)?;
            let options = self.options_for(panel.id).await?;
            result.push(PanelWithOptions { panel, options });
        }

        Ok(result)
    }

    pub async fn count_by_guild(&self, bot_id: i32, guild_id: u64) -> Result<u64, DbErr> {
        entity::prelude::Panel::find()
            .filter(entity::panel::Column::BotId.eq(bot_id))
            .filter(entity::panel::Column::GuildId.eq(guild_id.to_string()))
            .count(self.db)
            .await
    }

    /// Finds an option together with the panel it belongs to.
    ///
    /// Used when a panel button is pressed, so the option id is untrusted input.
    pub async fn find_option(
        &self,
        option_id: i32,
    ) -> Result<Option<(Panel, OptionWithQuestions)>, AppError> {
        let Some(option) = entity::prelude::PanelOption::find_by_id(option_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let Some(panel) = self.find_by_id(option.panel_id).await? else {
            return Ok(None);
        };

        let questions = self.questions_for(option.id).await?;

        Ok(Some((
            panel,
            OptionWithQuestions {
                option: PanelOption::from_entity(option)?,
                questions,
            },
        )))
    }

    /// Deletes a panel. Options and questions cascade.
    pub async fn delete(&self, panel_id: i32) -> Result<bool, DbErr> {
        entity::prelude::PanelOption::delete_many()
            .filter(entity::panel_option::Column::PanelId.eq(panel_id))
            .exec(self.db)
            .await?;
        let result = entity::prelude::Panel::delete_by_id(panel_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn options_for(&self, panel_id: i32) -> Result<Vec<OptionWithQuestions>, AppError> {
        let options = entity::prelude::PanelOption::find()
            .filter(entity::panel_option::Column::PanelId.eq(panel_id))
            .order_by_asc(entity::panel_option::Column::Position)
            .order_by_asc(entity::panel_option::Column::Id)
            .all(self.db)
            .await?;

        let mut result = Vec::with_capacity(options.len());
        for option in options {
            let questions = self.questions_for(option.id).await?;
            result.push(OptionWithQuestions {
                option: PanelOption::from_entity(option)?,
                questions,
            });
        }

        Ok(result)
    }

    async fn questions_for(&self, option_id: i32) -> Result<Vec<PanelQuestion>, DbErr> {
        let questions = entity::prelude::PanelQuestion::find()
            .filter(entity::panel_question::Column::OptionId.eq(option_id))
            .order_by_asc(entity::panel_question::Column::Position)
            .order_by_asc(entity::panel_question::Column::Id)
            .all(self.db)
            .await?;

        Ok(questions.into_iter().map(PanelQuestion::from_entity).collect())
    }
}

fn embed_columns(embed: &PanelEmbed) -> entity::panel::ActiveModel {
    entity::panel::ActiveModel {
        message_content: ActiveValue::Set(embed.message_content.clone()),
        embed_title: ActiveValue::Set(embed.title.clone()),
        embed_title_url: ActiveValue::Set(embed.title_url.clone()),
        embed_description: ActiveValue::Set(embed.description.clone()),
        embed_color: ActiveValue::Set(embed.color.clone()),
        embed_image: ActiveValue::Set(embed.image.clone()),
        embed_thumbnail: ActiveValue::Set(embed.thumbnail.clone()),
        embed_footer: ActiveValue::Set(embed.footer.clone()),
        embed_footer_icon: ActiveValue::Set(embed.footer_icon.clone()),
        embed_author_name: ActiveValue::Set(embed.author_name.clone()),
        embed_author_icon: ActiveValue::Set(embed.author_icon.clone()),
        embed_author_url: ActiveValue::Set(embed.author_url.clone()),
        ..Default::default()
    }
}

async fn insert_options<C: ConnectionTrait>(
    db: &C,
    panel_id: i32,
    options: &[SaveOptionParam],
) -> Result<(), DbErr> {
    for (position, option) in options.iter().enumerate() {
        let stored = entity::panel_option::ActiveModel {
            panel_id: ActiveValue::Set(panel_id),
            label: ActiveValue::Set(option.label.clone()),
            emoji: ActiveValue::Set(option.emoji.clone()),
            style: ActiveValue::Set(option.style.as_str().to_string()),
            category_name: ActiveValue::Set(option.category_name.clone()),
            ticket_prefix: ActiveValue::Set(option.ticket_prefix.clone()),
            support_role_ids: ActiveValue::Set(encode_id_list(&option.support_role_ids)),
            required_roles: ActiveValue::Set(encode_id_list(&option.required_roles)),
            welcome_message: ActiveValue::Set(option.welcome_message.clone()),
            ticket_message: ActiveValue::Set(option.ticket_message.clone()),
            staff_thread_message: ActiveValue::Set(option.staff_thread_message.clone()),
            steam_required: ActiveValue::Set(option.steam_required),
            pings_enabled: ActiveValue::Set(option.pings_enabled),
            is_disabled: ActiveValue::Set(option.is_disabled),
            ticket_style: ActiveValue::Set(option.ticket_style.as_str().to_string()),
            ticket_category_id: ActiveValue::Set(option.ticket_category_id.map(|id| id.to_string())),
            position: ActiveValue::Set(position as i32),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for (position, question) in option.questions.iter().enumerate() {
            entity::panel_question::ActiveModel {
                option_id: ActiveValue::Set(stored.id),
                question: ActiveValue::Set(question.question.clone()),
                placeholder: ActiveValue::Set(question.placeholder.clone()),
                required: ActiveValue::Set(question.required),
                min_length: ActiveValue::Set(question.min_length),
                max_length: ActiveValue::Set(question.max_length),
                style: ActiveValue::Set(question.style.as_str().to_string()),
                position: ActiveValue::Set(position as i32),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    Ok(())
}
