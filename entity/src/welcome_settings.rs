use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "welcome_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub bot_id: i32,
    pub welcome_enabled: bool,
    pub welcome_channel_id: Option<String>,
    pub welcome_message: String,
    pub goodbye_enabled: bool,
    pub goodbye_channel_id: Option<String>,
    pub goodbye_message: String,
    pub autorole_enabled: bool,
    pub autorole_id: Option<String>,
    pub card_enabled: bool,
    pub card_background: Option<String>,
    pub card_font: String,
    pub card_text_color: String,
    pub card_bg_color: String,
    #[sea_orm(column_type = "Double")]
    pub card_overlay_opacity: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
