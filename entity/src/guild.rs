use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "guild")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub bot_id: i32,
    pub name: String,
    pub log_channel_id: Option<String>,
    pub transcript_channel_id: Option<String>,
    pub ticket_category_id: Option<String>,
    pub support_role_ids: String,
    pub admin_role_ids: String,
    pub ticket_counter: i32,
    pub language: String,
    pub timezone: String,
    pub auto_close_hours: i32,
    pub auto_close_warning_hours: i32,
    pub vouch_channel_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub vouch_data: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
