use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "panel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub bot_id: i32,
    pub guild_id: String,
    pub channel_id: String,
    pub message_id: Option<String>,
    pub name: String,
    pub message_content: Option<String>,
    pub embed_title: Option<String>,
    pub embed_title_url: Option<String>,
    pub embed_description: Option<String>,
    pub embed_color: String,
    pub embed_image: Option<String>,
    pub embed_thumbnail: Option<String>,
    pub embed_footer: Option<String>,
    pub embed_footer_icon: Option<String>,
    pub embed_author_name: Option<String>,
    pub embed_author_icon: Option<String>,
    pub embed_author_url: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::panel_option::Entity")]
    PanelOption,
}

impl Related<super::panel_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PanelOption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
