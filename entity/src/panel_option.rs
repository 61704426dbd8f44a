use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "panel_option")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub panel_id: i32,
    pub label: String,
    pub emoji: Option<String>,
    pub style: String,
    pub category_name: Option<String>,
    pub ticket_prefix: Option<String>,
    pub support_role_ids: String,
    pub required_roles: String,
    pub welcome_message: Option<String>,
    pub ticket_message: Option<String>,
    pub staff_thread_message: Option<String>,
    pub steam_required: bool,
    pub pings_enabled: bool,
    pub is_disabled: bool,
    pub ticket_style: String,
    pub ticket_category_id: Option<String>,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::panel::Entity",
        from = "Column::PanelId",
        to = "super::panel::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Panel,
    #[sea_orm(has_many = "super::panel_question::Entity")]
    PanelQuestion,
}

impl Related<super::panel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Panel.def()
    }
}

impl Related<super::panel_question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PanelQuestion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
