use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "panel_question")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub option_id: i32,
    pub question: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub min_length: i32,
    pub max_length: i32,
    pub style: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::panel_option::Entity",
        from = "Column::OptionId",
        to = "super::panel_option::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    PanelOption,
}

impl Related<super::panel_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PanelOption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
