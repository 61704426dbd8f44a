use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub bot_id: i32,
    pub guild_id: String,
    #[sea_orm(unique)]
    pub channel_id: String,
    pub user_id: String,
    pub panel_id: Option<i32>,
    pub option_id: Option<i32>,
    pub ticket_number: i32,
    pub status: String,
    pub claimed_by: Option<String>,
    pub opened_at: DateTimeUtc,
    pub closed_at: Option<DateTimeUtc>,
    pub closed_by: Option<String>,
    pub close_reason: Option<String>,
    pub transcript_url: Option<String>,
    pub last_activity: DateTimeUtc,
    pub first_response_at: Option<DateTimeUtc>,
    pub response_time_seconds: Option<i64>,
    pub warned_auto_close: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub messages: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket_response::Entity")]
    TicketResponse,
    #[sea_orm(has_many = "super::ticket_participant::Entity")]
    TicketParticipant,
}

impl Related<super::ticket_response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketResponse.def()
    }
}

impl Related<super::ticket_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketParticipant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
