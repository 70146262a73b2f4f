use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "session_searches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unique: a session owns at most one search configuration.
    #[sea_orm(unique)]
    pub session_id: i32,
    pub query: String,
    /// JSON-encoded sequence of issue tags, order and duplicates preserved.
    pub issues_filter: String,
    pub max_results_requested: i32,
    pub checked_websites_count: i32,
    pub last_search_cursor: Option<String>,
    pub status: String,
    pub completed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sessions::Entity",
        from = "Column::SessionId",
        to = "super::sessions::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Sessions,
}

impl Related<super::sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
