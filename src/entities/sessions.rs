use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeUtc,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::session_searches::Entity")]
    SessionSearches,
    #[sea_orm(has_many = "super::session_results::Entity")]
    SessionResults,
}

impl Related<super::session_searches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionSearches.def()
    }
}

impl Related<super::session_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
