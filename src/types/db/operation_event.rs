use sea_orm::entity::prelude::*;

/// SeaORM entity for the operation_events table
///
/// Append-only, same conventions as login_events.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "operation_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub event_id: String,
    pub actor_id: String,
    pub username: String,
    pub email: String,
    pub operation: String,
    pub entity_id: String,
    pub entity_type: String,
    pub description: String,
    pub outcome: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
