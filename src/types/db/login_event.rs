use sea_orm::entity::prelude::*;

/// SeaORM entity for the login_events table
///
/// Append-only. `event_id` is the client-generated idempotency key
/// (unique index); `username`/`email` are denormalized from the actor's
/// account so the read path needs no join.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "login_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub event_id: String,
    pub actor_id: String,
    pub username: String,
    pub email: String,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
