use sea_orm::entity::prelude::*;

/// SeaORM entity for the submissions table
///
/// Timestamps are unix milliseconds. `deleted_at` is set only while
/// `deleted` is true; `status_message` is empty unless the status is
/// REJECTED.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_id: String,

    // Reviewable payload
    pub instruction: String,
    pub input: String,
    pub output: String,

    // Classification / provenance
    pub theme: String,
    pub source: String,
    pub note: String,

    pub status_code: String,
    pub status_message: String,

    pub deleted: bool,
    pub deleted_at: Option<i64>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
