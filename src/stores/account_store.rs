use sea_orm::{ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::errors::CoreError;
use crate::types::db::account;

/// Identity lookup used to denormalize audit events and submission
/// ownership display fields
///
/// Account lifecycle is owned by an out-of-scope collaborator; this store
/// only reads, plus an insert for bootstrap and tests.
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &str) -> Result<account::Model, CoreError> {
        let found = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("get_account", e))?;

        found.ok_or_else(|| CoreError::not_found("account", id))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<account::Model, CoreError> {
        let found = account::Entity::find()
            .filter(account::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::database("get_account_by_username", e))?;

        found.ok_or_else(|| CoreError::not_found("account", username))
    }

    pub async fn insert(&self, model: account::Model) -> Result<(), CoreError> {
        account::Entity::insert(account::ActiveModel {
            id: Set(model.id),
            username: Set(model.username),
            email: Set(model.email),
            created_at: Set(model.created_at),
        })
        .exec(&self.db)
        .await
        .map_err(|e| CoreError::database("insert_account", e))?;
        Ok(())
    }
}
