use sea_orm::sea_query::{Condition, OnConflict};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::errors::{CoreError, StorageError};
use crate::types::db::{login_event, operation_event};
use crate::types::internal::audit::{AuditRecord, BufferedEvent, LoginEvent, OperationEvent};
use crate::types::internal::filter::{AuditFilter, Page, SortDirection, TimeRange};

/// Repository for the append-only audit event collections
///
/// Events are inserted (singly on the fallback path, in batches by the
/// synchronizer) and range-purged for retention; never updated. Batch
/// inserts key on `event_id` with DO NOTHING, so re-delivering an entry is
/// harmless.
pub struct AuditStore {
    db: DatabaseConnection,
}

impl AuditStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Durably persist a batch of buffered events
    ///
    /// All-or-nothing per statement: on error nothing is acknowledged and
    /// the caller leaves every entry queued for the next pass. Returns the
    /// number of rows actually inserted, which is lower than the batch size
    /// when some entries were already delivered by an earlier pass.
    pub async fn insert_batch(&self, entries: &[BufferedEvent]) -> Result<u64, StorageError> {
        let mut logins = Vec::new();
        let mut operations = Vec::new();
        for entry in entries {
            match &entry.record {
                AuditRecord::Login(event) => logins.push(login_active(entry, event)),
                AuditRecord::Operation(event) => {
                    operations.push(operation_active(entry, event))
                }
            }
        }

        let mut inserted = 0;
        if !logins.is_empty() {
            inserted += login_event::Entity::insert_many(logins)
                .on_conflict(
                    OnConflict::column(login_event::Column::EventId)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .map_err(|e| StorageError::database("insert_login_events", e))?;
        }
        if !operations.is_empty() {
            inserted += operation_event::Entity::insert_many(operations)
                .on_conflict(
                    OnConflict::column(operation_event::Column::EventId)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .map_err(|e| StorageError::database("insert_operation_events", e))?;
        }

        Ok(inserted)
    }

    /// Direct synchronous insert, used when the queue backend is down
    pub async fn insert_one(&self, entry: &BufferedEvent) -> Result<(), StorageError> {
        self.insert_batch(std::slice::from_ref(entry)).await?;
        Ok(())
    }

    pub async fn list_login(
        &self,
        filter: &AuditFilter,
        page: Page,
        sort: SortDirection,
    ) -> Result<Vec<login_event::Model>, CoreError> {
        login_event::Entity::find()
            .filter(login_condition(filter))
            .order_by(login_event::Column::CreatedAt, sort.into())
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::database("list_login_events", e))
    }

    pub async fn list_operation(
        &self,
        filter: &AuditFilter,
        page: Page,
        sort: SortDirection,
    ) -> Result<Vec<operation_event::Model>, CoreError> {
        operation_event::Entity::find()
            .filter(operation_condition(filter))
            .order_by(operation_event::Column::CreatedAt, sort.into())
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::database("list_operation_events", e))
    }

    pub async fn count_login(&self, filter: &AuditFilter) -> Result<u64, CoreError> {
        login_event::Entity::find()
            .filter(login_condition(filter))
            .count(&self.db)
            .await
            .map_err(|e| CoreError::database("count_login_events", e))
    }

    pub async fn count_operation(&self, filter: &AuditFilter) -> Result<u64, CoreError> {
        operation_event::Entity::find()
            .filter(operation_condition(filter))
            .count(&self.db)
            .await
            .map_err(|e| CoreError::database("count_operation_events", e))
    }

    /// Retention: hard-delete login events in a created_at range
    pub async fn purge_login_range(&self, range: TimeRange) -> Result<u64, CoreError> {
        let cond = range.apply(login_event::Column::CreatedAt, Condition::all());
        let result = login_event::Entity::delete_many()
            .filter(cond)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::database("purge_login_events", e))?;
        Ok(result.rows_affected)
    }

    /// Retention: hard-delete operation events in a created_at range
    pub async fn purge_operation_range(&self, range: TimeRange) -> Result<u64, CoreError> {
        let cond = range.apply(operation_event::Column::CreatedAt, Condition::all());
        let result = operation_event::Entity::delete_many()
            .filter(cond)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::database("purge_operation_events", e))?;
        Ok(result.rows_affected)
    }
}

fn login_active(entry: &BufferedEvent, event: &LoginEvent) -> login_event::ActiveModel {
    login_event::ActiveModel {
        id: NotSet,
        event_id: Set(entry.event_id.to_string()),
        actor_id: Set(event.actor_id.clone()),
        username: Set(event.username.clone()),
        email: Set(event.email.clone()),
        ip_address: Set(event.ip_address.clone()),
        user_agent: Set(event.user_agent.clone()),
        created_at: Set(event.created_at.timestamp_millis()),
    }
}

fn operation_active(entry: &BufferedEvent, event: &OperationEvent) -> operation_event::ActiveModel {
    operation_event::ActiveModel {
        id: NotSet,
        event_id: Set(entry.event_id.to_string()),
        actor_id: Set(event.actor_id.clone()),
        username: Set(event.username.clone()),
        email: Set(event.email.clone()),
        operation: Set(event.operation.as_str().to_string()),
        entity_id: Set(event.entity_id.clone()),
        entity_type: Set(event.entity_type.clone()),
        description: Set(event.description.clone()),
        outcome: Set(event.outcome.as_str().to_string()),
        created_at: Set(event.created_at.timestamp_millis()),
    }
}

fn login_condition(filter: &AuditFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(actor_id) = &filter.actor_id {
        cond = cond.add(login_event::Column::ActorId.eq(actor_id.clone()));
    }
    filter.created.apply(login_event::Column::CreatedAt, cond)
}

fn operation_condition(filter: &AuditFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(actor_id) = &filter.actor_id {
        cond = cond.add(operation_event::Column::ActorId.eq(actor_id.clone()));
    }
    filter.created.apply(operation_event::Column::CreatedAt, cond)
}
