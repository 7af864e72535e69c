use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Login events
        manager
            .create_table(
                Table::create()
                    .table(LoginEvents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LoginEvents::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(LoginEvents::EventId).string().not_null())
                    .col(ColumnDef::new(LoginEvents::ActorId).string().not_null())
                    .col(ColumnDef::new(LoginEvents::Username).string().not_null())
                    .col(ColumnDef::new(LoginEvents::Email).string().not_null())
                    .col(ColumnDef::new(LoginEvents::IpAddress).string().not_null())
                    .col(ColumnDef::new(LoginEvents::UserAgent).string().not_null())
                    .col(ColumnDef::new(LoginEvents::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // event_id is the idempotency key: retried batch inserts must not
        // produce duplicate rows.
        manager
            .create_index(
                Index::create()
                    .name("idx_login_events_event_id")
                    .table(LoginEvents::Table)
                    .col(LoginEvents::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_login_events_actor_id")
                    .table(LoginEvents::Table)
                    .col(LoginEvents::ActorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_login_events_created_at")
                    .table(LoginEvents::Table)
                    .col(LoginEvents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Operation events
        manager
            .create_table(
                Table::create()
                    .table(OperationEvents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OperationEvents::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(OperationEvents::EventId).string().not_null())
                    .col(ColumnDef::new(OperationEvents::ActorId).string().not_null())
                    .col(ColumnDef::new(OperationEvents::Username).string().not_null())
                    .col(ColumnDef::new(OperationEvents::Email).string().not_null())
                    .col(ColumnDef::new(OperationEvents::Operation).string().not_null())
                    .col(ColumnDef::new(OperationEvents::EntityId).string().not_null())
                    .col(ColumnDef::new(OperationEvents::EntityType).string().not_null())
                    .col(ColumnDef::new(OperationEvents::Description).text().not_null())
                    .col(ColumnDef::new(OperationEvents::Outcome).string().not_null())
                    .col(ColumnDef::new(OperationEvents::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operation_events_event_id")
                    .table(OperationEvents::Table)
                    .col(OperationEvents::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operation_events_actor_id")
                    .table(OperationEvents::Table)
                    .col(OperationEvents::ActorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operation_events_created_at")
                    .table(OperationEvents::Table)
                    .col(OperationEvents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoginEvents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OperationEvents::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum LoginEvents {
    Table,
    Id,
    EventId,
    ActorId,
    Username,
    Email,
    IpAddress,
    UserAgent,
    CreatedAt,
}

#[derive(DeriveIden)]
enum OperationEvents {
    Table,
    Id,
    EventId,
    ActorId,
    Username,
    Email,
    Operation,
    EntityId,
    EntityType,
    Description,
    Outcome,
    CreatedAt,
}
