use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Submissions: the reviewed entity
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Submissions::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Submissions::OwnerId).string().not_null())
                    .col(ColumnDef::new(Submissions::Instruction).text().not_null())
                    .col(ColumnDef::new(Submissions::Input).text().not_null())
                    .col(ColumnDef::new(Submissions::Output).text().not_null())
                    .col(ColumnDef::new(Submissions::Theme).string().not_null())
                    .col(ColumnDef::new(Submissions::Source).string().not_null())
                    .col(ColumnDef::new(Submissions::Note).text().not_null())
                    .col(ColumnDef::new(Submissions::StatusCode).string().not_null())
                    .col(ColumnDef::new(Submissions::StatusMessage).string().not_null())
                    .col(ColumnDef::new(Submissions::Deleted).boolean().not_null())
                    .col(ColumnDef::new(Submissions::DeletedAt).big_integer())
                    .col(ColumnDef::new(Submissions::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Submissions::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_owner_id")
                    .table(Submissions::Table)
                    .col(Submissions::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_status_code")
                    .table(Submissions::Table)
                    .col(Submissions::StatusCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_created_at")
                    .table(Submissions::Table)
                    .col(Submissions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Accounts: weak-reference target for owner_id / audit denormalization
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Accounts::Email).string().not_null())
                    .col(ColumnDef::new(Accounts::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    OwnerId,
    Instruction,
    Input,
    Output,
    Theme,
    Source,
    Note,
    StatusCode,
    StatusMessage,
    Deleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Username,
    Email,
    CreatedAt,
}
