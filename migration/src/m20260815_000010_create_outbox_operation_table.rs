use sea_orm_migration::{prelude::*, schema::*};

static IDX_OUTBOX_STATUS_RUN_AFTER: &str = "idx_outbox_operation_status_run_after";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OutboxOperation::Table)
                    .if_not_exists()
                    .col(pk_auto(OutboxOperation::Id))
                    .col(string_len(OutboxOperation::OperationType, 48))
                    .col(string_uniq(OutboxOperation::DedupeKey))
                    .col(string_null(OutboxOperation::CorrelationId))
                    .col(json(OutboxOperation::Payload))
                    .col(string_len(OutboxOperation::Status, 16))
                    .col(integer(OutboxOperation::Attempts))
                    .col(string_null(OutboxOperation::LastError))
                    .col(timestamp(OutboxOperation::RunAfter))
                    .col(timestamp(OutboxOperation::CreatedAt))
                    .col(timestamp(OutboxOperation::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OUTBOX_STATUS_RUN_AFTER)
                    .table(OutboxOperation::Table)
                    .col(OutboxOperation::Status)
                    .col(OutboxOperation::RunAfter)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OutboxOperation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OutboxOperation {
    Table,
    Id,
    OperationType,
    DedupeKey,
    CorrelationId,
    Payload,
    Status,
    Attempts,
    LastError,
    RunAfter,
    CreatedAt,
    UpdatedAt,
}
