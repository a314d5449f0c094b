use sea_orm_migration::{prelude::*, schema::*};

static IDX_PAYMENT_SOURCE: &str = "idx_payment_source_type_source_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(string(Payment::Id).primary_key())
                    .col(string_len(Payment::SourceType, 32))
                    .col(integer(Payment::SourceId))
                    .col(integer_null(Payment::PayerUserId))
                    .col(string_len_null(Payment::SlotRole, 16))
                    .col(string_len(Payment::Status, 32))
                    .col(big_integer(Payment::GrossCents))
                    .col(big_integer(Payment::PlatformFeeCents))
                    .col(string_len(Payment::Currency, 3))
                    .col(big_integer_null(Payment::ProcessorFeeCents))
                    .col(string_uniq(Payment::IdempotencyKey))
                    .col(timestamp(Payment::CreatedAt))
                    .col(timestamp(Payment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_SOURCE)
                    .table(Payment::Table)
                    .col(Payment::SourceType)
                    .col(Payment::SourceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    SourceType,
    SourceId,
    PayerUserId,
    SlotRole,
    Status,
    GrossCents,
    PlatformFeeCents,
    Currency,
    ProcessorFeeCents,
    IdempotencyKey,
    CreatedAt,
    UpdatedAt,
}
