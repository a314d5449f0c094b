use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000007_create_payment_table::Payment;

static IDX_LEDGER_ENTRY_PAYMENT_ID: &str = "idx_ledger_entry_payment_id";
static FK_LEDGER_ENTRY_PAYMENT_ID: &str = "fk_ledger_entry_payment_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LedgerEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(LedgerEntry::Id))
                    .col(string(LedgerEntry::PaymentId))
                    .col(string_len(LedgerEntry::EntryType, 48))
                    .col(big_integer(LedgerEntry::AmountCents))
                    .col(string_len(LedgerEntry::Currency, 3))
                    .col(string_len(LedgerEntry::SourceType, 32))
                    .col(integer(LedgerEntry::SourceId))
                    .col(string_uniq(LedgerEntry::CausationId))
                    .col(string_null(LedgerEntry::CorrelationId))
                    .col(timestamp(LedgerEntry::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LEDGER_ENTRY_PAYMENT_ID)
                    .table(LedgerEntry::Table)
                    .col(LedgerEntry::PaymentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEDGER_ENTRY_PAYMENT_ID)
                    .from_tbl(LedgerEntry::Table)
                    .from_col(LedgerEntry::PaymentId)
                    .to_tbl(Payment::Table)
                    .to_col(Payment::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LEDGER_ENTRY_PAYMENT_ID)
                    .table(LedgerEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LedgerEntry::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LedgerEntry {
    Table,
    Id,
    PaymentId,
    EntryType,
    AmountCents,
    Currency,
    SourceType,
    SourceId,
    CausationId,
    CorrelationId,
    CreatedAt,
}
