use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260815_000001_create_event_table::Event, m20260815_000002_create_category_table::Category,
};

static IDX_WAITLIST_CATEGORY_STATUS: &str = "idx_waitlist_entry_category_status";
static FK_WAITLIST_EVENT_ID: &str = "fk_waitlist_entry_event_id";
static FK_WAITLIST_CATEGORY_ID: &str = "fk_waitlist_entry_category_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WaitlistEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(WaitlistEntry::Id))
                    .col(integer(WaitlistEntry::EventId))
                    .col(integer(WaitlistEntry::CategoryId))
                    .col(integer(WaitlistEntry::UserId))
                    .col(string_len(WaitlistEntry::PaymentMode, 16))
                    .col(string_len(WaitlistEntry::JoinMode, 32))
                    .col(string_len(WaitlistEntry::Status, 16))
                    .col(integer_null(WaitlistEntry::PromotedPairingId))
                    .col(timestamp(WaitlistEntry::CreatedAt))
                    .col(timestamp(WaitlistEntry::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WAITLIST_CATEGORY_STATUS)
                    .table(WaitlistEntry::Table)
                    .col(WaitlistEntry::CategoryId)
                    .col(WaitlistEntry::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WAITLIST_EVENT_ID)
                    .from_tbl(WaitlistEntry::Table)
                    .from_col(WaitlistEntry::EventId)
                    .to_tbl(Event::Table)
                    .to_col(Event::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WAITLIST_CATEGORY_ID)
                    .from_tbl(WaitlistEntry::Table)
                    .from_col(WaitlistEntry::CategoryId)
                    .to_tbl(Category::Table)
                    .to_col(Category::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_WAITLIST_CATEGORY_ID)
                    .table(WaitlistEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_WAITLIST_EVENT_ID)
                    .table(WaitlistEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WaitlistEntry::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum WaitlistEntry {
    Table,
    Id,
    EventId,
    CategoryId,
    UserId,
    PaymentMode,
    JoinMode,
    Status,
    PromotedPairingId,
    CreatedAt,
    UpdatedAt,
}
