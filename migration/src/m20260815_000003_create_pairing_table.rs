use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260815_000001_create_event_table::Event, m20260815_000002_create_category_table::Category,
};

static IDX_PAIRING_CATEGORY_ID: &str = "idx_pairing_category_id";
static FK_PAIRING_EVENT_ID: &str = "fk_pairing_event_id";
static FK_PAIRING_CATEGORY_ID: &str = "fk_pairing_category_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pairing::Table)
                    .if_not_exists()
                    .col(pk_auto(Pairing::Id))
                    .col(integer(Pairing::EventId))
                    .col(integer(Pairing::CategoryId))
                    .col(integer(Pairing::CreatedByUserId))
                    .col(string_len(Pairing::PaymentMode, 16))
                    .col(string_len(Pairing::JoinMode, 32))
                    .col(string_len(Pairing::GuaranteeStatus, 16))
                    .col(timestamp_null(Pairing::PaymentDeadline))
                    .col(string_null(Pairing::InviteToken))
                    .col(integer(Pairing::ChargeAttempts))
                    .col(timestamp(Pairing::CreatedAt))
                    .col(timestamp(Pairing::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAIRING_CATEGORY_ID)
                    .table(Pairing::Table)
                    .col(Pairing::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAIRING_EVENT_ID)
                    .from_tbl(Pairing::Table)
                    .from_col(Pairing::EventId)
                    .to_tbl(Event::Table)
                    .to_col(Event::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAIRING_CATEGORY_ID)
                    .from_tbl(Pairing::Table)
                    .from_col(Pairing::CategoryId)
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
                    .name(FK_PAIRING_CATEGORY_ID)
                    .table(Pairing::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAIRING_EVENT_ID)
                    .table(Pairing::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Pairing::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Pairing {
    Table,
    Id,
    EventId,
    CategoryId,
    CreatedByUserId,
    PaymentMode,
    JoinMode,
    GuaranteeStatus,
    PaymentDeadline,
    InviteToken,
    ChargeAttempts,
    CreatedAt,
    UpdatedAt,
}
