use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000001_create_event_table::Event;

static IDX_ENTITLEMENT_DEDUPE: &str = "idx_entitlement_dedupe";
static IDX_ENTITLEMENT_PURCHASE_ID: &str = "idx_entitlement_purchase_id";
static FK_ENTITLEMENT_EVENT_ID: &str = "fk_entitlement_event_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entitlement::Table)
                    .if_not_exists()
                    .col(pk_auto(Entitlement::Id))
                    .col(string(Entitlement::PurchaseId))
                    .col(integer(Entitlement::LineId))
                    .col(integer(Entitlement::LineItemIndex))
                    .col(string(Entitlement::OwnerKey))
                    .col(integer_null(Entitlement::OwnerUserId))
                    .col(string_len(Entitlement::EntitlementType, 32))
                    .col(string_len(Entitlement::Status, 16))
                    .col(integer(Entitlement::EventId))
                    .col(timestamp(Entitlement::CreatedAt))
                    .col(timestamp(Entitlement::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ENTITLEMENT_DEDUPE)
                    .table(Entitlement::Table)
                    .col(Entitlement::PurchaseId)
                    .col(Entitlement::LineId)
                    .col(Entitlement::LineItemIndex)
                    .col(Entitlement::OwnerKey)
                    .col(Entitlement::EntitlementType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ENTITLEMENT_PURCHASE_ID)
                    .table(Entitlement::Table)
                    .col(Entitlement::PurchaseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ENTITLEMENT_EVENT_ID)
                    .from_tbl(Entitlement::Table)
                    .from_col(Entitlement::EventId)
                    .to_tbl(Event::Table)
                    .to_col(Event::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ENTITLEMENT_EVENT_ID)
                    .table(Entitlement::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Entitlement::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Entitlement {
    Table,
    Id,
    PurchaseId,
    LineId,
    LineItemIndex,
    OwnerKey,
    OwnerUserId,
    EntitlementType,
    Status,
    EventId,
    CreatedAt,
    UpdatedAt,
}
