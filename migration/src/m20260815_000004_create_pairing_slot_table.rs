use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000003_create_pairing_table::Pairing;

static IDX_PAIRING_SLOT_PAIRING_ID: &str = "idx_pairing_slot_pairing_id";
static FK_PAIRING_SLOT_PAIRING_ID: &str = "fk_pairing_slot_pairing_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PairingSlot::Table)
                    .if_not_exists()
                    .col(pk_auto(PairingSlot::Id))
                    .col(integer(PairingSlot::PairingId))
                    .col(string_len(PairingSlot::Role, 16))
                    .col(string_len(PairingSlot::Status, 16))
                    .col(string_len(PairingSlot::PaymentStatus, 16))
                    .col(integer_null(PairingSlot::OccupantUserId))
                    .col(string_null(PairingSlot::InvitedContact))
                    .col(timestamp(PairingSlot::CreatedAt))
                    .col(timestamp(PairingSlot::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAIRING_SLOT_PAIRING_ID)
                    .table(PairingSlot::Table)
                    .col(PairingSlot::PairingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAIRING_SLOT_PAIRING_ID)
                    .from_tbl(PairingSlot::Table)
                    .from_col(PairingSlot::PairingId)
                    .to_tbl(Pairing::Table)
                    .to_col(Pairing::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAIRING_SLOT_PAIRING_ID)
                    .table(PairingSlot::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PairingSlot::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PairingSlot {
    Table,
    Id,
    PairingId,
    Role,
    Status,
    PaymentStatus,
    OccupantUserId,
    InvitedContact,
    CreatedAt,
    UpdatedAt,
}
