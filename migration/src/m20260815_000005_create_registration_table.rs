use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260815_000001_create_event_table::Event, m20260815_000002_create_category_table::Category,
    m20260815_000003_create_pairing_table::Pairing,
};

static IDX_REGISTRATION_CATEGORY_STATUS: &str = "idx_registration_category_status";
static FK_REGISTRATION_PAIRING_ID: &str = "fk_registration_pairing_id";
static FK_REGISTRATION_EVENT_ID: &str = "fk_registration_event_id";
static FK_REGISTRATION_CATEGORY_ID: &str = "fk_registration_category_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registration::Table)
                    .if_not_exists()
                    .col(pk_auto(Registration::Id))
                    .col(integer_uniq(Registration::PairingId))
                    .col(integer(Registration::EventId))
                    .col(integer(Registration::CategoryId))
                    .col(string_len(Registration::Status, 32))
                    .col(string_len(Registration::Currency, 3))
                    .col(timestamp(Registration::CreatedAt))
                    .col(timestamp(Registration::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_REGISTRATION_CATEGORY_STATUS)
                    .table(Registration::Table)
                    .col(Registration::CategoryId)
                    .col(Registration::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REGISTRATION_PAIRING_ID)
                    .from_tbl(Registration::Table)
                    .from_col(Registration::PairingId)
                    .to_tbl(Pairing::Table)
                    .to_col(Pairing::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REGISTRATION_EVENT_ID)
                    .from_tbl(Registration::Table)
                    .from_col(Registration::EventId)
                    .to_tbl(Event::Table)
                    .to_col(Event::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_REGISTRATION_CATEGORY_ID)
                    .from_tbl(Registration::Table)
                    .from_col(Registration::CategoryId)
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
                    .name(FK_REGISTRATION_CATEGORY_ID)
                    .table(Registration::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REGISTRATION_EVENT_ID)
                    .table(Registration::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_REGISTRATION_PAIRING_ID)
                    .table(Registration::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Registration::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Registration {
    Table,
    Id,
    PairingId,
    EventId,
    CategoryId,
    Status,
    Currency,
    CreatedAt,
    UpdatedAt,
}
