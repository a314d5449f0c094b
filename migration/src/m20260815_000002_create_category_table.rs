use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000001_create_event_table::Event;

static FK_CATEGORY_EVENT_ID: &str = "fk_category_event_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(pk_auto(Category::Id))
                    .col(integer(Category::EventId))
                    .col(string(Category::Name))
                    .col(integer_null(Category::Capacity))
                    .col(integer_null(Category::MaxPlayers))
                    .col(integer_null(Category::MaxPerUser))
                    .col(string_null(Category::Eligibility))
                    .col(timestamp(Category::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CATEGORY_EVENT_ID)
                    .from_tbl(Category::Table)
                    .from_col(Category::EventId)
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
                    .name(FK_CATEGORY_EVENT_ID)
                    .table(Category::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Category {
    Table,
    Id,
    EventId,
    Name,
    Capacity,
    MaxPlayers,
    MaxPerUser,
    Eligibility,
    CreatedAt,
}
