use sea_orm_migration::{prelude::*, schema::*};

static IDX_AUDIT_RECORD_SOURCE: &str = "idx_audit_record_source_type_source_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(AuditRecord::Id))
                    .col(string(AuditRecord::Actor))
                    .col(string_len(AuditRecord::Action, 64))
                    .col(string_len(AuditRecord::SourceType, 32))
                    .col(integer(AuditRecord::SourceId))
                    .col(json(AuditRecord::Detail))
                    .col(timestamp(AuditRecord::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AUDIT_RECORD_SOURCE)
                    .table(AuditRecord::Table)
                    .col(AuditRecord::SourceType)
                    .col(AuditRecord::SourceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AuditRecord {
    Table,
    Id,
    Actor,
    Action,
    SourceType,
    SourceId,
    Detail,
    CreatedAt,
}
