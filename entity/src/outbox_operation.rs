use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::OperationStatus;

/// Durable at-least-once follow-up work, written in the same transaction as
/// the state change that requires it. Duplicate dedupe keys collapse.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "outbox_operation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub operation_type: String,
    #[sea_orm(unique)]
    pub dedupe_key: String,
    pub correlation_id: Option<String>,
    pub payload: Json,
    pub status: OperationStatus,
    pub attempts: i32,
    pub last_error: Option<String>,
    /// Earliest time a worker may claim this operation (retry backoff).
    pub run_after: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
