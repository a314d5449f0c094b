use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use entity::sea_orm_active_enums::OperationStatus;

pub struct OutboxRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OutboxRepository<'a, C> {
    /// Creates a new instance of [`OutboxRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Enqueue an operation, collapsing duplicate dedupe keys. Returns `None`
    /// when an operation with the same key already exists; the unique column
    /// backs this up against concurrent enqueuers.
    pub async fn enqueue(
        &self,
        operation_type: &str,
        dedupe_key: &str,
        correlation_id: Option<String>,
        payload: serde_json::Value,
        run_after: NaiveDateTime,
    ) -> Result<Option<entity::outbox_operation::Model>, DbErr> {
        let exists = entity::prelude::OutboxOperation::find()
            .filter(entity::outbox_operation::Column::DedupeKey.eq(dedupe_key))
            .count(self.db)
            .await?
            > 0;

        if exists {
            return Ok(None);
        }

        let now = Utc::now().naive_utc();

        let operation = entity::outbox_operation::ActiveModel {
            operation_type: ActiveValue::Set(operation_type.to_string()),
            dedupe_key: ActiveValue::Set(dedupe_key.to_string()),
            correlation_id: ActiveValue::Set(correlation_id),
            payload: ActiveValue::Set(payload),
            status: ActiveValue::Set(OperationStatus::Pending),
            attempts: ActiveValue::Set(0),
            last_error: ActiveValue::Set(None),
            run_after: ActiveValue::Set(run_after),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Some(operation))
    }

    /// PENDING operations ready to run, oldest first.
    pub async fn list_due(
        &self,
        now: NaiveDateTime,
        limit: u64,
    ) -> Result<Vec<entity::outbox_operation::Model>, DbErr> {
        entity::prelude::OutboxOperation::find()
            .filter(entity::outbox_operation::Column::Status.eq(OperationStatus::Pending))
            .filter(entity::outbox_operation::Column::RunAfter.lte(now))
            .order_by_asc(entity::outbox_operation::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Claim an operation for execution: bumps the attempt counter,
    /// conditional on the status and counter the caller read. Only one of
    /// two racing workers wins the claim.
    pub async fn claim(&self, operation: &entity::outbox_operation::Model) -> Result<bool, DbErr> {
        let result = entity::prelude::OutboxOperation::update_many()
            .set(entity::outbox_operation::ActiveModel {
                attempts: ActiveValue::Set(operation.attempts + 1),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::outbox_operation::Column::Id.eq(operation.id))
            .filter(entity::outbox_operation::Column::Status.eq(OperationStatus::Pending))
            .filter(entity::outbox_operation::Column::Attempts.eq(operation.attempts))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn mark_completed(&self, operation_id: i32) -> Result<(), DbErr> {
        entity::prelude::OutboxOperation::update_many()
            .set(entity::outbox_operation::ActiveModel {
                status: ActiveValue::Set(OperationStatus::Completed),
                last_error: ActiveValue::Set(None),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::outbox_operation::Column::Id.eq(operation_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Keep the operation PENDING and push it into the future for a retry.
    pub async fn reschedule(
        &self,
        operation_id: i32,
        last_error: &str,
        run_after: NaiveDateTime,
    ) -> Result<(), DbErr> {
        entity::prelude::OutboxOperation::update_many()
            .set(entity::outbox_operation::ActiveModel {
                last_error: ActiveValue::Set(Some(last_error.to_string())),
                run_after: ActiveValue::Set(run_after),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::outbox_operation::Column::Id.eq(operation_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Terminal failure after the retry budget is exhausted.
    pub async fn mark_failed(&self, operation_id: i32, last_error: &str) -> Result<(), DbErr> {
        entity::prelude::OutboxOperation::update_many()
            .set(entity::outbox_operation::ActiveModel {
                status: ActiveValue::Set(OperationStatus::Failed),
                last_error: ActiveValue::Set(Some(last_error.to_string())),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::outbox_operation::Column::Id.eq(operation_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn get_by_dedupe_key(
        &self,
        dedupe_key: &str,
    ) -> Result<Option<entity::outbox_operation::Model>, DbErr> {
        entity::prelude::OutboxOperation::find()
            .filter(entity::outbox_operation::Column::DedupeKey.eq(dedupe_key))
            .one(self.db)
            .await
    }
}
