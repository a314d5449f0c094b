use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use entity::sea_orm_active_enums::{PaymentStatus, SlotRole, SourceType};

/// Immutable pricing snapshot plus identity for a new payment.
pub struct NewPayment {
    pub id: String,
    pub source_type: SourceType,
    pub source_id: i32,
    pub payer_user_id: Option<i32>,
    pub slot_role: Option<SlotRole>,
    pub gross_cents: i64,
    pub platform_fee_cents: i64,
    pub currency: String,
    pub idempotency_key: String,
}

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    /// Creates a new instance of [`PaymentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewPayment) -> Result<entity::payment::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::payment::ActiveModel {
            id: ActiveValue::Set(new.id),
            source_type: ActiveValue::Set(new.source_type),
            source_id: ActiveValue::Set(new.source_id),
            payer_user_id: ActiveValue::Set(new.payer_user_id),
            slot_role: ActiveValue::Set(new.slot_role),
            status: ActiveValue::Set(PaymentStatus::Created),
            gross_cents: ActiveValue::Set(new.gross_cents),
            platform_fee_cents: ActiveValue::Set(new.platform_fee_cents),
            currency: ActiveValue::Set(new.currency),
            processor_fee_cents: ActiveValue::Set(None),
            idempotency_key: ActiveValue::Set(new.idempotency_key),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, payment_id: &str) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find_by_id(payment_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::IdempotencyKey.eq(key))
            .one(self.db)
            .await
    }

    pub async fn list_by_source(
        &self,
        source_type: SourceType,
        source_id: i32,
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::SourceType.eq(source_type))
            .filter(entity::payment::Column::SourceId.eq(source_id))
            .all(self.db)
            .await
    }

    pub async fn update_status(
        &self,
        payment: entity::payment::Model,
        status: PaymentStatus,
    ) -> Result<entity::payment::Model, DbErr> {
        let mut active: entity::payment::ActiveModel = payment.into();
        active.status = ActiveValue::Set(status);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        active.update(self.db).await
    }

    pub async fn set_processor_fee(
        &self,
        payment: entity::payment::Model,
        processor_fee_cents: i64,
    ) -> Result<entity::payment::Model, DbErr> {
        let mut active: entity::payment::ActiveModel = payment.into();
        active.processor_fee_cents = ActiveValue::Set(Some(processor_fee_cents));
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        active.update(self.db).await
    }
}
