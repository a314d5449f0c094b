use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use entity::sea_orm_active_enums::{LedgerEntryType, SourceType};

pub struct NewLedgerEntry {
    pub payment_id: String,
    pub entry_type: LedgerEntryType,
    pub amount_cents: i64,
    pub currency: String,
    pub source_type: SourceType,
    pub source_id: i32,
    pub causation_id: String,
    pub correlation_id: Option<String>,
}

pub struct LedgerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LedgerRepository<'a, C> {
    /// Creates a new instance of [`LedgerRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Set-insert: an entry for an already-recorded causation id is silently
    /// dropped and `None` is returned. The unique column is the backstop for
    /// writers racing on the same causation id.
    pub async fn append(
        &self,
        new: NewLedgerEntry,
    ) -> Result<Option<entity::ledger_entry::Model>, DbErr> {
        let exists = entity::prelude::LedgerEntry::find()
            .filter(entity::ledger_entry::Column::CausationId.eq(new.causation_id.as_str()))
            .count(self.db)
            .await?
            > 0;

        if exists {
            return Ok(None);
        }

        let entry = entity::ledger_entry::ActiveModel {
            payment_id: ActiveValue::Set(new.payment_id),
            entry_type: ActiveValue::Set(new.entry_type),
            amount_cents: ActiveValue::Set(new.amount_cents),
            currency: ActiveValue::Set(new.currency),
            source_type: ActiveValue::Set(new.source_type),
            source_id: ActiveValue::Set(new.source_id),
            causation_id: ActiveValue::Set(new.causation_id),
            correlation_id: ActiveValue::Set(new.correlation_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Some(entry))
    }

    pub async fn list_for_payment(
        &self,
        payment_id: &str,
    ) -> Result<Vec<entity::ledger_entry::Model>, DbErr> {
        entity::prelude::LedgerEntry::find()
            .filter(entity::ledger_entry::Column::PaymentId.eq(payment_id))
            .order_by_asc(entity::ledger_entry::Column::Id)
            .all(self.db)
            .await
    }

    /// Signed sum of every entry for a payment. Zero after a completed full
    /// refund or chargeback-loss cycle (dispute fees aside).
    pub async fn balance(&self, payment_id: &str) -> Result<i64, DbErr> {
        let entries = self.list_for_payment(payment_id).await?;

        Ok(entries.iter().map(|e| e.amount_cents).sum())
    }
}
