use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{PaymentStatus, SlotRole, SourceType};

/// One monetary transaction against a source. The pricing snapshot columns
/// (`gross_cents`, `platform_fee_cents`, `currency`) are captured at
/// authorization time and never updated afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub source_type: SourceType,
    pub source_id: i32,
    pub payer_user_id: Option<i32>,
    /// For SPLIT legs, the slot this payment covers; `None` means the
    /// payment covers the whole source (SINGLE mode).
    pub slot_role: Option<SlotRole>,
    pub status: PaymentStatus,
    pub gross_cents: i64,
    pub platform_fee_cents: i64,
    pub currency: String,
    /// Actual processor fee, once reported.
    pub processor_fee_cents: Option<i64>,
    #[sea_orm(unique)]
    pub idempotency_key: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ledger_entry::Entity")]
    LedgerEntry,
}

impl Related<super::ledger_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
