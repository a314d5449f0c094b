use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{LedgerEntryType, SourceType};

/// Immutable signed-amount record tied to a payment. Entries are only ever
/// appended; the unique causation id makes insertion a set-insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ledger_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub payment_id: String,
    pub entry_type: LedgerEntryType,
    pub amount_cents: i64,
    pub currency: String,
    pub source_type: SourceType,
    pub source_id: i32,
    /// Unique per logical event; duplicate appends are silently dropped.
    #[sea_orm(unique)]
    pub causation_id: String,
    pub correlation_id: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payment::Entity",
        from = "Column::PaymentId",
        to = "super::payment::Column::Id"
    )]
    Payment,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
