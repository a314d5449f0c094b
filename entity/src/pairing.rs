use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{GuaranteeStatus, JoinMode, PaymentMode};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pairing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub event_id: i32,
    pub category_id: i32,
    pub created_by_user_id: i32,
    pub payment_mode: PaymentMode,
    pub join_mode: JoinMode,
    pub guarantee_status: GuaranteeStatus,
    /// Deadline for the outstanding leg; past this the sweep either attempts
    /// the second charge or expires the registration.
    pub payment_deadline: Option<DateTime>,
    /// Token that lets the invited partner claim their slot (INVITE_PARTNER
    /// join mode only).
    pub invite_token: Option<String>,
    /// Monotonic second-charge attempt counter; keys processor idempotency.
    pub charge_attempts: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
    #[sea_orm(has_many = "super::pairing_slot::Entity")]
    PairingSlot,
    #[sea_orm(has_one = "super::registration::Entity")]
    Registration,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::pairing_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PairingSlot.def()
    }
}

impl Related<super::registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
