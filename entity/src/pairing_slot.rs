use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{SlotPaymentStatus, SlotRole, SlotStatus};

/// One player position within a pairing. Exactly two exist per pairing
/// (captain + partner), created together with it and never independently.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pairing_slot")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pairing_id: i32,
    pub role: SlotRole,
    pub status: SlotStatus,
    pub payment_status: SlotPaymentStatus,
    /// Resolved occupant; mutually exclusive with `invited_contact`.
    pub occupant_user_id: Option<i32>,
    /// Invited-but-unresolved contact string; mutually exclusive with
    /// `occupant_user_id`.
    pub invited_contact: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pairing::Entity",
        from = "Column::PairingId",
        to = "super::pairing::Column::Id"
    )]
    Pairing,
}

impl Related<super::pairing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pairing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
