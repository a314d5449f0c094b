use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::RegistrationStatus;

/// Materialized registration status, 1:1 with a pairing. The authoritative
/// record for capacity counting; always a deterministic function of the
/// pairing's slot state and payment mode.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "registration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub pairing_id: i32,
    pub event_id: i32,
    pub category_id: i32,
    pub status: RegistrationStatus,
    pub currency: String,
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
