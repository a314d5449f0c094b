use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{EntitlementStatus, EntitlementType};

/// An access grant derived from a fulfilled payment. Uniquely keyed by
/// (purchase_id, line_id, line_item_index, owner_key, type) so repeated
/// fulfillment is a no-op.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entitlement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Payment id the grant was purchased under.
    pub purchase_id: String,
    /// Line item within the purchase; for registration-sourced payments this
    /// is the slot id.
    pub line_id: i32,
    pub line_item_index: i32,
    pub owner_key: String,
    pub owner_user_id: Option<i32>,
    pub entitlement_type: EntitlementType,
    pub status: EntitlementStatus,
    pub event_id: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
