use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{JoinMode, PaymentMode, WaitlistStatus};

/// A queued registration request, FIFO by creation time within a category.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "waitlist_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub event_id: i32,
    pub category_id: i32,
    pub user_id: i32,
    /// Modes the promoted pairing will be created with.
    pub payment_mode: PaymentMode,
    pub join_mode: JoinMode,
    pub status: WaitlistStatus,
    pub promoted_pairing_id: Option<i32>,
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
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
