use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use entity::sea_orm_active_enums::{EntitlementStatus, EntitlementType};

/// The deterministic dedupe key: repeated fulfillment of the same line item
/// for the same owner resolves to the same row.
pub struct EntitlementKey {
    pub purchase_id: String,
    pub line_id: i32,
    pub line_item_index: i32,
    pub owner_key: String,
    pub entitlement_type: EntitlementType,
}

pub struct EntitlementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EntitlementRepository<'a, C> {
    /// Creates a new instance of [`EntitlementRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_key(
        &self,
        key: &EntitlementKey,
    ) -> Result<Option<entity::entitlement::Model>, DbErr> {
        entity::prelude::Entitlement::find()
            .filter(entity::entitlement::Column::PurchaseId.eq(key.purchase_id.as_str()))
            .filter(entity::entitlement::Column::LineId.eq(key.line_id))
            .filter(entity::entitlement::Column::LineItemIndex.eq(key.line_item_index))
            .filter(entity::entitlement::Column::OwnerKey.eq(key.owner_key.as_str()))
            .filter(entity::entitlement::Column::EntitlementType.eq(key.entitlement_type))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        key: EntitlementKey,
        owner_user_id: Option<i32>,
        event_id: i32,
    ) -> Result<entity::entitlement::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::entitlement::ActiveModel {
            purchase_id: ActiveValue::Set(key.purchase_id),
            line_id: ActiveValue::Set(key.line_id),
            line_item_index: ActiveValue::Set(key.line_item_index),
            owner_key: ActiveValue::Set(key.owner_key),
            owner_user_id: ActiveValue::Set(owner_user_id),
            entitlement_type: ActiveValue::Set(key.entitlement_type),
            status: ActiveValue::Set(EntitlementStatus::Active),
            event_id: ActiveValue::Set(event_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn update_status(
        &self,
        entitlement: entity::entitlement::Model,
        status: EntitlementStatus,
    ) -> Result<entity::entitlement::Model, DbErr> {
        let mut active: entity::entitlement::ActiveModel = entitlement.into();
        active.status = ActiveValue::Set(status);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        active.update(self.db).await
    }

    pub async fn list_by_purchase(
        &self,
        purchase_id: &str,
    ) -> Result<Vec<entity::entitlement::Model>, DbErr> {
        entity::prelude::Entitlement::find()
            .filter(entity::entitlement::Column::PurchaseId.eq(purchase_id))
            .order_by_asc(entity::entitlement::Column::Id)
            .all(self.db)
            .await
    }

    /// Batch status transition across a whole purchase, restricted to rows
    /// currently in one of the `from` statuses. Returns the affected count.
    pub async fn set_status_for_purchase(
        &self,
        purchase_id: &str,
        from: &[EntitlementStatus],
        to: EntitlementStatus,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Entitlement::update_many()
            .set(entity::entitlement::ActiveModel {
                status: ActiveValue::Set(to),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::entitlement::Column::PurchaseId.eq(purchase_id))
            .filter(entity::entitlement::Column::Status.is_in(from.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
