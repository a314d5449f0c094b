use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use entity::sea_orm_active_enums::{JoinMode, PaymentMode, WaitlistStatus};

pub struct WaitlistRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WaitlistRepository<'a, C> {
    /// Creates a new instance of [`WaitlistRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        event_id: i32,
        category_id: i32,
        user_id: i32,
        payment_mode: PaymentMode,
        join_mode: JoinMode,
    ) -> Result<entity::waitlist_entry::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::waitlist_entry::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            category_id: ActiveValue::Set(category_id),
            user_id: ActiveValue::Set(user_id),
            payment_mode: ActiveValue::Set(payment_mode),
            join_mode: ActiveValue::Set(join_mode),
            status: ActiveValue::Set(WaitlistStatus::Pending),
            promoted_pairing_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// A user's existing PENDING entry for the category, if any. Backs the
    /// idempotent enqueue.
    pub async fn find_pending_for_user(
        &self,
        category_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::waitlist_entry::Model>, DbErr> {
        entity::prelude::WaitlistEntry::find()
            .filter(entity::waitlist_entry::Column::CategoryId.eq(category_id))
            .filter(entity::waitlist_entry::Column::UserId.eq(user_id))
            .filter(entity::waitlist_entry::Column::Status.eq(WaitlistStatus::Pending))
            .one(self.db)
            .await
    }

    /// Oldest PENDING entry for the category, FIFO by creation time.
    pub async fn next_pending(
        &self,
        category_id: i32,
    ) -> Result<Option<entity::waitlist_entry::Model>, DbErr> {
        entity::prelude::WaitlistEntry::find()
            .filter(entity::waitlist_entry::Column::CategoryId.eq(category_id))
            .filter(entity::waitlist_entry::Column::Status.eq(WaitlistStatus::Pending))
            .order_by_asc(entity::waitlist_entry::Column::CreatedAt)
            .order_by_asc(entity::waitlist_entry::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn mark_promoted(
        &self,
        entry: entity::waitlist_entry::Model,
        pairing_id: i32,
    ) -> Result<entity::waitlist_entry::Model, DbErr> {
        let mut active: entity::waitlist_entry::ActiveModel = entry.into();
        active.status = ActiveValue::Set(WaitlistStatus::Promoted);
        active.promoted_pairing_id = ActiveValue::Set(Some(pairing_id));
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        active.update(self.db).await
    }

    pub async fn mark_cancelled(
        &self,
        entry: entity::waitlist_entry::Model,
    ) -> Result<entity::waitlist_entry::Model, DbErr> {
        let mut active: entity::waitlist_entry::ActiveModel = entry.into();
        active.status = ActiveValue::Set(WaitlistStatus::Cancelled);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        active.update(self.db).await
    }
}
