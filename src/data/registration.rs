use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use entity::sea_orm_active_enums::RegistrationStatus;

/// Statuses counted against capacity.
pub const ACTIVE_STATUSES: [RegistrationStatus; 3] = [
    RegistrationStatus::Matchmaking,
    RegistrationStatus::PendingPartner,
    RegistrationStatus::Confirmed,
];

pub struct RegistrationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RegistrationRepository<'a, C> {
    /// Creates a new instance of [`RegistrationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        pairing_id: i32,
        event_id: i32,
        category_id: i32,
        status: RegistrationStatus,
        currency: &str,
    ) -> Result<entity::registration::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::registration::ActiveModel {
            pairing_id: ActiveValue::Set(pairing_id),
            event_id: ActiveValue::Set(event_id),
            category_id: ActiveValue::Set(category_id),
            status: ActiveValue::Set(status),
            currency: ActiveValue::Set(currency.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(
        &self,
        registration_id: i32,
    ) -> Result<Option<entity::registration::Model>, DbErr> {
        entity::prelude::Registration::find_by_id(registration_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_pairing(
        &self,
        pairing_id: i32,
    ) -> Result<Option<entity::registration::Model>, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::PairingId.eq(pairing_id))
            .one(self.db)
            .await
    }

    pub async fn update_status(
        &self,
        registration: entity::registration::Model,
        status: RegistrationStatus,
    ) -> Result<entity::registration::Model, DbErr> {
        let mut active: entity::registration::ActiveModel = registration.into();
        active.status = ActiveValue::Set(status);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        active.update(self.db).await
    }

    /// Conditional transition: applied only if the row is still in one of the
    /// expected prior states. Returns whether this caller won the claim, so
    /// overlapping sweeps and double cancels are safe.
    pub async fn claim_transition(
        &self,
        registration_id: i32,
        from: &[RegistrationStatus],
        to: RegistrationStatus,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Registration::update_many()
            .set(entity::registration::ActiveModel {
                status: ActiveValue::Set(to),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::registration::Column::Id.eq(registration_id))
            .filter(entity::registration::Column::Status.is_in(from.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn count_active_by_event(&self, event_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::EventId.eq(event_id))
            .filter(entity::registration::Column::Status.is_in(ACTIVE_STATUSES))
            .count(self.db)
            .await
    }

    pub async fn active_in_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<entity::registration::Model>, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::CategoryId.eq(category_id))
            .filter(entity::registration::Column::Status.is_in(ACTIVE_STATUSES))
            .all(self.db)
            .await
    }

    pub async fn active_in_event(
        &self,
        event_id: i32,
    ) -> Result<Vec<entity::registration::Model>, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::EventId.eq(event_id))
            .filter(entity::registration::Column::Status.is_in(ACTIVE_STATUSES))
            .all(self.db)
            .await
    }

    /// Non-confirmed registrations whose pairing deadline has passed, oldest
    /// deadline first. Feeds the deadline sweep.
    pub async fn list_overdue(
        &self,
        now: NaiveDateTime,
        limit: u64,
    ) -> Result<Vec<(entity::registration::Model, entity::pairing::Model)>, DbErr> {
        let rows = entity::prelude::Registration::find()
            .find_also_related(entity::prelude::Pairing)
            .filter(entity::registration::Column::Status.is_in([
                RegistrationStatus::Matchmaking,
                RegistrationStatus::PendingPartner,
            ]))
            .filter(entity::pairing::Column::PaymentDeadline.lte(now))
            .order_by_asc(entity::pairing::Column::PaymentDeadline)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(registration, pairing)| pairing.map(|p| (registration, p)))
            .collect())
    }
}
