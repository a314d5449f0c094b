use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use entity::sea_orm_active_enums::{
    GuaranteeStatus, JoinMode, PaymentMode, SlotPaymentStatus, SlotRole, SlotStatus,
};

pub struct NewPairing {
    pub event_id: i32,
    pub category_id: i32,
    pub created_by_user_id: i32,
    pub payment_mode: PaymentMode,
    pub join_mode: JoinMode,
    pub payment_deadline: Option<NaiveDateTime>,
    pub invite_token: Option<String>,
}

pub struct PairingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PairingRepository<'a, C> {
    /// Creates a new instance of [`PairingRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewPairing) -> Result<entity::pairing::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::pairing::ActiveModel {
            event_id: ActiveValue::Set(new.event_id),
            category_id: ActiveValue::Set(new.category_id),
            created_by_user_id: ActiveValue::Set(new.created_by_user_id),
            payment_mode: ActiveValue::Set(new.payment_mode),
            join_mode: ActiveValue::Set(new.join_mode),
            guarantee_status: ActiveValue::Set(GuaranteeStatus::None),
            payment_deadline: ActiveValue::Set(new.payment_deadline),
            invite_token: ActiveValue::Set(new.invite_token),
            charge_attempts: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn get(&self, pairing_id: i32) -> Result<Option<entity::pairing::Model>, DbErr> {
        entity::prelude::Pairing::find_by_id(pairing_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_invite_token(
        &self,
        token: &str,
    ) -> Result<Option<entity::pairing::Model>, DbErr> {
        entity::prelude::Pairing::find()
            .filter(entity::pairing::Column::InviteToken.eq(token))
            .one(self.db)
            .await
    }

    /// The two slots of a pairing, captain first.
    pub async fn get_slots(
        &self,
        pairing_id: i32,
    ) -> Result<Vec<entity::pairing_slot::Model>, DbErr> {
        entity::prelude::PairingSlot::find()
            .filter(entity::pairing_slot::Column::PairingId.eq(pairing_id))
            .order_by_asc(entity::pairing_slot::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn create_slot(
        &self,
        pairing_id: i32,
        role: SlotRole,
        status: SlotStatus,
        occupant_user_id: Option<i32>,
        invited_contact: Option<String>,
    ) -> Result<entity::pairing_slot::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::pairing_slot::ActiveModel {
            pairing_id: ActiveValue::Set(pairing_id),
            role: ActiveValue::Set(role),
            status: ActiveValue::Set(status),
            payment_status: ActiveValue::Set(SlotPaymentStatus::Unpaid),
            occupant_user_id: ActiveValue::Set(occupant_user_id),
            invited_contact: ActiveValue::Set(invited_contact),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Fill a slot with a resolved user, clearing any invited contact.
    pub async fn fill_slot(
        &self,
        slot: entity::pairing_slot::Model,
        user_id: i32,
    ) -> Result<entity::pairing_slot::Model, DbErr> {
        let mut active: entity::pairing_slot::ActiveModel = slot.into();
        active.status = ActiveValue::Set(SlotStatus::Filled);
        active.occupant_user_id = ActiveValue::Set(Some(user_id));
        active.invited_contact = ActiveValue::Set(None);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        active.update(self.db).await
    }

    pub async fn mark_slot_paid(
        &self,
        slot: entity::pairing_slot::Model,
    ) -> Result<entity::pairing_slot::Model, DbErr> {
        let mut active: entity::pairing_slot::ActiveModel = slot.into();
        active.payment_status = ActiveValue::Set(SlotPaymentStatus::Paid);
        active.updated_at = ActiveValue::Set(Utc::now().naive_utc());
        active.update(self.db).await
    }

    /// Terminal transition for both slots: CANCELLED and UNPAID.
    pub async fn cancel_slots(&self, pairing_id: i32) -> Result<(), DbErr> {
        entity::prelude::PairingSlot::update_many()
            .set(entity::pairing_slot::ActiveModel {
                status: ActiveValue::Set(SlotStatus::Cancelled),
                payment_status: ActiveValue::Set(SlotPaymentStatus::Unpaid),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::pairing_slot::Column::PairingId.eq(pairing_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Overwrite a partner slot's occupant fields during a swap.
    pub async fn overwrite_slot_occupancy(
        &self,
        slot_id: i32,
        status: SlotStatus,
        payment_status: SlotPaymentStatus,
        occupant_user_id: Option<i32>,
        invited_contact: Option<String>,
    ) -> Result<(), DbErr> {
        entity::prelude::PairingSlot::update_many()
            .set(entity::pairing_slot::ActiveModel {
                status: ActiveValue::Set(status),
                payment_status: ActiveValue::Set(payment_status),
                occupant_user_id: ActiveValue::Set(occupant_user_id),
                invited_contact: ActiveValue::Set(invited_contact),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::pairing_slot::Column::Id.eq(slot_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn set_guarantee(
        &self,
        pairing_id: i32,
        status: GuaranteeStatus,
    ) -> Result<(), DbErr> {
        entity::prelude::Pairing::update_many()
            .set(entity::pairing::ActiveModel {
                guarantee_status: ActiveValue::Set(status),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::pairing::Column::Id.eq(pairing_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Bump the second-charge attempt counter, conditional on the previous
    /// value so overlapping sweeps cannot both claim the same attempt.
    pub async fn claim_charge_attempt(
        &self,
        pairing: &entity::pairing::Model,
    ) -> Result<Option<i32>, DbErr> {
        let next = pairing.charge_attempts + 1;

        let result = entity::prelude::Pairing::update_many()
            .set(entity::pairing::ActiveModel {
                charge_attempts: ActiveValue::Set(next),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::pairing::Column::Id.eq(pairing.id))
            .filter(entity::pairing::Column::ChargeAttempts.eq(pairing.charge_attempts))
            .exec(self.db)
            .await?;

        Ok((result.rows_affected == 1).then_some(next))
    }

    /// Filled slots across a set of pairings, for per-player capacity counts
    /// and membership checks.
    pub async fn slots_in_pairings(
        &self,
        pairing_ids: Vec<i32>,
    ) -> Result<Vec<entity::pairing_slot::Model>, DbErr> {
        if pairing_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::PairingSlot::find()
            .filter(entity::pairing_slot::Column::PairingId.is_in(pairing_ids))
            .filter(entity::pairing_slot::Column::Status.ne(SlotStatus::Cancelled))
            .all(self.db)
            .await
    }
}
