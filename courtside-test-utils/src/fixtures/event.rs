use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use entity::sea_orm_active_enums::{
    GuaranteeStatus, JoinMode, PaymentMode, RegistrationStatus, SlotPaymentStatus, SlotRole,
    SlotStatus, WaitlistStatus,
};

use crate::{constant::TEST_CURRENCY, error::TestError, TestContext};

impl TestContext {
    pub fn events(&self) -> EventFixtures<'_> {
        EventFixtures { setup: self }
    }
}

pub struct EventFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> EventFixtures<'a> {
    pub async fn insert_event(
        &self,
        starts_at: NaiveDateTime,
        max_entries: Option<i32>,
    ) -> Result<entity::event::Model, TestError> {
        Ok(entity::prelude::Event::insert(entity::event::ActiveModel {
            title: ActiveValue::Set("Test Open".to_string()),
            starts_at: ActiveValue::Set(starts_at),
            max_entries: ActiveValue::Set(max_entries),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_category(
        &self,
        event_id: i32,
        capacity: Option<i32>,
        max_players: Option<i32>,
        max_per_user: Option<i32>,
    ) -> Result<entity::category::Model, TestError> {
        Ok(
            entity::prelude::Category::insert(entity::category::ActiveModel {
                event_id: ActiveValue::Set(event_id),
                name: ActiveValue::Set("Mixed B".to_string()),
                capacity: ActiveValue::Set(capacity),
                max_players: ActiveValue::Set(max_players),
                max_per_user: ActiveValue::Set(max_per_user),
                eligibility: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_pairing(
        &self,
        event_id: i32,
        category_id: i32,
        created_by_user_id: i32,
        payment_mode: PaymentMode,
        join_mode: JoinMode,
    ) -> Result<entity::pairing::Model, TestError> {
        Ok(entity::prelude::Pairing::insert(
            entity::pairing::ActiveModel {
                event_id: ActiveValue::Set(event_id),
                category_id: ActiveValue::Set(category_id),
                created_by_user_id: ActiveValue::Set(created_by_user_id),
                payment_mode: ActiveValue::Set(payment_mode),
                join_mode: ActiveValue::Set(join_mode),
                guarantee_status: ActiveValue::Set(GuaranteeStatus::None),
                payment_deadline: ActiveValue::Set(None),
                invite_token: ActiveValue::Set(None),
                charge_attempts: ActiveValue::Set(0),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// SPLIT pairing with an explicit payment deadline and guarantee status,
    /// for deadline sweep scenarios.
    pub async fn insert_split_pairing(
        &self,
        event_id: i32,
        category_id: i32,
        created_by_user_id: i32,
        payment_deadline: NaiveDateTime,
        guarantee_status: GuaranteeStatus,
    ) -> Result<entity::pairing::Model, TestError> {
        Ok(entity::prelude::Pairing::insert(
            entity::pairing::ActiveModel {
                event_id: ActiveValue::Set(event_id),
                category_id: ActiveValue::Set(category_id),
                created_by_user_id: ActiveValue::Set(created_by_user_id),
                payment_mode: ActiveValue::Set(PaymentMode::Split),
                join_mode: ActiveValue::Set(JoinMode::LookingForPartner),
                guarantee_status: ActiveValue::Set(guarantee_status),
                payment_deadline: ActiveValue::Set(Some(payment_deadline)),
                invite_token: ActiveValue::Set(None),
                charge_attempts: ActiveValue::Set(0),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// INVITE_PARTNER pairing carrying an invite token.
    pub async fn insert_invite_pairing(
        &self,
        event_id: i32,
        category_id: i32,
        created_by_user_id: i32,
        payment_mode: PaymentMode,
        invite_token: &str,
    ) -> Result<entity::pairing::Model, TestError> {
        Ok(entity::prelude::Pairing::insert(
            entity::pairing::ActiveModel {
                event_id: ActiveValue::Set(event_id),
                category_id: ActiveValue::Set(category_id),
                created_by_user_id: ActiveValue::Set(created_by_user_id),
                payment_mode: ActiveValue::Set(payment_mode),
                join_mode: ActiveValue::Set(JoinMode::InvitePartner),
                guarantee_status: ActiveValue::Set(GuaranteeStatus::None),
                payment_deadline: ActiveValue::Set(None),
                invite_token: ActiveValue::Set(Some(invite_token.to_string())),
                charge_attempts: ActiveValue::Set(0),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_slot(
        &self,
        pairing_id: i32,
        role: SlotRole,
        status: SlotStatus,
        payment_status: SlotPaymentStatus,
        occupant_user_id: Option<i32>,
    ) -> Result<entity::pairing_slot::Model, TestError> {
        Ok(entity::prelude::PairingSlot::insert(
            entity::pairing_slot::ActiveModel {
                pairing_id: ActiveValue::Set(pairing_id),
                role: ActiveValue::Set(role),
                status: ActiveValue::Set(status),
                payment_status: ActiveValue::Set(payment_status),
                occupant_user_id: ActiveValue::Set(occupant_user_id),
                invited_contact: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_registration(
        &self,
        pairing_id: i32,
        event_id: i32,
        category_id: i32,
        status: RegistrationStatus,
    ) -> Result<entity::registration::Model, TestError> {
        Ok(entity::prelude::Registration::insert(
            entity::registration::ActiveModel {
                pairing_id: ActiveValue::Set(pairing_id),
                event_id: ActiveValue::Set(event_id),
                category_id: ActiveValue::Set(category_id),
                status: ActiveValue::Set(status),
                currency: ActiveValue::Set(TEST_CURRENCY.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_waitlist_entry(
        &self,
        event_id: i32,
        category_id: i32,
        user_id: i32,
    ) -> Result<entity::waitlist_entry::Model, TestError> {
        Ok(entity::prelude::WaitlistEntry::insert(
            entity::waitlist_entry::ActiveModel {
                event_id: ActiveValue::Set(event_id),
                category_id: ActiveValue::Set(category_id),
                user_id: ActiveValue::Set(user_id),
                payment_mode: ActiveValue::Set(PaymentMode::Single),
                join_mode: ActiveValue::Set(JoinMode::LookingForPartner),
                status: ActiveValue::Set(WaitlistStatus::Pending),
                promoted_pairing_id: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Insert a fully confirmed pairing with both slots filled and paid,
    /// plus its CONFIRMED registration row. Used to occupy capacity.
    pub async fn insert_confirmed_pair(
        &self,
        event_id: i32,
        category_id: i32,
        captain_user_id: i32,
        partner_user_id: i32,
    ) -> Result<(entity::pairing::Model, entity::registration::Model), TestError> {
        let pairing = self
            .insert_pairing(
                event_id,
                category_id,
                captain_user_id,
                PaymentMode::Single,
                JoinMode::InvitePartner,
            )
            .await?;

        self.insert_slot(
            pairing.id,
            SlotRole::Captain,
            SlotStatus::Filled,
            SlotPaymentStatus::Paid,
            Some(captain_user_id),
        )
        .await?;
        self.insert_slot(
            pairing.id,
            SlotRole::Partner,
            SlotStatus::Filled,
            SlotPaymentStatus::Paid,
            Some(partner_user_id),
        )
        .await?;

        let registration = self
            .insert_registration(
                pairing.id,
                event_id,
                category_id,
                RegistrationStatus::Confirmed,
            )
            .await?;

        Ok((pairing, registration))
    }
}
