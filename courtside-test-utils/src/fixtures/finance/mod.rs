//! Payment fixture utilities.
//!
//! Provides insert helpers for payment records and factory functions for
//! creating in-memory payment models without database interaction.

pub mod factory;

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use entity::sea_orm_active_enums::{PaymentStatus, SlotRole, SourceType};

use crate::{
    constant::{TEST_CURRENCY, TEST_GROSS_CENTS, TEST_PLATFORM_FEE_CENTS},
    error::TestError,
    TestContext,
};

impl TestContext {
    pub fn finance(&self) -> FinanceFixtures<'_> {
        FinanceFixtures { setup: self }
    }
}

pub struct FinanceFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> FinanceFixtures<'a> {
    pub async fn insert_payment(
        &self,
        payment_id: &str,
        source_type: SourceType,
        source_id: i32,
        status: PaymentStatus,
    ) -> Result<entity::payment::Model, TestError> {
        self.insert_payment_with_amounts(
            payment_id,
            source_type,
            source_id,
            status,
            TEST_GROSS_CENTS,
            TEST_PLATFORM_FEE_CENTS,
        )
        .await
    }

    /// SPLIT leg payment for a registration, tagged with the paying slot's
    /// role.
    pub async fn insert_leg_payment(
        &self,
        payment_id: &str,
        registration_id: i32,
        slot_role: SlotRole,
        payer_user_id: i32,
        status: PaymentStatus,
    ) -> Result<entity::payment::Model, TestError> {
        Ok(entity::prelude::Payment::insert(
            entity::payment::ActiveModel {
                id: ActiveValue::Set(payment_id.to_string()),
                source_type: ActiveValue::Set(SourceType::Registration),
                source_id: ActiveValue::Set(registration_id),
                payer_user_id: ActiveValue::Set(Some(payer_user_id)),
                slot_role: ActiveValue::Set(Some(slot_role)),
                status: ActiveValue::Set(status),
                gross_cents: ActiveValue::Set(TEST_GROSS_CENTS),
                platform_fee_cents: ActiveValue::Set(TEST_PLATFORM_FEE_CENTS),
                currency: ActiveValue::Set(TEST_CURRENCY.to_string()),
                processor_fee_cents: ActiveValue::Set(None),
                idempotency_key: ActiveValue::Set(format!("test:{payment_id}")),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_payment_with_amounts(
        &self,
        payment_id: &str,
        source_type: SourceType,
        source_id: i32,
        status: PaymentStatus,
        gross_cents: i64,
        platform_fee_cents: i64,
    ) -> Result<entity::payment::Model, TestError> {
        Ok(entity::prelude::Payment::insert(
            entity::payment::ActiveModel {
                id: ActiveValue::Set(payment_id.to_string()),
                source_type: ActiveValue::Set(source_type),
                source_id: ActiveValue::Set(source_id),
                payer_user_id: ActiveValue::Set(None),
                slot_role: ActiveValue::Set(None),
                status: ActiveValue::Set(status),
                gross_cents: ActiveValue::Set(gross_cents),
                platform_fee_cents: ActiveValue::Set(platform_fee_cents),
                currency: ActiveValue::Set(TEST_CURRENCY.to_string()),
                processor_fee_cents: ActiveValue::Set(None),
                idempotency_key: ActiveValue::Set(format!("test:{payment_id}")),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
