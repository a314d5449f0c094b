//! Factory functions for generating in-memory payment models.
//!
//! These model instances do not require database interaction and are suitable
//! for unit tests of settlement composition.

use chrono::Utc;

use entity::sea_orm_active_enums::{PaymentStatus, SourceType};

use crate::constant::{TEST_CURRENCY, TEST_GROSS_CENTS, TEST_PLATFORM_FEE_CENTS};

/// Create a payment model with standard test amounts.
pub fn mock_payment_model(payment_id: &str, status: PaymentStatus) -> entity::payment::Model {
    let now = Utc::now().naive_utc();
    entity::payment::Model {
        id: payment_id.to_string(),
        source_type: SourceType::Registration,
        source_id: 1,
        payer_user_id: Some(1),
        slot_role: None,
        status,
        gross_cents: TEST_GROSS_CENTS,
        platform_fee_cents: TEST_PLATFORM_FEE_CENTS,
        currency: TEST_CURRENCY.to_string(),
        processor_fee_cents: None,
        idempotency_key: format!("test:{payment_id}"),
        created_at: now,
        updated_at: now,
    }
}
