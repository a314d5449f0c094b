mod create;
mod settle;

use super::*;

use entity::sea_orm_active_enums::{
    PaymentMode, RegistrationStatus, SlotPaymentStatus, SlotRole, SlotStatus,
};

use crate::service::payment::PaymentService;

/// Filled but unpaid SINGLE pairing awaiting the captain's payment.
async fn seed_unpaid_pairing(
    test: &TestContext,
) -> Result<(entity::pairing::Model, entity::registration::Model), TestError> {
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let pairing = test
        .events()
        .insert_invite_pairing(event.id, category.id, 1, PaymentMode::Single, "tok")
        .await?;
    test.events()
        .insert_slot(
            pairing.id,
            SlotRole::Captain,
            SlotStatus::Filled,
            SlotPaymentStatus::Unpaid,
            Some(1),
        )
        .await?;
    test.events()
        .insert_slot(
            pairing.id,
            SlotRole::Partner,
            SlotStatus::Filled,
            SlotPaymentStatus::Unpaid,
            Some(2),
        )
        .await?;
    let registration = test
        .events()
        .insert_registration(
            pairing.id,
            event.id,
            category.id,
            RegistrationStatus::PendingPartner,
        )
        .await?;

    Ok((pairing, registration))
}
