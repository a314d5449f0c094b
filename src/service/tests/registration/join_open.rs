use entity::sea_orm_active_enums::{
    JoinMode, PaymentMode, RegistrationStatus, SlotPaymentStatus, SlotRole, SlotStatus,
};

use crate::{
    data::pairing::PairingRepository,
    model::outcome::Rejection,
    service::registration::JoinOpenOutcome,
};

use super::*;

async fn seed_open_pairing(
    test: &TestContext,
) -> Result<(entity::pairing::Model, entity::registration::Model), TestError> {
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let pairing = test
        .events()
        .insert_pairing(
            event.id,
            category.id,
            1,
            PaymentMode::Single,
            JoinMode::LookingForPartner,
        )
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
            SlotStatus::Pending,
            SlotPaymentStatus::Unpaid,
            None,
        )
        .await?;
    let registration = test
        .events()
        .insert_registration(
            pairing.id,
            event.id,
            category.id,
            RegistrationStatus::Matchmaking,
        )
        .await?;

    Ok((pairing, registration))
}

/// Expect the joiner to fill the partner slot of an open pairing
#[tokio::test]
async fn joins_open_pairing() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let (pairing, _) = seed_open_pairing(&test).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.join_open_pairing(pairing.id, 2).await.unwrap();

    let JoinOpenOutcome::Joined { registration } = outcome else {
        panic!("expected Joined, got {outcome:?}");
    };
    assert_eq!(registration.status, RegistrationStatus::PendingPartner);

    let slots = PairingRepository::new(&test.db).get_slots(pairing.id).await?;
    assert_eq!(slots[1].occupant_user_id, Some(2));

    Ok(())
}

/// Expect NotOpen for an invite pairing
#[tokio::test]
async fn rejects_invite_pairing() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let pairing = test
        .events()
        .insert_invite_pairing(event.id, category.id, 1, PaymentMode::Single, "tok")
        .await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.join_open_pairing(pairing.id, 2).await.unwrap();

    assert!(matches!(outcome, JoinOpenOutcome::NotOpen));

    Ok(())
}

/// Expect the creator to be rejected from joining their own pairing's
/// partner slot
#[tokio::test]
async fn rejects_joiner_already_in_category() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let (pairing, _) = seed_open_pairing(&test).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.join_open_pairing(pairing.id, 1).await.unwrap();

    assert!(matches!(
        outcome,
        JoinOpenOutcome::Rejected(Rejection::AlreadyInCategory)
    ));

    Ok(())
}
