use entity::sea_orm_active_enums::{
    JoinMode, PaymentMode, RegistrationStatus, SlotPaymentStatus, SlotRole, SlotStatus,
};

use crate::{data::pairing::PairingRepository, service::registration::SwapOutcome};

use super::*;

async fn seed_pairing_with_partner(
    test: &TestContext,
    event_id: i32,
    category_id: i32,
    captain: i32,
    partner: i32,
) -> Result<entity::pairing::Model, TestError> {
    let pairing = test
        .events()
        .insert_pairing(
            event_id,
            category_id,
            captain,
            PaymentMode::Single,
            JoinMode::LookingForPartner,
        )
        .await?;
    test.events()
        .insert_slot(
            pairing.id,
            SlotRole::Captain,
            SlotStatus::Filled,
            SlotPaymentStatus::Paid,
            Some(captain),
        )
        .await?;
    test.events()
        .insert_slot(
            pairing.id,
            SlotRole::Partner,
            SlotStatus::Filled,
            SlotPaymentStatus::Unpaid,
            Some(partner),
        )
        .await?;
    test.events()
        .insert_registration(
            pairing.id,
            event_id,
            category_id,
            RegistrationStatus::PendingPartner,
        )
        .await?;

    Ok(pairing)
}

/// Expect partner occupants exchanged between two pairings of the same
/// category
#[tokio::test]
async fn swaps_partner_occupants() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let pairing_a = seed_pairing_with_partner(&test, event.id, category.id, 1, 2).await?;
    let pairing_b = seed_pairing_with_partner(&test, event.id, category.id, 3, 4).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.swap(pairing_a.id, pairing_b.id).await.unwrap();
    assert!(matches!(outcome, SwapOutcome::Swapped));

    let repo = PairingRepository::new(&test.db);
    let slots_a = repo.get_slots(pairing_a.id).await?;
    let slots_b = repo.get_slots(pairing_b.id).await?;
    assert_eq!(slots_a[1].occupant_user_id, Some(4));
    assert_eq!(slots_b[1].occupant_user_id, Some(2));

    Ok(())
}

/// Expect CategoryMismatch across different categories
#[tokio::test]
async fn rejects_cross_category_swap() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category_a = test.events().insert_category(event.id, None, None, None).await?;
    let category_b = test.events().insert_category(event.id, None, None, None).await?;
    let pairing_a = seed_pairing_with_partner(&test, event.id, category_a.id, 1, 2).await?;
    let pairing_b = seed_pairing_with_partner(&test, event.id, category_b.id, 3, 4).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.swap(pairing_a.id, pairing_b.id).await.unwrap();

    assert!(matches!(outcome, SwapOutcome::CategoryMismatch));

    Ok(())
}

/// Expect Terminal when either side is cancelled
#[tokio::test]
async fn rejects_terminal_pairing() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let pairing_a = seed_pairing_with_partner(&test, event.id, category.id, 1, 2).await?;
    let pairing_b = seed_pairing_with_partner(&test, event.id, category.id, 3, 4).await?;

    let service = RegistrationService::new(&test.db, &config);
    service.cancel(pairing_b.id, "admin", "no show").await.unwrap();
    let outcome = service.swap(pairing_a.id, pairing_b.id).await.unwrap();

    assert!(matches!(outcome, SwapOutcome::Terminal));

    Ok(())
}
