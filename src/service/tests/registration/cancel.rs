use entity::sea_orm_active_enums::{
    PaymentStatus, RegistrationStatus, SlotStatus, SourceType,
};

use crate::{
    data::{outbox::OutboxRepository, pairing::PairingRepository, registration::RegistrationRepository},
    service::registration::TerminalOutcome,
};

use super::*;

/// Expect cancellation to terminate the pairing and enqueue exactly one
/// refund and one promotion operation
#[tokio::test]
async fn cancel_enqueues_refund_and_promotion() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let (pairing, registration) = test
        .events()
        .insert_confirmed_pair(event.id, category.id, 1, 2)
        .await?;
    let payment = test
        .finance()
        .insert_payment(
            "pay-1",
            SourceType::Registration,
            registration.id,
            PaymentStatus::Succeeded,
        )
        .await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.cancel(pairing.id, "user:1", "changed plans").await.unwrap();
    assert_eq!(outcome, TerminalOutcome::Applied);

    let registration = RegistrationRepository::new(&test.db)
        .get(registration.id)
        .await?
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Cancelled);

    let slots = PairingRepository::new(&test.db).get_slots(pairing.id).await?;
    assert!(slots.iter().all(|s| s.status == SlotStatus::Cancelled));

    let outbox = OutboxRepository::new(&test.db);
    assert!(outbox
        .get_by_dedupe_key(&format!("payment:{}:refund", payment.id))
        .await?
        .is_some());
    assert!(outbox
        .get_by_dedupe_key(&format!(
            "category:{}:promote:pairing:{}",
            category.id, pairing.id
        ))
        .await?
        .is_some());

    Ok(())
}

/// Expect the second cancel to lose the claim and enqueue nothing new
#[tokio::test]
async fn double_cancel_is_idempotent() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let (pairing, registration) = test
        .events()
        .insert_confirmed_pair(event.id, category.id, 1, 2)
        .await?;
    test.finance()
        .insert_payment(
            "pay-1",
            SourceType::Registration,
            registration.id,
            PaymentStatus::Succeeded,
        )
        .await?;

    let service = RegistrationService::new(&test.db, &config);
    let first = service.cancel(pairing.id, "user:1", "changed plans").await.unwrap();
    let second = service.cancel(pairing.id, "user:1", "changed plans").await.unwrap();

    assert_eq!(first, TerminalOutcome::Applied);
    assert_eq!(second, TerminalOutcome::AlreadyTerminal);

    Ok(())
}

/// Expect a pairing with no captured payments to enqueue no refund
#[tokio::test]
async fn cancel_without_capture_skips_refund() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let (pairing, registration) = test
        .events()
        .insert_confirmed_pair(event.id, category.id, 1, 2)
        .await?;
    let payment = test
        .finance()
        .insert_payment(
            "pay-1",
            SourceType::Registration,
            registration.id,
            PaymentStatus::Created,
        )
        .await?;

    let service = RegistrationService::new(&test.db, &config);
    service.cancel(pairing.id, "user:1", "changed plans").await.unwrap();

    let refund_op = OutboxRepository::new(&test.db)
        .get_by_dedupe_key(&format!("payment:{}:refund", payment.id))
        .await?;
    assert!(refund_op.is_none());

    Ok(())
}
