use entity::sea_orm_active_enums::{
    GuaranteeStatus, PaymentMode, RegistrationStatus, SlotPaymentStatus, SlotRole, SlotStatus,
};

use crate::{
    data::{outbox::OutboxRepository, pairing::PairingRepository},
    service::registration::ConfirmOutcome,
};

use super::*;

async fn seed_filled_pairing(
    test: &TestContext,
    payment_mode: PaymentMode,
) -> Result<(entity::pairing::Model, entity::registration::Model), TestError> {
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let pairing = test
        .events()
        .insert_invite_pairing(event.id, category.id, 1, payment_mode, "tok")
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

/// Expect a SINGLE pairing to confirm on the captain's payment and enqueue
/// the confirmation notification
#[tokio::test]
async fn single_captain_payment_confirms() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let (pairing, _) = seed_filled_pairing(&test, PaymentMode::Single).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service
        .confirm_slot_payment(pairing.id, SlotRole::Captain)
        .await
        .unwrap();

    let ConfirmOutcome::Applied {
        registration,
        newly_confirmed,
    } = outcome
    else {
        panic!("expected Applied, got {outcome:?}");
    };
    assert!(newly_confirmed);
    assert_eq!(registration.status, RegistrationStatus::Confirmed);

    let operation = OutboxRepository::new(&test.db)
        .get_by_dedupe_key(&format!("pairing:{}:confirmed", pairing.id))
        .await?;
    assert!(operation.is_some());

    Ok(())
}

/// Expect a SPLIT captain payment to arm the guarantee without confirming
#[tokio::test]
async fn split_captain_payment_arms_guarantee() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let (pairing, _) = seed_filled_pairing(&test, PaymentMode::Split).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service
        .confirm_slot_payment(pairing.id, SlotRole::Captain)
        .await
        .unwrap();

    let ConfirmOutcome::Applied {
        registration,
        newly_confirmed,
    } = outcome
    else {
        panic!("expected Applied, got {outcome:?}");
    };
    assert!(!newly_confirmed);
    assert_eq!(registration.status, RegistrationStatus::PendingPartner);

    let pairing = PairingRepository::new(&test.db)
        .get(pairing.id)
        .await?
        .unwrap();
    assert_eq!(pairing.guarantee_status, GuaranteeStatus::Armed);

    Ok(())
}

/// Expect a SPLIT pairing to confirm once both legs are paid and disarm the
/// guarantee
#[tokio::test]
async fn split_confirms_after_both_legs() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let (pairing, _) = seed_filled_pairing(&test, PaymentMode::Split).await?;

    let service = RegistrationService::new(&test.db, &config);
    service
        .confirm_slot_payment(pairing.id, SlotRole::Captain)
        .await
        .unwrap();
    let outcome = service
        .confirm_slot_payment(pairing.id, SlotRole::Partner)
        .await
        .unwrap();

    let ConfirmOutcome::Applied {
        registration,
        newly_confirmed,
    } = outcome
    else {
        panic!("expected Applied, got {outcome:?}");
    };
    assert!(newly_confirmed);
    assert_eq!(registration.status, RegistrationStatus::Confirmed);

    let pairing = PairingRepository::new(&test.db)
        .get(pairing.id)
        .await?
        .unwrap();
    assert_eq!(pairing.guarantee_status, GuaranteeStatus::None);

    Ok(())
}

/// Expect a replayed confirmation to be a no-op
#[tokio::test]
async fn replay_does_not_reconfirm() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let (pairing, _) = seed_filled_pairing(&test, PaymentMode::Single).await?;

    let service = RegistrationService::new(&test.db, &config);
    service
        .confirm_slot_payment(pairing.id, SlotRole::Captain)
        .await
        .unwrap();
    let outcome = service
        .confirm_slot_payment(pairing.id, SlotRole::Captain)
        .await
        .unwrap();

    let ConfirmOutcome::Applied {
        newly_confirmed, ..
    } = outcome
    else {
        panic!("expected Applied, got {outcome:?}");
    };
    assert!(!newly_confirmed);

    Ok(())
}
