use entity::sea_orm_active_enums::{
    PaymentMode, RegistrationStatus, SlotPaymentStatus, SlotRole, SlotStatus,
};

use crate::{data::pairing::PairingRepository, service::registration::AcceptInviteOutcome};

use super::*;

async fn seed_invite_pairing(
    test: &TestContext,
    token: &str,
) -> Result<(entity::pairing::Model, entity::registration::Model), TestError> {
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let pairing = test
        .events()
        .insert_invite_pairing(event.id, category.id, 1, PaymentMode::Single, token)
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
            RegistrationStatus::PendingPartner,
        )
        .await?;

    Ok((pairing, registration))
}

/// Expect the partner slot filled by the accepting user, status re-derived
#[tokio::test]
async fn fills_partner_slot() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let (pairing, _) = seed_invite_pairing(&test, "tok-1").await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.accept_invite("tok-1", 2).await.unwrap();

    let AcceptInviteOutcome::Accepted { registration } = outcome else {
        panic!("expected Accepted, got {outcome:?}");
    };
    // Both slots filled but nothing paid yet.
    assert_eq!(registration.status, RegistrationStatus::PendingPartner);

    let slots = PairingRepository::new(&test.db).get_slots(pairing.id).await?;
    assert_eq!(slots[1].status, SlotStatus::Filled);
    assert_eq!(slots[1].occupant_user_id, Some(2));

    Ok(())
}

/// Expect InvalidToken for an unknown token
#[tokio::test]
async fn rejects_unknown_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    seed_invite_pairing(&test, "tok-1").await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.accept_invite("tok-other", 2).await.unwrap();

    assert!(matches!(outcome, AcceptInviteOutcome::InvalidToken));

    Ok(())
}

/// Expect AlreadyFilled once the partner slot is taken
#[tokio::test]
async fn rejects_second_acceptance() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    seed_invite_pairing(&test, "tok-1").await?;

    let service = RegistrationService::new(&test.db, &config);
    service.accept_invite("tok-1", 2).await.unwrap();
    let outcome = service.accept_invite("tok-1", 3).await.unwrap();

    assert!(matches!(outcome, AcceptInviteOutcome::AlreadyFilled));

    Ok(())
}

/// Expect Terminal when the registration was cancelled in the meantime
#[tokio::test]
async fn rejects_terminal_registration() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let (pairing, _) = seed_invite_pairing(&test, "tok-1").await?;

    let service = RegistrationService::new(&test.db, &config);
    service.cancel(pairing.id, "user:1", "changed plans").await.unwrap();
    let outcome = service.accept_invite("tok-1", 2).await.unwrap();

    assert!(matches!(outcome, AcceptInviteOutcome::Terminal));

    Ok(())
}
