use entity::sea_orm_active_enums::{
    JoinMode, PaymentMode, RegistrationStatus, SlotRole, SlotStatus,
};

use crate::{
    data::pairing::PairingRepository,
    model::outcome::Rejection,
    service::registration::{CreateOutcome, CreateRegistration},
};

use super::*;

fn input(event_id: i32, category_id: i32, user_id: i32) -> CreateRegistration {
    CreateRegistration {
        event_id,
        category_id,
        user_id,
        payment_mode: PaymentMode::Single,
        join_mode: JoinMode::LookingForPartner,
        invited_contact: None,
        currency: "EUR".to_string(),
    }
}

/// Expect an open pairing in MATCHMAKING with a filled captain slot and a
/// pending partner slot
#[tokio::test]
async fn creates_matchmaking_pairing() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.create(input(event.id, category.id, 1)).await.unwrap();

    let CreateOutcome::Created {
        pairing,
        registration,
    } = outcome
    else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(registration.status, RegistrationStatus::Matchmaking);
    assert!(pairing.invite_token.is_none());
    assert!(pairing.payment_deadline.is_none());

    let slots = PairingRepository::new(&test.db).get_slots(pairing.id).await?;
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].role, SlotRole::Captain);
    assert_eq!(slots[0].status, SlotStatus::Filled);
    assert_eq!(slots[0].occupant_user_id, Some(1));
    assert_eq!(slots[1].role, SlotRole::Partner);
    assert_eq!(slots[1].status, SlotStatus::Pending);

    Ok(())
}

/// Expect a created pairing to be loadable together with its category
#[tokio::test]
async fn pairing_joins_to_category() -> Result<(), TestError> {
    use sea_orm::EntityTrait;

    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.create(input(event.id, category.id, 1)).await.unwrap();

    let CreateOutcome::Created { pairing, .. } = outcome else {
        panic!("expected Created, got {outcome:?}");
    };

    let (row, linked) = entity::prelude::Pairing::find_by_id(pairing.id)
        .find_also_related(entity::prelude::Category)
        .one(&test.db)
        .await?
        .expect("pairing row");
    assert_eq!(row.id, pairing.id);
    assert_eq!(linked.map(|c| c.id), Some(category.id));

    Ok(())
}

/// Expect an invite pairing in PENDING_PARTNER carrying a token and the
/// invited contact on the partner slot
#[tokio::test]
async fn invite_pairing_gets_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service
        .create(CreateRegistration {
            join_mode: JoinMode::InvitePartner,
            invited_contact: Some("ana@example.com".to_string()),
            ..input(event.id, category.id, 1)
        })
        .await
        .unwrap();

    let CreateOutcome::Created {
        pairing,
        registration,
    } = outcome
    else {
        panic!("expected Created, got {outcome:?}");
    };
    assert_eq!(registration.status, RegistrationStatus::PendingPartner);
    assert!(pairing.invite_token.is_some());

    let slots = PairingRepository::new(&test.db).get_slots(pairing.id).await?;
    assert_eq!(slots[1].invited_contact.as_deref(), Some("ana@example.com"));

    Ok(())
}

/// Expect a SPLIT pairing to get a payment deadline no later than the event
/// start
#[tokio::test]
async fn split_pairing_gets_deadline() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service
        .create(CreateRegistration {
            payment_mode: PaymentMode::Split,
            ..input(event.id, category.id, 1)
        })
        .await
        .unwrap();

    let CreateOutcome::Created { pairing, .. } = outcome else {
        panic!("expected Created, got {outcome:?}");
    };
    let deadline = pairing.payment_deadline.expect("deadline set");
    assert!(deadline <= event.starts_at);
    assert!(deadline > Utc::now().naive_utc());

    Ok(())
}

/// Expect CATEGORY_FULL when the category's pairing capacity is taken
#[tokio::test]
async fn rejects_when_category_full() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test
        .events()
        .insert_category(event.id, Some(1), None, None)
        .await?;
    test.events()
        .insert_confirmed_pair(event.id, category.id, 10, 11)
        .await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.create(input(event.id, category.id, 1)).await.unwrap();

    let CreateOutcome::Rejected(rejection) = outcome else {
        panic!("expected Rejected, got {outcome:?}");
    };
    assert_eq!(rejection, Rejection::CategoryFull);
    assert_eq!(rejection.code(), "CATEGORY_FULL");

    Ok(())
}

/// Expect CATEGORY_PLAYERS_FULL once the filled-slot cap is reached even
/// with pairing capacity to spare
#[tokio::test]
async fn rejects_when_players_full() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test
        .events()
        .insert_category(event.id, Some(10), Some(2), None)
        .await?;
    test.events()
        .insert_confirmed_pair(event.id, category.id, 10, 11)
        .await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.create(input(event.id, category.id, 1)).await.unwrap();

    assert!(matches!(
        outcome,
        CreateOutcome::Rejected(Rejection::CategoryPlayersFull)
    ));

    Ok(())
}

/// Expect MAX_CATEGORIES when the user already plays the allowed number of
/// categories in this event
#[tokio::test]
async fn rejects_over_per_event_category_limit() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let first = test.events().insert_category(event.id, None, None, None).await?;
    let second = test.events().insert_category(event.id, None, None, None).await?;
    test.events()
        .insert_confirmed_pair(event.id, first.id, 1, 2)
        .await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.create(input(event.id, second.id, 1)).await.unwrap();

    assert!(matches!(
        outcome,
        CreateOutcome::Rejected(Rejection::MaxCategories)
    ));

    Ok(())
}

/// Expect ALREADY_IN_CATEGORY for a user already occupying a slot in the
/// category
#[tokio::test]
async fn rejects_duplicate_category_membership() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    test.events()
        .insert_confirmed_pair(event.id, category.id, 1, 2)
        .await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.create(input(event.id, category.id, 1)).await.unwrap();

    assert!(matches!(
        outcome,
        CreateOutcome::Rejected(Rejection::AlreadyInCategory)
    ));

    Ok(())
}

/// Expect EVENT_FULL once active registrations reach the event cap
#[tokio::test]
async fn rejects_when_event_full() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), Some(1)).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    test.events()
        .insert_confirmed_pair(event.id, category.id, 10, 11)
        .await?;

    let service = RegistrationService::new(&test.db, &config);
    let outcome = service.create(input(event.id, category.id, 1)).await.unwrap();

    assert!(matches!(
        outcome,
        CreateOutcome::Rejected(Rejection::EventFull)
    ));

    Ok(())
}
