use entity::sea_orm_active_enums::{RegistrationStatus, WaitlistStatus};
use sea_orm::EntityTrait;

use crate::{
    data::registration::RegistrationRepository, model::outcome::Rejection,
    service::waitlist::PromotionOutcome,
};

use super::*;

/// Expect the oldest pending entry promoted into a new pairing
#[tokio::test]
async fn promotes_oldest_entry() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    let oldest = test
        .events()
        .insert_waitlist_entry(event.id, category.id, 5)
        .await?;
    test.events()
        .insert_waitlist_entry(event.id, category.id, 6)
        .await?;

    let service = WaitlistService::new(&test.db, &config);
    let outcome = service.promote(category.id).await.unwrap();

    let PromotionOutcome::Promoted {
        entry_id,
        pairing_id,
    } = outcome
    else {
        panic!("expected Promoted, got {outcome:?}");
    };
    assert_eq!(entry_id, oldest.id);

    let entry = entity::prelude::WaitlistEntry::find_by_id(entry_id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(entry.status, WaitlistStatus::Promoted);
    assert_eq!(entry.promoted_pairing_id, Some(pairing_id));

    let registration = RegistrationRepository::new(&test.db)
        .get_by_pairing(pairing_id)
        .await?
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Matchmaking);

    Ok(())
}

/// Expect a stale entry (user already in the category) cancelled and the
/// next entry promoted instead
#[tokio::test]
async fn skips_stale_entry() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;
    test.events()
        .insert_confirmed_pair(event.id, category.id, 5, 9)
        .await?;
    let stale = test
        .events()
        .insert_waitlist_entry(event.id, category.id, 5)
        .await?;
    let eligible = test
        .events()
        .insert_waitlist_entry(event.id, category.id, 6)
        .await?;

    let service = WaitlistService::new(&test.db, &config);
    let outcome = service.promote(category.id).await.unwrap();

    let PromotionOutcome::Promoted { entry_id, .. } = outcome else {
        panic!("expected Promoted, got {outcome:?}");
    };
    assert_eq!(entry_id, eligible.id);

    let stale = entity::prelude::WaitlistEntry::find_by_id(stale.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stale.status, WaitlistStatus::Cancelled);

    Ok(())
}

/// Expect WaitlistEmpty with no pending entries
#[tokio::test]
async fn empty_waitlist() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;

    let service = WaitlistService::new(&test.db, &config);
    let outcome = service.promote(category.id).await.unwrap();

    assert!(matches!(outcome, PromotionOutcome::WaitlistEmpty));

    Ok(())
}

/// Expect the head entry to stay PENDING when the category filled up again
#[tokio::test]
async fn rejected_entry_stays_pending() -> Result<(), TestError> {
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
    let entry = test
        .events()
        .insert_waitlist_entry(event.id, category.id, 5)
        .await?;

    let service = WaitlistService::new(&test.db, &config);
    let outcome = service.promote(category.id).await.unwrap();

    assert!(matches!(
        outcome,
        PromotionOutcome::Rejected(Rejection::CategoryFull)
    ));

    let entry = entity::prelude::WaitlistEntry::find_by_id(entry.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(entry.status, WaitlistStatus::Pending);

    Ok(())
}
