use entity::sea_orm_active_enums::{JoinMode, PaymentMode, WaitlistStatus};

use crate::service::waitlist::EnqueueOutcome;

use super::*;

/// Expect a PENDING entry for a first enqueue
#[tokio::test]
async fn queues_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;

    let service = WaitlistService::new(&test.db, &config);
    let outcome = service
        .enqueue(
            event.id,
            category.id,
            5,
            PaymentMode::Single,
            JoinMode::LookingForPartner,
        )
        .await
        .unwrap();

    let EnqueueOutcome::Queued(entry) = outcome else {
        panic!("expected Queued, got {outcome:?}");
    };
    assert_eq!(entry.status, WaitlistStatus::Pending);
    assert_eq!(entry.user_id, 5);

    Ok(())
}

/// Expect re-enqueueing to return the existing entry instead of a duplicate
#[tokio::test]
async fn reenqueue_returns_existing_entry() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let config = test_config();
    let event = test.events().insert_event(starts_in_days(14), None).await?;
    let category = test.events().insert_category(event.id, None, None, None).await?;

    let service = WaitlistService::new(&test.db, &config);
    let first = service
        .enqueue(
            event.id,
            category.id,
            5,
            PaymentMode::Single,
            JoinMode::LookingForPartner,
        )
        .await
        .unwrap();
    let second = service
        .enqueue(
            event.id,
            category.id,
            5,
            PaymentMode::Split,
            JoinMode::InvitePartner,
        )
        .await
        .unwrap();

    let EnqueueOutcome::Queued(first_entry) = first else {
        panic!("expected Queued");
    };
    let EnqueueOutcome::AlreadyQueued(second_entry) = second else {
        panic!("expected AlreadyQueued, got {second:?}");
    };
    assert_eq!(first_entry.id, second_entry.id);

    Ok(())
}
