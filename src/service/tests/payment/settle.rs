use entity::sea_orm_active_enums::{
    EntitlementStatus, LedgerEntryType, PaymentStatus, SourceType,
};

use crate::{
    data::{
        entitlement::EntitlementRepository, ledger::LedgerRepository, outbox::OutboxRepository,
        registration::RegistrationRepository,
    },
    service::{
        fulfillment::FulfillmentService,
        payment::{ChargebackOutcome, CreatePayment, SettlementOutcome},
    },
};

use super::*;

async fn captured_payment(
    test: &TestContext,
    registration_id: i32,
) -> Result<entity::payment::Model, TestError> {
    let service = PaymentService::new(&test.db);
    let payment = service
        .create_payment(CreatePayment {
            source_type: SourceType::Registration,
            source_id: registration_id,
            payer_user_id: Some(1),
            slot_role: None,
            gross_cents: 3000,
            platform_fee_cents: 300,
            currency: "EUR".to_string(),
            idempotency_key: "checkout:1".to_string(),
        })
        .await
        .unwrap();
    let outcome = service.mark_succeeded(&payment.id, Some(45)).await.unwrap();

    let SettlementOutcome::Applied { payment } = outcome else {
        panic!("expected Applied, got {outcome:?}");
    };
    Ok(payment)
}

/// Expect a capture to settle the ledger, confirm the registration, and
/// enqueue fulfillment
#[tokio::test]
async fn capture_settles_and_confirms() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let (_, registration) = seed_unpaid_pairing(&test).await?;

    let payment = captured_payment(&test, registration.id).await?;
    assert_eq!(payment.status, PaymentStatus::Succeeded);
    assert_eq!(payment.processor_fee_cents, Some(45));

    let balance = LedgerRepository::new(&test.db).balance(&payment.id).await?;
    assert_eq!(balance, 3000 - 300 - 45);

    let registration = RegistrationRepository::new(&test.db)
        .get(registration.id)
        .await?
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Confirmed);

    let fulfill_op = OutboxRepository::new(&test.db)
        .get_by_dedupe_key(&format!("payment:{}:fulfill", payment.id))
        .await?;
    assert!(fulfill_op.is_some());

    Ok(())
}

/// Expect a replayed capture to be ignored without new ledger entries
#[tokio::test]
async fn replayed_capture_is_ignored() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let (_, registration) = seed_unpaid_pairing(&test).await?;
    let payment = captured_payment(&test, registration.id).await?;

    let ledger = LedgerRepository::new(&test.db);
    let entries_before = ledger.list_for_payment(&payment.id).await?.len();

    let outcome = PaymentService::new(&test.db)
        .mark_succeeded(&payment.id, Some(45))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        SettlementOutcome::Ignored {
            status: PaymentStatus::Succeeded
        }
    ));
    assert_eq!(ledger.list_for_payment(&payment.id).await?.len(), entries_before);

    Ok(())
}

/// Expect a full refund to reverse every recorded entry and net the balance
/// to zero
#[tokio::test]
async fn full_refund_nets_balance_to_zero() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let (_, registration) = seed_unpaid_pairing(&test).await?;
    let payment = captured_payment(&test, registration.id).await?;

    let outcome = PaymentService::new(&test.db)
        .record_refund(&payment.id, None, "refund-1")
        .await
        .unwrap();

    let SettlementOutcome::Applied { payment } = outcome else {
        panic!("expected Applied, got {outcome:?}");
    };
    assert_eq!(payment.status, PaymentStatus::Refunded);

    let balance = LedgerRepository::new(&test.db).balance(&payment.id).await?;
    assert_eq!(balance, 0);

    Ok(())
}

/// Expect a replayed refund report to be ignored and the ledger unchanged
#[tokio::test]
async fn replayed_refund_is_ignored() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let (_, registration) = seed_unpaid_pairing(&test).await?;
    let payment = captured_payment(&test, registration.id).await?;

    let service = PaymentService::new(&test.db);
    service
        .record_refund(&payment.id, None, "refund-1")
        .await
        .unwrap();
    let outcome = service
        .record_refund(&payment.id, None, "refund-1")
        .await
        .unwrap();

    assert!(matches!(outcome, SettlementOutcome::Ignored { .. }));
    let balance = LedgerRepository::new(&test.db).balance(&payment.id).await?;
    assert_eq!(balance, 0);

    Ok(())
}

/// Expect the dispute chain ACTIVE -> SUSPENDED -> REVOKED, with REVOKED
/// never reverting
#[tokio::test]
async fn dispute_chain_suspends_then_revokes() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let (_, registration) = seed_unpaid_pairing(&test).await?;
    let payment = captured_payment(&test, registration.id).await?;

    let fulfillment = FulfillmentService::new(&test.db);
    fulfillment.fulfill_payment(&payment.id).await.unwrap();

    let entitlements = EntitlementRepository::new(&test.db);
    let rows = entitlements.list_by_purchase(&payment.id).await?;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|e| e.status == EntitlementStatus::Active));

    let service = PaymentService::new(&test.db);
    service.record_dispute(&payment.id, 1500).await.unwrap();
    let rows = entitlements.list_by_purchase(&payment.id).await?;
    assert!(rows.iter().all(|e| e.status == EntitlementStatus::Suspended));

    service
        .record_chargeback(&payment.id, ChargebackOutcome::Lost)
        .await
        .unwrap();
    let rows = entitlements.list_by_purchase(&payment.id).await?;
    assert!(rows.iter().all(|e| e.status == EntitlementStatus::Revoked));

    // Replays settle into the same end state.
    let replay = service
        .record_chargeback(&payment.id, ChargebackOutcome::Lost)
        .await
        .unwrap();
    assert!(matches!(replay, SettlementOutcome::Ignored { .. }));

    let refulfill = fulfillment.fulfill_payment(&payment.id).await.unwrap();
    assert!(matches!(
        refulfill,
        crate::service::fulfillment::FulfillmentOutcome::Skipped { .. }
    ));
    let rows = entitlements.list_by_purchase(&payment.id).await?;
    assert!(rows.iter().all(|e| e.status == EntitlementStatus::Revoked));

    Ok(())
}

/// Expect a won chargeback to reinstate suspended entitlements and reverse
/// the dispute fee
#[tokio::test]
async fn chargeback_won_reinstates() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let (_, registration) = seed_unpaid_pairing(&test).await?;
    let payment = captured_payment(&test, registration.id).await?;

    let fulfillment = FulfillmentService::new(&test.db);
    fulfillment.fulfill_payment(&payment.id).await.unwrap();

    let service = PaymentService::new(&test.db);
    service.record_dispute(&payment.id, 1500).await.unwrap();
    service
        .record_chargeback(&payment.id, ChargebackOutcome::Won)
        .await
        .unwrap();

    let entitlements = EntitlementRepository::new(&test.db);
    let rows = entitlements.list_by_purchase(&payment.id).await?;
    assert!(rows.iter().all(|e| e.status == EntitlementStatus::Active));

    let entries = LedgerRepository::new(&test.db)
        .list_for_payment(&payment.id)
        .await?;
    let dispute_net: i64 = entries
        .iter()
        .filter(|e| {
            matches!(
                e.entry_type,
                LedgerEntryType::DisputeFee | LedgerEntryType::DisputeFeeReversal
            )
        })
        .map(|e| e.amount_cents)
        .sum();
    assert_eq!(dispute_net, 0);

    Ok(())
}
