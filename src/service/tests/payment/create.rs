use entity::sea_orm_active_enums::SourceType;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::service::payment::CreatePayment;

use super::*;

fn intent(registration_id: i32, key: &str) -> CreatePayment {
    CreatePayment {
        source_type: SourceType::Registration,
        source_id: registration_id,
        payer_user_id: Some(1),
        slot_role: None,
        gross_cents: 3000,
        platform_fee_cents: 300,
        currency: "EUR".to_string(),
        idempotency_key: key.to_string(),
    }
}

/// Expect a repeated create with the same idempotency key to return the
/// original payment and insert no second row
#[tokio::test]
async fn create_is_idempotent_by_key() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let (_, registration) = seed_unpaid_pairing(&test).await?;

    let service = PaymentService::new(&test.db);
    let first = service
        .create_payment(intent(registration.id, "checkout:1"))
        .await
        .unwrap();
    let second = service
        .create_payment(intent(registration.id, "checkout:1"))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);

    let count = entity::prelude::Payment::find().count(&test.db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Expect distinct keys to mint distinct payments
#[tokio::test]
async fn distinct_keys_mint_distinct_payments() -> Result<(), TestError> {
    let test = TestBuilder::new().with_platform_tables().build().await?;
    let (_, registration) = seed_unpaid_pairing(&test).await?;

    let service = PaymentService::new(&test.db);
    let first = service
        .create_payment(intent(registration.id, "checkout:1"))
        .await
        .unwrap();
    let second = service
        .create_payment(intent(registration.id, "checkout:2"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);

    Ok(())
}
