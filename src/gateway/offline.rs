//! Offline gateway implementations used when no processor credentials are
//! configured. Charges are declined so that no pairing can confirm on a
//! phantom capture; refunds and notifications are recorded in the log only.

use async_trait::async_trait;

use crate::{
    error::Error,
    gateway::{ChargeOutcome, NotificationDispatcher, PaymentProcessor, RefundOutcome},
};

pub struct OfflineProcessor;

#[async_trait]
impl PaymentProcessor for OfflineProcessor {
    async fn charge(
        &self,
        payment_id: &str,
        amount_cents: i64,
        idempotency_key: &str,
    ) -> Result<ChargeOutcome, Error> {
        tracing::warn!(
            "Declining charge of {} cents for payment {} (key {}): no payment processor configured",
            amount_cents,
            payment_id,
            idempotency_key
        );

        Ok(ChargeOutcome::Failed {
            reason: "no payment processor configured".to_string(),
        })
    }

    async fn refund(
        &self,
        payment_id: &str,
        amount_cents: Option<i64>,
        idempotency_key: &str,
    ) -> Result<RefundOutcome, Error> {
        tracing::info!(
            "Recording refund for payment {} ({:?} cents, key {}) without processor call",
            payment_id,
            amount_cents,
            idempotency_key
        );

        Ok(RefundOutcome::Executed)
    }
}

pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn dispatch(
        &self,
        dedupe_key: &str,
        kind: &str,
        user_id: Option<i32>,
    ) -> Result<(), Error> {
        tracing::info!(
            "Notification {} (key {}) for user {:?}",
            kind,
            dedupe_key,
            user_id
        );

        Ok(())
    }
}
