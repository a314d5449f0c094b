//! Collaborator seams for external side effects.
//!
//! The platform core consumes the payment processor and notification
//! dispatcher as trait objects. Outbox handlers call these outside of any
//! database transaction; the processor's own idempotency semantics (keyed by
//! the strings passed here) prevent double charges and double refunds.

pub mod offline;

use async_trait::async_trait;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ChargeOutcome {
    Succeeded { processor_fee_cents: i64 },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefundOutcome {
    Executed,
    AlreadyRefunded,
    Failed { reason: String },
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charge the stored payment method behind a payment. A retried attempt
    /// with the same `idempotency_key` must not double-charge.
    async fn charge(
        &self,
        payment_id: &str,
        amount_cents: i64,
        idempotency_key: &str,
    ) -> Result<ChargeOutcome, Error>;

    /// Refund a captured payment, fully when `amount_cents` is `None`.
    async fn refund(
        &self,
        payment_id: &str,
        amount_cents: Option<i64>,
        idempotency_key: &str,
    ) -> Result<RefundOutcome, Error>;
}

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Enqueue a notification keyed by a stable dedupe string. Delivery and
    /// ordering are the dispatcher's concern.
    async fn dispatch(
        &self,
        dedupe_key: &str,
        kind: &str,
        user_id: Option<i32>,
    ) -> Result<(), Error>;
}
