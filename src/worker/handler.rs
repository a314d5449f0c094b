//! Outbox operation execution.
//!
//! Each operation is deserialized back into its job and dispatched to the
//! owning service. Handlers are idempotent end to end, so a crash between
//! execution and completion only costs a harmless re-run.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    error::Error,
    gateway::{NotificationDispatcher, PaymentProcessor, RefundOutcome},
    model::operation::OutboxJob,
    service::{
        fulfillment::FulfillmentService, payment::PaymentService, waitlist::WaitlistService,
    },
};

pub struct OutboxHandler {
    db: DatabaseConnection,
    config: Config,
    processor: Arc<dyn PaymentProcessor>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl OutboxHandler {
    /// Creates a new instance of [`OutboxHandler`]
    pub fn new(
        db: DatabaseConnection,
        config: Config,
        processor: Arc<dyn PaymentProcessor>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            db,
            config,
            processor,
            dispatcher,
        }
    }

    pub async fn handle(&self, operation: &entity::outbox_operation::Model) -> Result<(), Error> {
        let job: OutboxJob = serde_json::from_value(operation.payload.clone())?;

        tracing::debug!(
            operation_id = operation.id,
            dedupe_key = %operation.dedupe_key,
            job = %job,
            "Executing outbox operation"
        );

        match job {
            OutboxJob::ExecuteRefund {
                payment_id,
                amount_cents,
                ..
            } => {
                self.execute_refund(&payment_id, amount_cents, &operation.dedupe_key)
                    .await
            }
            OutboxJob::PromoteWaitlist { category_id } => {
                let outcome = WaitlistService::new(&self.db, &self.config)
                    .promote(category_id)
                    .await?;
                tracing::debug!(category_id, ?outcome, "Waitlist promotion finished");
                Ok(())
            }
            OutboxJob::FulfillPayment { payment_id } => {
                let outcome = FulfillmentService::new(&self.db)
                    .fulfill_payment(&payment_id)
                    .await?;
                tracing::debug!(payment_id = %payment_id, ?outcome, "Fulfillment finished");
                Ok(())
            }
            OutboxJob::DispatchNotification { kind, user_id, .. } => {
                self.dispatcher
                    .dispatch(&operation.dedupe_key, &kind, user_id)
                    .await
            }
        }
    }

    /// Call the processor, then record the reversal. The dedupe key doubles
    /// as the processor idempotency key and the ledger refund reference, so
    /// neither side double-applies on retry.
    async fn execute_refund(
        &self,
        payment_id: &str,
        amount_cents: Option<i64>,
        dedupe_key: &str,
    ) -> Result<(), Error> {
        let outcome = self
            .processor
            .refund(payment_id, amount_cents, dedupe_key)
            .await?;

        match outcome {
            RefundOutcome::Executed | RefundOutcome::AlreadyRefunded => {
                PaymentService::new(&self.db)
                    .record_refund(payment_id, amount_cents, dedupe_key)
                    .await?;
                Ok(())
            }
            RefundOutcome::Failed { reason } => {
                tracing::error!(payment_id = %payment_id, reason = %reason, "Refund failed");
                Err(Error::GatewayError(reason))
            }
        }
    }
}
