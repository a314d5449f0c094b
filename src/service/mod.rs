pub mod capacity;
pub mod deadline;
pub mod fulfillment;
pub mod ledger;
pub mod payment;
pub mod registration;
pub mod waitlist;

#[cfg(test)]
pub(crate) mod tests;

use chrono::Utc;
use sea_orm::ConnectionTrait;

use crate::{data::outbox::OutboxRepository, error::Error, model::operation::OutboxJob};

/// Serialize a job and enqueue it on the caller's connection. A duplicate
/// dedupe key is a no-op, which is what makes retried transactions safe.
pub(crate) async fn enqueue_outbox<C: ConnectionTrait>(
    db: &C,
    job: &OutboxJob,
    dedupe_key: &str,
    correlation_id: Option<String>,
) -> Result<(), Error> {
    let payload = serde_json::to_value(job)?;

    OutboxRepository::new(db)
        .enqueue(
            job.operation_type(),
            dedupe_key,
            correlation_id,
            payload,
            Utc::now().naive_utc(),
        )
        .await?;

    Ok(())
}
